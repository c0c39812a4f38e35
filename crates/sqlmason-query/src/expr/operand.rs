//! Operands of comparisons and functions.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{ColumnExpr, RenderContext, RenderSql};
use crate::builder::SqlBuilder;
use crate::command::Command;
use crate::error::Result;
use crate::schema::TableColumn;
use crate::types::DataType;
use crate::value::Value;

/// Right-hand side of a comparison, or an argument of a function.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
	/// A constant, inlined or bound depending on the dialect settings
	Value(Value),
	/// A constant that is always bound as a parameter
	Param(Value),
	Expr(ColumnExpr),
	/// Comma separated list, e.g. the members of an IN
	List(Vec<Operand>),
	/// Sub-select, e.g. for `IN (SELECT ...)`
	Query(Box<Command>),
}

impl Operand {
	/// A constant that is always bound, regardless of the dialect settings.
	pub fn param(value: impl Into<Value>) -> Self {
		Self::Param(value.into())
	}

	pub fn list<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Operand>,
	{
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Returns `true` for a NULL constant, inline or bound.
	#[must_use]
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Value(Value::Null) | Self::Param(Value::Null))
	}

	/// Renders the operand; `hint` is the data type of the column it is
	/// compared with, used to format constants.
	pub(crate) fn render_with_hint(
		&self,
		builder: &mut SqlBuilder<'_>,
		ctx: RenderContext,
		hint: DataType,
	) -> Result<()> {
		match self {
			Self::Value(value) => builder.push_value(value, hint),
			Self::Param(value) => builder.push_param(value),
			Self::Expr(expr) => {
				let nested_calc = matches!(expr, ColumnExpr::Calc(..));
				if nested_calc {
					builder.push("(");
				}
				expr.render_into(builder, ctx.with(RenderContext::VALUE_ONLY))?;
				if nested_calc {
					builder.push(")");
				}
				Ok(())
			}
			Self::List(items) => {
				let mut first = true;
				for item in items {
					if !first {
						builder.push(", ");
					}
					item.render_with_hint(builder, ctx, hint)?;
					first = false;
				}
				Ok(())
			}
			Self::Query(cmd) => {
				builder.push("(");
				builder.push_subquery(cmd, None)?;
				builder.push(")");
				Ok(())
			}
		}
	}
}

impl RenderSql for Operand {
	fn render_into(&self, builder: &mut SqlBuilder<'_>, ctx: RenderContext) -> Result<()> {
		self.render_with_hint(builder, ctx, DataType::Unknown)
	}

	fn referenced_columns(&self, out: &mut IndexSet<TableColumn>) {
		match self {
			Self::Expr(expr) => expr.referenced_columns(out),
			Self::List(items) => items.iter().for_each(|i| i.referenced_columns(out)),
			Self::Value(_) | Self::Param(_) | Self::Query(_) => {}
		}
	}
}

macro_rules! impl_operand_from_value {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Operand {
				fn from(v: $ty) -> Self {
					Self::Value(Value::from(v))
				}
			}
		)*
	};
}

impl_operand_from_value!(
	bool,
	i8,
	i16,
	i32,
	i64,
	u8,
	u16,
	u32,
	f32,
	f64,
	Decimal,
	&str,
	String,
	&String,
	NaiveDate,
	NaiveDateTime,
	Uuid,
	Vec<u8>,
);

impl<T: Into<Value>> From<Option<T>> for Operand {
	fn from(v: Option<T>) -> Self {
		Self::Value(Value::from(v))
	}
}

impl From<Value> for Operand {
	fn from(v: Value) -> Self {
		Self::Value(v)
	}
}

impl From<ColumnExpr> for Operand {
	fn from(expr: ColumnExpr) -> Self {
		Self::Expr(expr)
	}
}

impl From<TableColumn> for Operand {
	fn from(column: TableColumn) -> Self {
		Self::Expr(ColumnExpr::Column(column))
	}
}

impl From<&TableColumn> for Operand {
	fn from(column: &TableColumn) -> Self {
		Self::Expr(ColumnExpr::Column(column.clone()))
	}
}

impl From<Command> for Operand {
	fn from(cmd: Command) -> Self {
		Self::Query(Box::new(cmd))
	}
}

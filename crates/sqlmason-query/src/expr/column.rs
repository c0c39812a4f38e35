//! Value-producing expressions.

use indexmap::IndexSet;

use super::{CompareExpr, ColumnCompare, Operand, RawSql, RenderContext, RenderSql};
use crate::builder::SqlBuilder;
use crate::dialect::Phrase;
use crate::error::Result;
use crate::schema::TableColumn;
use crate::types::{ArithOperator, CmpOperator, ColumnSize, DataType};
use crate::value::Value;

/// Function applied to a base expression, rendered from a phrase template.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
	pub phrase: Phrase,
	pub base: ColumnExpr,
	pub args: Vec<Operand>,
	pub data_type: DataType,
	/// Aggregate functions force grouping of the other select columns
	pub aggregate: bool,
}

/// `CASE WHEN .. THEN .. [ELSE ..] END`
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
	pub branches: Vec<(CompareExpr, Operand)>,
	pub otherwise: Option<Operand>,
	pub data_type: DataType,
}

impl CaseExpr {
	pub fn when(condition: CompareExpr, then: impl Into<Operand>) -> Self {
		let then = then.into();
		let data_type = operand_type(&then);
		Self {
			branches: vec![(condition, then)],
			otherwise: None,
			data_type,
		}
	}

	pub fn and_when(mut self, condition: CompareExpr, then: impl Into<Operand>) -> Self {
		self.branches.push((condition, then.into()));
		self
	}

	pub fn otherwise(mut self, value: impl Into<Operand>) -> Self {
		self.otherwise = Some(value.into());
		self
	}

	pub fn into_expr(self) -> ColumnExpr {
		ColumnExpr::Case(Box::new(self))
	}
}

fn operand_type(operand: &Operand) -> DataType {
	match operand {
		Operand::Value(v) | Operand::Param(v) => v.data_type(),
		Operand::Expr(e) => e.data_type(),
		Operand::List(_) | Operand::Query(_) => DataType::Unknown,
	}
}

/// A value-producing expression: column, constant, function, arithmetic,
/// concatenation, CASE or alias.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnExpr {
	Column(TableColumn),
	Value(Value),
	Function(Box<FunctionExpr>),
	Cast(Box<ColumnExpr>, DataType),
	Calc(Box<ColumnExpr>, ArithOperator, Box<Operand>),
	Concat(Box<ColumnExpr>, Vec<Operand>),
	Case(Box<CaseExpr>),
	/// `COUNT(*)`
	CountAll,
	Alias(Box<ColumnExpr>, String),
}

#[allow(clippy::should_implement_trait)]
impl ColumnExpr {
	/// A constant in the select list.
	pub fn value(value: impl Into<Value>) -> Self {
		Self::Value(value.into())
	}

	pub fn count_all() -> Self {
		Self::CountAll
	}

	/// The database's current date.
	pub fn current_date() -> Self {
		Self::Value(Value::CurrentDate)
	}

	/// The database's current timestamp.
	pub fn current_date_time() -> Self {
		Self::Value(Value::CurrentDateTime)
	}

	/// Name this expression is known by in a result set.
	pub fn output_name(&self) -> String {
		match self {
			Self::Column(c) => c.name().to_string(),
			Self::Alias(_, alias) => alias.clone(),
			Self::Function(f) => f.base.output_name(),
			Self::Cast(base, _) | Self::Calc(base, _, _) | Self::Concat(base, _) => {
				base.output_name()
			}
			Self::Case(case) => match case.branches.first() {
				Some((_, Operand::Expr(e))) => e.output_name(),
				_ => "CASE_VALUE".to_string(),
			},
			Self::Value(_) => "VALUE".to_string(),
			Self::CountAll => "COUNT".to_string(),
		}
	}

	pub fn data_type(&self) -> DataType {
		match self {
			Self::Column(c) => c.data_type(),
			Self::Value(v) => v.data_type(),
			Self::Function(f) => f.data_type,
			Self::Cast(_, dt) => *dt,
			Self::Calc(base, _, _) | Self::Alias(base, _) => base.data_type(),
			Self::Concat(..) => DataType::Text,
			Self::Case(case) => case.data_type,
			Self::CountAll => DataType::Integer,
		}
	}

	/// The column this expression ultimately reads, seen through aliases.
	pub fn source_column(&self) -> Option<&TableColumn> {
		match self {
			Self::Column(c) => Some(c),
			Self::Alias(inner, _) => inner.source_column(),
			_ => None,
		}
	}

	pub fn is_aggregate(&self) -> bool {
		match self {
			Self::Function(f) => f.aggregate,
			Self::Alias(inner, _) | Self::Cast(inner, _) => inner.is_aggregate(),
			Self::CountAll => true,
			_ => false,
		}
	}

	pub fn alias(&self, alias: impl Into<String>) -> ColumnExpr {
		let inner = match self {
			Self::Alias(inner, _) => (**inner).clone(),
			other => other.clone(),
		};
		Self::Alias(Box::new(inner), alias.into())
	}

	// comparisons

	pub fn cmp(&self, op: CmpOperator, value: impl Into<Operand>) -> CompareExpr {
		CompareExpr::Column(ColumnCompare {
			expr: self.clone(),
			op,
			value: value.into(),
		})
	}

	/// `= value`; comparing with NULL renders `IS NULL`.
	pub fn eq(&self, value: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Eq, value)
	}

	/// `<> value`; comparing with NULL renders `IS NOT NULL`.
	pub fn ne(&self, value: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Ne, value)
	}

	pub fn lt(&self, value: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Lt, value)
	}

	pub fn lte(&self, value: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Le, value)
	}

	pub fn gt(&self, value: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Gt, value)
	}

	pub fn gte(&self, value: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Ge, value)
	}

	pub fn like(&self, pattern: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Like, pattern)
	}

	pub fn not_like(&self, pattern: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::NotLike, pattern)
	}

	/// `IN (...)`; takes an [`Operand::List`] or a sub-select.
	pub fn is_in(&self, values: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::In, values)
	}

	pub fn not_in(&self, values: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::NotIn, values)
	}

	pub fn between(&self, low: impl Into<Operand>, high: impl Into<Operand>) -> CompareExpr {
		self.cmp(CmpOperator::Between, Operand::List(vec![low.into(), high.into()]))
	}

	pub fn not_between(&self, low: impl Into<Operand>, high: impl Into<Operand>) -> CompareExpr {
		self.cmp(
			CmpOperator::NotBetween,
			Operand::List(vec![low.into(), high.into()]),
		)
	}

	pub fn is_null(&self) -> CompareExpr {
		self.cmp(CmpOperator::IsNull, Value::Null)
	}

	pub fn is_not_null(&self) -> CompareExpr {
		self.cmp(CmpOperator::NotNull, Value::Null)
	}

	// functions

	fn function(&self, phrase: Phrase, args: Vec<Operand>, data_type: DataType) -> ColumnExpr {
		Self::Function(Box::new(FunctionExpr {
			phrase,
			base: self.clone(),
			args,
			data_type,
			aggregate: false,
		}))
	}

	fn aggregate(&self, phrase: Phrase, data_type: DataType) -> ColumnExpr {
		Self::Function(Box::new(FunctionExpr {
			phrase,
			base: self.clone(),
			args: Vec::new(),
			data_type,
			aggregate: true,
		}))
	}

	pub fn upper(&self) -> ColumnExpr {
		self.function(Phrase::FuncUpper, Vec::new(), DataType::Text)
	}

	pub fn lower(&self) -> ColumnExpr {
		self.function(Phrase::FuncLower, Vec::new(), DataType::Text)
	}

	pub fn trim(&self) -> ColumnExpr {
		self.function(Phrase::FuncTrim, Vec::new(), DataType::Text)
	}

	pub fn length(&self) -> ColumnExpr {
		self.function(Phrase::FuncLength, Vec::new(), DataType::Integer)
	}

	/// Text from the 1-based position `from` to the end.
	pub fn substring(&self, from: impl Into<Operand>) -> ColumnExpr {
		self.function(Phrase::FuncSubstring, vec![from.into()], DataType::Text)
	}

	pub fn substring_len(&self, from: impl Into<Operand>, len: impl Into<Operand>) -> ColumnExpr {
		self.function(
			Phrase::FuncSubstringEx,
			vec![from.into(), len.into()],
			DataType::Text,
		)
	}

	pub fn replace(&self, from: impl Into<Operand>, to: impl Into<Operand>) -> ColumnExpr {
		self.function(Phrase::FuncReplace, vec![from.into(), to.into()], DataType::Text)
	}

	pub fn reverse(&self) -> ColumnExpr {
		self.function(Phrase::FuncReverse, Vec::new(), DataType::Text)
	}

	/// 1-based position of `needle`, 0 when absent.
	pub fn index_of(&self, needle: impl Into<Operand>) -> ColumnExpr {
		self.function(Phrase::FuncIndexOf, vec![needle.into()], DataType::Integer)
	}

	pub fn coalesce(&self, fallback: impl Into<Operand>) -> ColumnExpr {
		self.function(Phrase::FuncCoalesce, vec![fallback.into()], self.data_type())
	}

	pub fn abs(&self) -> ColumnExpr {
		self.function(Phrase::FuncAbs, Vec::new(), self.data_type())
	}

	pub fn round(&self, decimals: i32) -> ColumnExpr {
		self.function(Phrase::FuncRound, vec![decimals.into()], self.data_type())
	}

	pub fn trunc(&self, decimals: i32) -> ColumnExpr {
		self.function(Phrase::FuncTrunc, vec![decimals.into()], self.data_type())
	}

	pub fn ceiling(&self) -> ColumnExpr {
		self.function(Phrase::FuncCeiling, Vec::new(), self.data_type())
	}

	pub fn floor(&self) -> ColumnExpr {
		self.function(Phrase::FuncFloor, Vec::new(), self.data_type())
	}

	pub fn modulo(&self, divisor: impl Into<Operand>) -> ColumnExpr {
		self.function(Phrase::FuncModulo, vec![divisor.into()], self.data_type())
	}

	pub fn day(&self) -> ColumnExpr {
		self.function(Phrase::FuncDay, Vec::new(), DataType::Integer)
	}

	pub fn month(&self) -> ColumnExpr {
		self.function(Phrase::FuncMonth, Vec::new(), DataType::Integer)
	}

	pub fn year(&self) -> ColumnExpr {
		self.function(Phrase::FuncYear, Vec::new(), DataType::Integer)
	}

	pub fn sum(&self) -> ColumnExpr {
		self.aggregate(Phrase::FuncSum, self.data_type())
	}

	pub fn max(&self) -> ColumnExpr {
		self.aggregate(Phrase::FuncMax, self.data_type())
	}

	pub fn min(&self) -> ColumnExpr {
		self.aggregate(Phrase::FuncMin, self.data_type())
	}

	pub fn avg(&self) -> ColumnExpr {
		self.aggregate(Phrase::FuncAvg, DataType::Decimal)
	}

	pub fn count(&self) -> ColumnExpr {
		self.aggregate(Phrase::FuncCount, DataType::Integer)
	}

	pub fn count_distinct(&self) -> ColumnExpr {
		self.aggregate(Phrase::FuncCountDistinct, DataType::Integer)
	}

	/// `CAST(expr AS <native type>)`
	pub fn cast(&self, data_type: DataType) -> ColumnExpr {
		Self::Cast(Box::new(self.clone()), data_type)
	}

	// arithmetic and text

	pub fn add(&self, value: impl Into<Operand>) -> ColumnExpr {
		self.calc(ArithOperator::Add, value)
	}

	pub fn sub(&self, value: impl Into<Operand>) -> ColumnExpr {
		self.calc(ArithOperator::Sub, value)
	}

	pub fn mul(&self, value: impl Into<Operand>) -> ColumnExpr {
		self.calc(ArithOperator::Mul, value)
	}

	pub fn div(&self, value: impl Into<Operand>) -> ColumnExpr {
		self.calc(ArithOperator::Div, value)
	}

	pub fn calc(&self, op: ArithOperator, value: impl Into<Operand>) -> ColumnExpr {
		Self::Calc(Box::new(self.clone()), op, Box::new(value.into()))
	}

	/// Concatenates text using the dialect's concatenation phrase.
	pub fn concat(&self, value: impl Into<Operand>) -> ColumnExpr {
		match self {
			Self::Concat(base, parts) => {
				let mut parts = parts.clone();
				parts.push(value.into());
				Self::Concat(base.clone(), parts)
			}
			other => Self::Concat(Box::new(other.clone()), vec![value.into()]),
		}
	}
}

impl RenderSql for ColumnExpr {
	fn render_into(&self, builder: &mut SqlBuilder<'_>, ctx: RenderContext) -> Result<()> {
		let value_ctx = ctx
			.without(RenderContext::NO_PARENTHESIS)
			.with(RenderContext::VALUE_ONLY);
		match self {
			Self::Column(column) => {
				builder.push_column(column, ctx);
				Ok(())
			}
			Self::Value(value) => builder.push_value(value, value.data_type()),
			Self::Function(f) => {
				let args: Vec<&dyn RenderSql> = f.args.iter().map(|a| a as &dyn RenderSql).collect();
				builder.push_phrase(f.phrase, Some(&f.base as &dyn RenderSql), &args, value_ctx)
			}
			Self::Cast(base, data_type) => {
				let native = builder
					.dialect()
					.native_type(*data_type, ColumnSize::default())?;
				let native = RawSql(&native);
				let args: [&dyn RenderSql; 1] = [&native];
				builder.push_phrase(
					Phrase::FuncCast,
					Some(base.as_ref() as &dyn RenderSql),
					&args,
					value_ctx,
				)
			}
			Self::Calc(base, op, operand) => {
				let nested = matches!(**base, Self::Calc(..));
				if nested {
					builder.push("(");
				}
				base.render_into(builder, value_ctx)?;
				if nested {
					builder.push(")");
				}
				builder.push(" ");
				builder.push(op.as_str());
				builder.push(" ");
				operand.render_with_hint(builder, value_ctx, base.data_type())
			}
			Self::Concat(base, parts) => ConcatChain { base, parts }.render_into(builder, value_ctx),
			Self::Case(case) => {
				builder.push("CASE");
				for (condition, then) in &case.branches {
					builder.push(" WHEN ");
					condition.render_into(builder, RenderContext::DEFAULT)?;
					builder.push(" THEN ");
					then.render_with_hint(builder, value_ctx, case.data_type)?;
				}
				if let Some(otherwise) = &case.otherwise {
					builder.push(" ELSE ");
					otherwise.render_with_hint(builder, value_ctx, case.data_type)?;
				}
				builder.push(" END");
				Ok(())
			}
			Self::CountAll => {
				builder.push("COUNT(*)");
				Ok(())
			}
			Self::Alias(inner, alias) => {
				if ctx.contains(RenderContext::NAME_ONLY) {
					builder.push_identifier(alias);
					return Ok(());
				}
				inner.render_into(builder, value_ctx)?;
				if !ctx.contains(RenderContext::VALUE_ONLY) {
					builder.push(" AS ");
					builder.push_identifier(alias);
				}
				Ok(())
			}
		}
	}

	fn referenced_columns(&self, out: &mut IndexSet<TableColumn>) {
		match self {
			Self::Column(column) => {
				out.insert(column.clone());
			}
			Self::Value(_) | Self::CountAll => {}
			Self::Function(f) => {
				f.base.referenced_columns(out);
				f.args.iter().for_each(|a| a.referenced_columns(out));
			}
			Self::Cast(base, _) | Self::Alias(base, _) => base.referenced_columns(out),
			Self::Calc(base, _, operand) => {
				base.referenced_columns(out);
				operand.referenced_columns(out);
			}
			Self::Concat(base, parts) => {
				base.referenced_columns(out);
				parts.iter().for_each(|p| p.referenced_columns(out));
			}
			Self::Case(case) => {
				for (condition, then) in &case.branches {
					condition.referenced_columns(out);
					then.referenced_columns(out);
				}
				if let Some(otherwise) = &case.otherwise {
					otherwise.referenced_columns(out);
				}
			}
		}
	}
}

/// `base || p1 || p2 ...`, nesting the concat phrase once per part.
struct ConcatChain<'a> {
	base: &'a ColumnExpr,
	parts: &'a [Operand],
}

impl RenderSql for ConcatChain<'_> {
	fn render_into(&self, builder: &mut SqlBuilder<'_>, ctx: RenderContext) -> Result<()> {
		match self.parts.split_last() {
			None => self.base.render_into(builder, ctx),
			Some((last, rest)) => {
				let prefix = ConcatChain {
					base: self.base,
					parts: rest,
				};
				let args: [&dyn RenderSql; 1] = [last];
				builder.push_phrase(Phrase::Concat, Some(&prefix as &dyn RenderSql), &args, ctx)
			}
		}
	}

	fn referenced_columns(&self, out: &mut IndexSet<TableColumn>) {
		self.base.referenced_columns(out);
		self.parts.iter().for_each(|p| p.referenced_columns(out));
	}
}

impl From<TableColumn> for ColumnExpr {
	fn from(column: TableColumn) -> Self {
		Self::Column(column)
	}
}

impl From<&TableColumn> for ColumnExpr {
	fn from(column: &TableColumn) -> Self {
		Self::Column(column.clone())
	}
}

impl From<&ColumnExpr> for ColumnExpr {
	fn from(expr: &ColumnExpr) -> Self {
		expr.clone()
	}
}

/// Builds the same comparison and function helpers on column handles,
/// delegating to [`ColumnExpr`].
macro_rules! delegate_to_expr {
	($($name:ident($($arg:ident: $ty:ty),*) -> $ret:ty;)*) => {
		#[allow(clippy::should_implement_trait)]
		impl TableColumn {
			/// This column as an expression.
			pub fn expr(&self) -> ColumnExpr {
				ColumnExpr::Column(self.clone())
			}

			$(
				pub fn $name(&self, $($arg: $ty),*) -> $ret {
					self.expr().$name($($arg),*)
				}
			)*
		}
	};
}

delegate_to_expr! {
	alias(alias: impl Into<String>) -> ColumnExpr;
	cmp(op: CmpOperator, value: impl Into<Operand>) -> CompareExpr;
	eq(value: impl Into<Operand>) -> CompareExpr;
	ne(value: impl Into<Operand>) -> CompareExpr;
	lt(value: impl Into<Operand>) -> CompareExpr;
	lte(value: impl Into<Operand>) -> CompareExpr;
	gt(value: impl Into<Operand>) -> CompareExpr;
	gte(value: impl Into<Operand>) -> CompareExpr;
	like(pattern: impl Into<Operand>) -> CompareExpr;
	not_like(pattern: impl Into<Operand>) -> CompareExpr;
	is_in(values: impl Into<Operand>) -> CompareExpr;
	not_in(values: impl Into<Operand>) -> CompareExpr;
	between(low: impl Into<Operand>, high: impl Into<Operand>) -> CompareExpr;
	not_between(low: impl Into<Operand>, high: impl Into<Operand>) -> CompareExpr;
	is_null() -> CompareExpr;
	is_not_null() -> CompareExpr;
	upper() -> ColumnExpr;
	lower() -> ColumnExpr;
	trim() -> ColumnExpr;
	length() -> ColumnExpr;
	substring(from: impl Into<Operand>) -> ColumnExpr;
	substring_len(from: impl Into<Operand>, len: impl Into<Operand>) -> ColumnExpr;
	replace(from: impl Into<Operand>, to: impl Into<Operand>) -> ColumnExpr;
	reverse() -> ColumnExpr;
	index_of(needle: impl Into<Operand>) -> ColumnExpr;
	coalesce(fallback: impl Into<Operand>) -> ColumnExpr;
	abs() -> ColumnExpr;
	round(decimals: i32) -> ColumnExpr;
	trunc(decimals: i32) -> ColumnExpr;
	ceiling() -> ColumnExpr;
	floor() -> ColumnExpr;
	modulo(divisor: impl Into<Operand>) -> ColumnExpr;
	day() -> ColumnExpr;
	month() -> ColumnExpr;
	year() -> ColumnExpr;
	sum() -> ColumnExpr;
	max() -> ColumnExpr;
	min() -> ColumnExpr;
	avg() -> ColumnExpr;
	count() -> ColumnExpr;
	count_distinct() -> ColumnExpr;
	cast(data_type: DataType) -> ColumnExpr;
	add(value: impl Into<Operand>) -> ColumnExpr;
	sub(value: impl Into<Operand>) -> ColumnExpr;
	mul(value: impl Into<Operand>) -> ColumnExpr;
	div(value: impl Into<Operand>) -> ColumnExpr;
	concat(value: impl Into<Operand>) -> ColumnExpr;
}

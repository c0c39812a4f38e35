//! Boolean expressions: comparisons and their combinations.

use indexmap::IndexSet;

use super::{ColumnExpr, Operand, RenderContext, RenderSql};
use crate::builder::SqlBuilder;
use crate::command::Command;
use crate::error::{QueryError, Result};
use crate::schema::TableColumn;
use crate::types::CmpOperator;

/// `expr OP value`
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCompare {
	pub expr: ColumnExpr,
	pub op: CmpOperator,
	pub value: Operand,
}

impl ColumnCompare {
	/// The operator as rendered: `= NULL` becomes `IS NULL`, `<> NULL`
	/// becomes `IS NOT NULL`.
	#[must_use]
	pub fn effective_operator(&self) -> CmpOperator {
		match (self.op, self.value.is_null()) {
			(CmpOperator::Eq, true) => CmpOperator::IsNull,
			(CmpOperator::Ne, true) => CmpOperator::NotNull,
			(op, _) => op,
		}
	}

	fn validate(&self, op: CmpOperator) -> Result<()> {
		let node = format!("{} {}", self.expr.output_name(), op.as_str());
		match op {
			CmpOperator::In | CmpOperator::NotIn => match &self.value {
				Operand::Query(_) => Ok(()),
				Operand::List(items) if items.is_empty() => {
					Err(QueryError::malformed(node, "the value list is empty"))
				}
				Operand::List(items) if items.iter().any(Operand::is_null) => {
					Err(QueryError::malformed(node, "the value list contains NULL"))
				}
				Operand::List(_) => Ok(()),
				_ => Err(QueryError::malformed(
					node,
					"expects a value list or a sub-select",
				)),
			},
			CmpOperator::Between | CmpOperator::NotBetween => match &self.value {
				Operand::List(items) if items.len() == 2 && !items.iter().any(Operand::is_null) => {
					Ok(())
				}
				_ => Err(QueryError::malformed(
					node,
					"expects exactly two non-null bounds",
				)),
			},
			CmpOperator::IsNull | CmpOperator::NotNull => Ok(()),
			_ if self.value.is_null() => Err(QueryError::malformed(node, "cannot compare with NULL")),
			_ => Ok(()),
		}
	}

	fn is_mutually_exclusive(&self, other: &ColumnCompare) -> bool {
		if self.effective_operator().family() != other.effective_operator().family() {
			return false;
		}
		match (self.expr.source_column(), other.expr.source_column()) {
			(Some(a), Some(b)) => a == b,
			_ => self.expr == other.expr,
		}
	}
}

impl RenderSql for ColumnCompare {
	fn render_into(&self, builder: &mut SqlBuilder<'_>, _ctx: RenderContext) -> Result<()> {
		let op = self.effective_operator();
		self.validate(op)?;
		let value_ctx = RenderContext::VALUE_ONLY;
		self.expr.render_into(builder, value_ctx)?;
		builder.push(" ");
		builder.push(op.as_str());
		let hint = self.expr.data_type();
		match op {
			_ if op.is_unary() => Ok(()),
			_ if op.is_membership() => {
				if let Operand::Query(_) = self.value {
					builder.push(" ");
					return self.value.render_with_hint(builder, value_ctx, hint);
				}
				builder.push(" (");
				self.value.render_with_hint(builder, value_ctx, hint)?;
				builder.push(")");
				Ok(())
			}
			_ if op.is_range() => {
				let Operand::List(bounds) = &self.value else {
					return Ok(());
				};
				builder.push(" ");
				bounds[0].render_with_hint(builder, value_ctx, hint)?;
				builder.push(" AND ");
				bounds[1].render_with_hint(builder, value_ctx, hint)
			}
			_ => {
				builder.push(" ");
				self.value.render_with_hint(builder, value_ctx, hint)
			}
		}
	}

	fn referenced_columns(&self, out: &mut IndexSet<TableColumn>) {
		self.expr.referenced_columns(out);
		self.value.referenced_columns(out);
	}
}

/// A boolean expression usable in WHERE, HAVING and join conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareExpr {
	Column(ColumnCompare),
	AndOr {
		left: Box<CompareExpr>,
		right: Box<CompareExpr>,
		or: bool,
	},
	Not(Box<CompareExpr>),
	/// Explicit grouping
	Parenthesis(Box<CompareExpr>),
	/// `EXISTS (SELECT ...)`, optionally correlated with the outer query
	Exists {
		command: Box<Command>,
		correlation: Option<Box<CompareExpr>>,
	},
}

impl CompareExpr {
	#[must_use]
	pub fn and(self, other: CompareExpr) -> CompareExpr {
		Self::AndOr {
			left: Box::new(self),
			right: Box::new(other),
			or: false,
		}
	}

	/// Combines with OR. An OR renders in parentheses unless its parent
	/// already provides them.
	#[must_use]
	pub fn or(self, other: CompareExpr) -> CompareExpr {
		Self::AndOr {
			left: Box::new(self),
			right: Box::new(other),
			or: true,
		}
	}

	#[must_use]
	pub fn not(self) -> CompareExpr {
		Self::Not(Box::new(self))
	}

	#[must_use]
	pub fn parenthesis(self) -> CompareExpr {
		match self {
			Self::Parenthesis(_) => self,
			other => Self::Parenthesis(Box::new(other)),
		}
	}

	/// `EXISTS (cmd)`
	pub fn exists(command: Command) -> CompareExpr {
		Self::Exists {
			command: Box::new(command),
			correlation: None,
		}
	}

	/// `EXISTS (cmd)` with `correlation` added to the sub-select's WHERE.
	///
	/// Columns of `correlation` that belong to tables outside the
	/// sub-select are contributed to the outer query's sources.
	pub fn exists_where(command: Command, correlation: CompareExpr) -> CompareExpr {
		Self::Exists {
			command: Box::new(command),
			correlation: Some(Box::new(correlation)),
		}
	}

	/// Whether `other` constrains the same thing as `self`, so that adding
	/// it to a WHERE clause should replace `self` rather than be combined.
	pub fn is_mutually_exclusive(&self, other: &CompareExpr) -> bool {
		match (self, other) {
			(Self::Column(a), Self::Column(b)) => a.is_mutually_exclusive(b),
			(
				Self::AndOr {
					left: l1,
					right: r1,
					or: o1,
				},
				Self::AndOr {
					left: l2,
					right: r2,
					or: o2,
				},
			) => o1 == o2 && l1.is_mutually_exclusive(l2) && r1.is_mutually_exclusive(r2),
			(Self::Not(a), Self::Not(b)) | (Self::Parenthesis(a), Self::Parenthesis(b)) => {
				a.is_mutually_exclusive(b)
			}
			_ => false,
		}
	}

	/// Whether any column compared in this expression is `column`.
	pub fn references_column(&self, column: &TableColumn) -> bool {
		match self {
			Self::Column(c) => c.expr.source_column() == Some(column),
			Self::AndOr { left, right, .. } => {
				left.references_column(column) || right.references_column(column)
			}
			Self::Not(inner) | Self::Parenthesis(inner) => inner.references_column(column),
			Self::Exists { correlation, .. } => correlation
				.as_ref()
				.is_some_and(|c| c.references_column(column)),
		}
	}

	/// Splits a chain of ANDs into its terms, left to right.
	pub(crate) fn into_and_terms(self) -> Vec<CompareExpr> {
		match self {
			Self::AndOr {
				left,
				right,
				or: false,
			} => {
				let mut terms = left.into_and_terms();
				terms.extend(right.into_and_terms());
				terms
			}
			other => vec![other],
		}
	}

	/// Left-deep AND of `terms`.
	pub(crate) fn and_all(terms: Vec<CompareExpr>) -> Option<CompareExpr> {
		terms.into_iter().reduce(CompareExpr::and)
	}
}

impl RenderSql for CompareExpr {
	fn render_into(&self, builder: &mut SqlBuilder<'_>, ctx: RenderContext) -> Result<()> {
		match self {
			Self::Column(compare) => compare.render_into(builder, ctx),
			Self::AndOr { left, right, or } => {
				let wrap = *or && !ctx.contains(RenderContext::NO_PARENTHESIS);
				if wrap {
					builder.push("(");
				}
				left.render_into(builder, RenderContext::DEFAULT)?;
				builder.push(if *or { " OR " } else { " AND " });
				right.render_into(builder, RenderContext::DEFAULT)?;
				if wrap {
					builder.push(")");
				}
				Ok(())
			}
			Self::Not(inner) => {
				builder.push("NOT (");
				inner.render_into(builder, RenderContext::NO_PARENTHESIS)?;
				builder.push(")");
				Ok(())
			}
			Self::Parenthesis(inner) => {
				builder.push("(");
				inner.render_into(builder, RenderContext::NO_PARENTHESIS)?;
				builder.push(")");
				Ok(())
			}
			Self::Exists {
				command,
				correlation,
			} => {
				builder.push("EXISTS (");
				builder.push_subquery(command, correlation.as_deref())?;
				builder.push(")");
				Ok(())
			}
		}
	}

	fn referenced_columns(&self, out: &mut IndexSet<TableColumn>) {
		match self {
			Self::Column(compare) => compare.referenced_columns(out),
			Self::AndOr { left, right, .. } => {
				left.referenced_columns(out);
				right.referenced_columns(out);
			}
			Self::Not(inner) | Self::Parenthesis(inner) => inner.referenced_columns(out),
			Self::Exists {
				command,
				correlation,
			} => {
				let Some(correlation) = correlation else {
					return;
				};
				let inner_sources = command.source_idents();
				let mut columns = IndexSet::new();
				correlation.referenced_columns(&mut columns);
				out.extend(
					columns
						.into_iter()
						.filter(|c| !inner_sources.contains(c.table())),
				);
			}
		}
	}
}

impl From<ColumnCompare> for CompareExpr {
	fn from(compare: ColumnCompare) -> Self {
		Self::Column(compare)
	}
}

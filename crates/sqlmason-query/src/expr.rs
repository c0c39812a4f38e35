//! Expression tree.
//!
//! - [`ColumnExpr`]: value-producing nodes (columns, constants, functions, ...)
//! - [`Operand`]: right-hand side of a comparison or function argument
//! - [`CompareExpr`]: boolean nodes (comparisons, AND/OR, NOT, EXISTS)
//!
//! Every node renders itself through [`RenderSql`] and reports the columns
//! it references so the builder can infer FROM and JOIN clauses.

use std::ops::BitOr;

use indexmap::IndexSet;

use crate::builder::SqlBuilder;
use crate::error::Result;
use crate::schema::TableColumn;

mod column;
mod compare;
mod operand;

pub use column::{CaseExpr, ColumnExpr, FunctionExpr};
pub use compare::{ColumnCompare, CompareExpr};
pub use operand::Operand;

/// Flags steering how a node renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderContext(u8);

impl RenderContext {
	/// Select-list rendering: aliases are written as `expr AS alias`
	pub const DEFAULT: Self = Self(0);
	/// Bare names: unqualified columns, alias names instead of expressions
	pub const NAME_ONLY: Self = Self(1);
	/// Expressions without their alias
	pub const VALUE_ONLY: Self = Self(1 << 1);
	/// The caller already wrapped the node in parentheses
	pub const NO_PARENTHESIS: Self = Self(1 << 2);

	#[must_use]
	pub const fn contains(self, flag: Self) -> bool {
		self.0 & flag.0 == flag.0
	}

	#[must_use]
	pub const fn with(self, flag: Self) -> Self {
		Self(self.0 | flag.0)
	}

	#[must_use]
	pub const fn without(self, flag: Self) -> Self {
		Self(self.0 & !flag.0)
	}
}

impl BitOr for RenderContext {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		self.with(rhs)
	}
}

/// Rendering contract shared by all expression nodes.
pub trait RenderSql {
	/// Appends this node's SQL to `builder`.
	fn render_into(&self, builder: &mut SqlBuilder<'_>, ctx: RenderContext) -> Result<()>;

	/// Adds every column this node references, in first-reference order.
	fn referenced_columns(&self, out: &mut IndexSet<TableColumn>);
}

/// Pre-rendered SQL text used as a template argument.
pub(crate) struct RawSql<'a>(pub &'a str);

impl RenderSql for RawSql<'_> {
	fn render_into(&self, builder: &mut SqlBuilder<'_>, _ctx: RenderContext) -> Result<()> {
		builder.push(self.0);
		Ok(())
	}

	fn referenced_columns(&self, _out: &mut IndexSet<TableColumn>) {}
}

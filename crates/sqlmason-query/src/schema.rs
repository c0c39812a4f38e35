//! Schema objects queries are bound to.
//!
//! - [`Database`]: owner of tables, views, relations and sequences
//! - [`Table`] and its [`TableColumn`] handles
//! - [`Index`], [`Relation`], [`View`], [`Sequence`]
//!
//! Columns are shared handles: cloning a [`TableColumn`] is cheap and every
//! clone compares equal to the original.

use std::sync::Arc;

mod column;
mod database;
mod ident;
mod relation;
mod sequence;
mod table;
mod view;

pub use column::{ColumnDef, ColumnSpec, Options, TableColumn};
pub use database::{Database, DatabaseId};
pub use ident::{SourceKind, TableIdent};
pub use relation::{ColumnReference, DeleteAction, Relation, ResolvedRelation};
pub use sequence::Sequence;
pub use table::{Index, Table};
pub use view::View;

/// Anything that can appear in a FROM clause.
pub trait AsSource {
	fn source(&self) -> Arc<TableIdent>;
}

impl AsSource for Arc<TableIdent> {
	fn source(&self) -> Arc<TableIdent> {
		Arc::clone(self)
	}
}

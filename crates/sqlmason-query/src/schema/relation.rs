//! Foreign key relations.

use super::{Database, Table, TableColumn};
use crate::error::Result;

/// Action taken on referencing rows when a referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeleteAction {
	/// NO ACTION - the database default, rendered as nothing
	#[default]
	NoAction,
	/// CASCADE - Delete the referencing rows
	Cascade,
	/// SET NULL - Set the foreign key column(s) to NULL
	SetNull,
}

impl DeleteAction {
	/// Returns the `ON DELETE` clause, if any.
	#[must_use]
	pub fn as_sql(&self) -> Option<&'static str> {
		match self {
			Self::NoAction => None,
			Self::Cascade => Some("ON DELETE CASCADE"),
			Self::SetNull => Some("ON DELETE SET NULL"),
		}
	}
}

/// One column pair of a relation, by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReference {
	pub source_table: String,
	pub source_column: String,
	pub target_table: String,
	pub target_column: String,
}

/// Foreign key from columns of a source table to columns of a target table.
///
/// Columns are kept by name and resolved against the owning [`Database`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
	name: String,
	references: Vec<ColumnReference>,
	on_delete: DeleteAction,
}

/// A relation with its tables and columns looked up.
#[derive(Debug, Clone)]
pub struct ResolvedRelation<'a> {
	pub source: &'a Table,
	pub target: &'a Table,
	pub source_columns: Vec<TableColumn>,
	pub target_columns: Vec<TableColumn>,
}

impl Relation {
	pub(crate) fn new(name: String, references: Vec<ColumnReference>, on_delete: DeleteAction) -> Self {
		Self {
			name,
			references,
			on_delete,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn references(&self) -> &[ColumnReference] {
		&self.references
	}

	pub fn on_delete(&self) -> DeleteAction {
		self.on_delete
	}

	pub fn source_table(&self) -> &str {
		self.references
			.first()
			.map_or("", |r| r.source_table.as_str())
	}

	pub fn target_table(&self) -> &str {
		self.references
			.first()
			.map_or("", |r| r.target_table.as_str())
	}

	/// Looks up the tables and columns of this relation in `database`.
	///
	/// # Errors
	///
	/// [`QueryError::ObjectNotFound`](crate::QueryError::ObjectNotFound) if a
	/// table or column no longer exists.
	pub fn resolve<'a>(&self, database: &'a Database) -> Result<ResolvedRelation<'a>> {
		let source = database.table(self.source_table())?;
		let target = database.table(self.target_table())?;
		let mut source_columns = Vec::with_capacity(self.references.len());
		let mut target_columns = Vec::with_capacity(self.references.len());
		for reference in &self.references {
			source_columns.push(source.column(&reference.source_column)?);
			target_columns.push(target.column(&reference.target_column)?);
		}
		Ok(ResolvedRelation {
			source,
			target,
			source_columns,
			target_columns,
		})
	}
}

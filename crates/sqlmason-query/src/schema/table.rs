//! Tables and indexes.

use std::sync::Arc;

use super::{AsSource, ColumnDef, ColumnSpec, TableColumn, TableIdent};
use crate::error::{QueryError, Result};
use crate::types::{ColumnSize, DataType};

/// Index over columns of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
	name: String,
	columns: Vec<TableColumn>,
	unique: bool,
	primary: bool,
}

impl Index {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn columns(&self) -> &[TableColumn] {
		&self.columns
	}

	pub fn is_unique(&self) -> bool {
		self.unique || self.primary
	}

	pub fn is_primary(&self) -> bool {
		self.primary
	}

	pub fn contains(&self, column: &TableColumn) -> bool {
		self.columns.contains(column)
	}
}

/// A database table.
///
/// Created with [`Database::create_table`](super::Database::create_table),
/// filled with columns and registered with
/// [`Database::add_table`](super::Database::add_table).
#[derive(Debug, Clone)]
pub struct Table {
	ident: Arc<TableIdent>,
	columns: Vec<TableColumn>,
	primary_key: Option<Index>,
	indexes: Vec<Index>,
	comment: Option<String>,
}

impl Table {
	pub(crate) fn new(ident: TableIdent) -> Self {
		Self {
			ident: Arc::new(ident),
			columns: Vec::new(),
			primary_key: None,
			indexes: Vec::new(),
			comment: None,
		}
	}

	pub fn name(&self) -> &str {
		self.ident.name()
	}

	pub fn ident(&self) -> &Arc<TableIdent> {
		&self.ident
	}

	/// Adds a column with the common attributes.
	///
	/// # Errors
	///
	/// [`QueryError::DuplicateObject`] if the table already has a column of that name.
	pub fn add_column(
		&mut self,
		name: impl Into<String>,
		data_type: DataType,
		size: impl Into<ColumnSize>,
		required: bool,
	) -> Result<TableColumn> {
		self.add(
			ColumnSpec::new(name, data_type)
				.size(size)
				.required(required),
		)
	}

	/// Adds a fully specified column.
	pub fn add(&mut self, spec: ColumnSpec) -> Result<TableColumn> {
		if self.find_column(&spec.name).is_some() {
			return Err(QueryError::DuplicateObject {
				kind: "column",
				name: format!("{}.{}", self.name(), spec.name),
			});
		}
		let column = TableColumn::new(ColumnDef::from_spec(Arc::clone(&self.ident), spec));
		self.columns.push(column.clone());
		Ok(column)
	}

	/// Looks a column up by name, ignoring case.
	pub fn column(&self, name: &str) -> Result<TableColumn> {
		self.find_column(name)
			.cloned()
			.ok_or_else(|| QueryError::ObjectNotFound {
				kind: "column",
				name: format!("{}.{}", self.name(), name),
			})
	}

	fn find_column(&self, name: &str) -> Option<&TableColumn> {
		self.columns
			.iter()
			.find(|c| c.name().eq_ignore_ascii_case(name))
	}

	pub fn columns(&self) -> &[TableColumn] {
		&self.columns
	}

	/// Declares the primary key, named `{TABLE}_PK`.
	pub fn set_primary_key(&mut self, columns: &[&TableColumn]) -> Result<()> {
		let columns = self.own_columns(columns)?;
		self.primary_key = Some(Index {
			name: format!("{}_PK", self.name()),
			columns,
			unique: true,
			primary: true,
		});
		Ok(())
	}

	pub fn primary_key(&self) -> Option<&Index> {
		self.primary_key.as_ref()
	}

	/// Adds a secondary index.
	pub fn add_index(
		&mut self,
		name: impl Into<String>,
		unique: bool,
		columns: &[&TableColumn],
	) -> Result<&Index> {
		let name = name.into();
		let duplicate = self
			.indexes
			.iter()
			.chain(self.primary_key.as_ref())
			.any(|i| i.name.eq_ignore_ascii_case(&name));
		if duplicate {
			return Err(QueryError::DuplicateObject { kind: "index", name });
		}
		let columns = self.own_columns(columns)?;
		self.indexes.push(Index {
			name,
			columns,
			unique,
			primary: false,
		});
		let last = self.indexes.len() - 1;
		Ok(&self.indexes[last])
	}

	/// Secondary indexes, without the primary key.
	pub fn indexes(&self) -> &[Index] {
		&self.indexes
	}

	pub fn set_comment(&mut self, comment: impl Into<String>) {
		self.comment = Some(comment.into());
	}

	pub fn comment(&self) -> Option<&str> {
		self.comment.as_deref()
	}

	/// Returns a copy of this table referenced under `alias`.
	///
	/// Columns of the copy are distinct from the original's, which allows a
	/// table to be joined with itself.
	pub fn aliased(&self, alias: impl Into<String>) -> Table {
		let ident = Arc::new(self.ident.with_alias(alias));
		let columns: Vec<TableColumn> = self
			.columns
			.iter()
			.map(|c| c.rebind(Arc::clone(&ident)))
			.collect();
		let remap = |index: &Index| Index {
			columns: index
				.columns
				.iter()
				.filter_map(|c| columns.iter().find(|n| n.name() == c.name()).cloned())
				.collect(),
			..index.clone()
		};
		Table {
			primary_key: self.primary_key.as_ref().map(remap),
			indexes: self.indexes.iter().map(remap).collect(),
			ident,
			columns,
			comment: self.comment.clone(),
		}
	}

	fn own_columns(&self, columns: &[&TableColumn]) -> Result<Vec<TableColumn>> {
		if columns.is_empty() {
			return Err(QueryError::invalid_command(format!(
				"an index of table `{}` needs at least one column",
				self.name()
			)));
		}
		columns
			.iter()
			.map(|c| {
				if c.belongs_to(&self.ident) {
					Ok((*c).clone())
				} else {
					Err(QueryError::invalid_command(format!(
						"column `{c}` does not belong to table `{}`",
						self.name()
					)))
				}
			})
			.collect()
	}
}

impl AsSource for Table {
	fn source(&self) -> Arc<TableIdent> {
		Arc::clone(&self.ident)
	}
}

//! Databases.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{
	ColumnReference, DeleteAction, Relation, Sequence, SourceKind, Table, TableColumn, TableIdent,
	View,
};
use crate::command::Command;
use crate::error::{QueryError, Result};
use crate::types::DataType;

static NEXT_DATABASE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseId(u64);

impl DatabaseId {
	fn next() -> Self {
		Self(NEXT_DATABASE_ID.fetch_add(1, Ordering::Relaxed))
	}
}

impl fmt::Display for DatabaseId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Owner of the schema objects a [`Command`] can reference.
///
/// Object names are unique per kind, compared case-insensitively; tables
/// and views share one namespace.
#[derive(Debug, Clone)]
pub struct Database {
	id: DatabaseId,
	name: Arc<str>,
	schema: Option<Arc<str>>,
	tables: Vec<Table>,
	views: Vec<View>,
	relations: Vec<Relation>,
	sequences: Vec<Sequence>,
}

impl Database {
	pub fn new(name: impl AsRef<str>) -> Self {
		Self {
			id: DatabaseId::next(),
			name: Arc::from(name.as_ref()),
			schema: None,
			tables: Vec::new(),
			views: Vec::new(),
			relations: Vec::new(),
			sequences: Vec::new(),
		}
	}

	/// Database whose objects live in `schema`.
	pub fn with_schema(name: impl AsRef<str>, schema: impl AsRef<str>) -> Self {
		Self {
			schema: Some(Arc::from(schema.as_ref())),
			..Self::new(name)
		}
	}

	pub fn id(&self) -> DatabaseId {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn schema(&self) -> Option<&str> {
		self.schema.as_deref()
	}

	/// Creates a command bound to this database.
	pub fn command(&self) -> Command {
		Command::new(self.id, Arc::clone(&self.name))
	}

	pub(crate) fn ident(&self, name: impl Into<String>, kind: SourceKind) -> TableIdent {
		TableIdent::new(
			self.id,
			Arc::clone(&self.name),
			self.schema.clone(),
			name,
			kind,
		)
	}

	/// Creates an empty table owned by this database.
	///
	/// The table becomes part of the database with [`add_table`](Self::add_table).
	pub fn create_table(&self, name: impl Into<String>) -> Table {
		Table::new(self.ident(name, SourceKind::Table))
	}

	/// Registers a table created by [`create_table`](Self::create_table).
	pub fn add_table(&mut self, table: Table) -> Result<()> {
		if table.ident().database() != self.id {
			return Err(QueryError::invalid_command(format!(
				"table `{}` was created for another database",
				table.name()
			)));
		}
		if table.ident().alias().is_some() {
			return Err(QueryError::invalid_command(format!(
				"aliased table `{}` cannot be registered",
				table.name()
			)));
		}
		self.ensure_source_name_free(table.name())?;
		self.tables.push(table);
		Ok(())
	}

	pub fn table(&self, name: &str) -> Result<&Table> {
		self.tables
			.iter()
			.find(|t| t.name().eq_ignore_ascii_case(name))
			.ok_or_else(|| QueryError::ObjectNotFound {
				kind: "table",
				name: name.to_string(),
			})
	}

	pub fn tables(&self) -> &[Table] {
		&self.tables
	}

	/// Registers a view defined by `command`.
	///
	/// The view's columns are derived from the command's select list.
	pub fn add_view(&mut self, name: impl Into<String>, command: Command) -> Result<View> {
		let name = name.into();
		if command.database() != self.id {
			return Err(QueryError::invalid_command(format!(
				"view `{name}` is defined by a command of another database"
			)));
		}
		self.ensure_source_name_free(&name)?;
		let ident = Arc::new(self.ident(name, SourceKind::View));
		let view = View::new(ident, command)?;
		self.views.push(view.clone());
		Ok(view)
	}

	pub fn view(&self, name: &str) -> Result<&View> {
		self.views
			.iter()
			.find(|v| v.name().eq_ignore_ascii_case(name))
			.ok_or_else(|| QueryError::ObjectNotFound {
				kind: "view",
				name: name.to_string(),
			})
	}

	pub fn views(&self) -> &[View] {
		&self.views
	}

	/// Adds a foreign key relation from the source columns to the target columns.
	pub fn add_relation(
		&mut self,
		name: impl Into<String>,
		pairs: &[(&TableColumn, &TableColumn)],
	) -> Result<&Relation> {
		self.add_relation_with_action(name, pairs, DeleteAction::default())
	}

	/// Adds a foreign key relation with an explicit ON DELETE action.
	///
	/// # Errors
	///
	/// - [`QueryError::InvalidCommand`] if `pairs` is empty or spans more than
	///   one source or target table
	/// - [`QueryError::ObjectNotFound`] if either table is not registered
	/// - [`QueryError::DuplicateObject`] if the name is taken
	pub fn add_relation_with_action(
		&mut self,
		name: impl Into<String>,
		pairs: &[(&TableColumn, &TableColumn)],
		on_delete: DeleteAction,
	) -> Result<&Relation> {
		let name = name.into();
		let Some(((first_source, first_target), rest)) = pairs.split_first() else {
			return Err(QueryError::invalid_command(format!(
				"relation `{name}` has no columns"
			)));
		};
		let mixed = rest.iter().any(|(s, t)| {
			**s.table() != **first_source.table() || **t.table() != **first_target.table()
		});
		if mixed {
			return Err(QueryError::invalid_command(format!(
				"relation `{name}` must connect exactly one source and one target table"
			)));
		}
		self.table(first_source.table().name())?;
		self.table(first_target.table().name())?;
		if self
			.relations
			.iter()
			.any(|r| r.name().eq_ignore_ascii_case(&name))
		{
			return Err(QueryError::DuplicateObject {
				kind: "relation",
				name,
			});
		}

		let references = pairs
			.iter()
			.map(|(source, target)| ColumnReference {
				source_table: source.table().name().to_string(),
				source_column: source.name().to_string(),
				target_table: target.table().name().to_string(),
				target_column: target.name().to_string(),
			})
			.collect();
		self.relations
			.push(Relation::new(name, references, on_delete));
		let last = self.relations.len() - 1;
		Ok(&self.relations[last])
	}

	pub fn relation(&self, name: &str) -> Result<&Relation> {
		self.relations
			.iter()
			.find(|r| r.name().eq_ignore_ascii_case(name))
			.ok_or_else(|| QueryError::ObjectNotFound {
				kind: "relation",
				name: name.to_string(),
			})
	}

	pub fn relations(&self) -> &[Relation] {
		&self.relations
	}

	pub fn add_sequence(
		&mut self,
		name: impl Into<String>,
		start: i64,
		increment: i64,
	) -> Result<&Sequence> {
		let name = name.into();
		if self
			.sequences
			.iter()
			.any(|s| s.name().eq_ignore_ascii_case(&name))
		{
			return Err(QueryError::DuplicateObject {
				kind: "sequence",
				name,
			});
		}
		if increment == 0 {
			return Err(QueryError::invalid_command(format!(
				"sequence `{name}` must have a non-zero increment"
			)));
		}
		self.sequences.push(Sequence::new(name, start, increment));
		let last = self.sequences.len() - 1;
		Ok(&self.sequences[last])
	}

	pub fn sequence(&self, name: &str) -> Result<&Sequence> {
		self.sequences
			.iter()
			.find(|s| s.name().eq_ignore_ascii_case(name))
			.ok_or_else(|| QueryError::ObjectNotFound {
				kind: "sequence",
				name: name.to_string(),
			})
	}

	pub fn sequences(&self) -> &[Sequence] {
		&self.sequences
	}

	/// Declared sequences followed by the implicit ones feeding
	/// auto-increment columns, without duplicates.
	pub fn all_sequences(&self) -> Vec<Sequence> {
		let mut all = self.sequences.clone();
		let implicit = self
			.tables
			.iter()
			.flat_map(|t| t.columns())
			.filter(|c| c.data_type() == DataType::AutoInc)
			.map(|c| Sequence::new(c.sequence_name(), 1, 1));
		for seq in implicit {
			if !all.iter().any(|s| s.name().eq_ignore_ascii_case(seq.name())) {
				all.push(seq);
			}
		}
		all
	}

	fn ensure_source_name_free(&self, name: &str) -> Result<()> {
		if self.table(name).is_ok() || self.view(name).is_ok() {
			return Err(QueryError::DuplicateObject {
				kind: "table or view",
				name: name.to_string(),
			});
		}
		Ok(())
	}
}

//! Identity of a row source: table, view or derived table.

use std::hash::{Hash, Hasher};
use std::mem::discriminant;
use std::sync::Arc;

use super::DatabaseId;
use crate::command::Command;
use crate::dialect::DialectHandler;

/// What a [`TableIdent`] refers to.
#[derive(Debug, Clone)]
pub enum SourceKind {
	Table,
	View,
	/// A sub-select used as a table
	Derived(Box<Command>),
}

/// Identity of a row source.
///
/// Two idents are equal when they name the same object of the same
/// database under the same alias.
#[derive(Debug)]
pub struct TableIdent {
	database: DatabaseId,
	database_name: Arc<str>,
	schema: Option<Arc<str>>,
	name: String,
	alias: Option<String>,
	kind: SourceKind,
}

impl TableIdent {
	pub(crate) fn new(
		database: DatabaseId,
		database_name: Arc<str>,
		schema: Option<Arc<str>>,
		name: impl Into<String>,
		kind: SourceKind,
	) -> Self {
		Self {
			database,
			database_name,
			schema,
			name: name.into(),
			alias: None,
			kind,
		}
	}

	pub(crate) fn with_alias(&self, alias: impl Into<String>) -> Self {
		Self {
			database: self.database,
			database_name: Arc::clone(&self.database_name),
			schema: self.schema.clone(),
			name: self.name.clone(),
			alias: Some(alias.into()),
			kind: self.kind.clone(),
		}
	}

	pub fn database(&self) -> DatabaseId {
		self.database
	}

	pub fn database_name(&self) -> &str {
		&self.database_name
	}

	pub fn schema(&self) -> Option<&str> {
		self.schema.as_deref()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn alias(&self) -> Option<&str> {
		self.alias.as_deref()
	}

	/// Name column references are qualified with: the alias if set, else the name.
	pub fn reference_name(&self) -> &str {
		self.alias.as_deref().unwrap_or(&self.name)
	}

	pub fn kind(&self) -> &SourceKind {
		&self.kind
	}

	/// Returns the defining command of a derived table.
	pub fn derived_command(&self) -> Option<&Command> {
		match &self.kind {
			SourceKind::Derived(cmd) => Some(cmd),
			_ => None,
		}
	}

	/// Quoted, schema-qualified name as used in FROM and DDL.
	///
	/// The schema of the database wins over the `schema_name` setting; the
	/// schema is dropped for dialects without schema support.
	pub fn qualified_name(&self, dialect: &dyn DialectHandler) -> String {
		dialect.qualify_identifier(self.schema.as_deref(), &self.name)
	}
}

impl PartialEq for TableIdent {
	fn eq(&self, other: &Self) -> bool {
		self.database == other.database
			&& self.name == other.name
			&& self.alias == other.alias
			&& discriminant(&self.kind) == discriminant(&other.kind)
	}
}

impl Eq for TableIdent {}

impl Hash for TableIdent {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.database.hash(state);
		self.name.hash(state);
		self.alias.hash(state);
		discriminant(&self.kind).hash(state);
	}
}

//! DDL generation.
//!
//! [`DdlGenerator::generate`] dispatches on the pair of [`SchemaObject`]
//! kind and [`DdlAction`]; each object kind lives in its own module:
//!
//! - `database`: whole-database scripts in dependency order
//! - `table`: CREATE TABLE with inline primary key
//! - `column`: column definitions, ADD/ALTER/DROP COLUMN
//! - `index`: secondary indexes and primary key constraints
//! - `relation`: foreign keys
//! - `view`: view definitions rendered through the SQL builder
//! - `sequence`: native sequences and the sequence table emulation

use std::fmt;

use sqlmason_query::{
	Database, DialectHandler, Feature, IdentityStyle, Index, Relation, Sequence, SqlWriter,
	Table, TableColumn, View,
};
use tracing::debug;

use crate::error::{DdlError, Result};
use crate::script::DdlScript;

mod column;
mod database;
mod index;
mod relation;
mod sequence;
mod table;
mod view;

/// What to do with a schema object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdlAction {
	Create,
	Alter,
	Drop,
}

impl DdlAction {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Create => "CREATE",
			Self::Alter => "ALTER",
			Self::Drop => "DROP",
		}
	}
}

impl fmt::Display for DdlAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A schema object DDL can be generated for.
///
/// Indexes and relations carry the object they are resolved against.
#[derive(Debug, Clone, Copy)]
pub enum SchemaObject<'a> {
	Database(&'a Database),
	Table(&'a Table),
	Column(&'a TableColumn),
	Index { table: &'a Table, index: &'a Index },
	Relation {
		database: &'a Database,
		relation: &'a Relation,
	},
	View(&'a View),
	Sequence(&'a Sequence),
}

impl SchemaObject<'_> {
	#[must_use]
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Database(_) => "database",
			Self::Table(_) => "table",
			Self::Column(_) => "column",
			Self::Index { .. } => "index",
			Self::Relation { .. } => "relation",
			Self::View(_) => "view",
			Self::Sequence(_) => "sequence",
		}
	}
}

/// Generates DDL scripts for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct DdlGenerator<'d> {
	dialect: &'d dyn DialectHandler,
}

impl<'d> DdlGenerator<'d> {
	pub fn new(dialect: &'d dyn DialectHandler) -> Self {
		Self { dialect }
	}

	pub fn dialect(&self) -> &'d dyn DialectHandler {
		self.dialect
	}

	/// Generates the statements performing `action` on `object`.
	///
	/// # Errors
	///
	/// - [`DdlError::UnsupportedAction`] when the action has no meaning for
	///   the object or the dialect lacks the capability
	/// - [`DdlError::Query`] for missing phrases or type mappings and for
	///   view queries that fail to render
	pub fn generate(&self, object: SchemaObject<'_>, action: DdlAction) -> Result<DdlScript> {
		let mut script = DdlScript::new();
		match (object, action) {
			(SchemaObject::Database(db), DdlAction::Create) => {
				self.create_database(db, &mut script)?;
			}
			(SchemaObject::Database(db), DdlAction::Drop) => self.drop_database(db, &mut script)?,
			(SchemaObject::Table(table), DdlAction::Create) => {
				self.create_table_script(table, &mut script)?;
			}
			(SchemaObject::Table(table), DdlAction::Drop) => {
				self.drop_table_script(table, &mut script)?;
			}
			(SchemaObject::Database(_) | SchemaObject::Table(_), DdlAction::Alter) => {
				return Err(DdlError::unsupported(action, object.kind()));
			}
			(SchemaObject::Column(column), DdlAction::Create) => {
				self.add_column(column, &mut script)?;
			}
			(SchemaObject::Column(column), DdlAction::Alter) => {
				self.alter_column(column, &mut script)?;
			}
			(SchemaObject::Column(column), DdlAction::Drop) => {
				self.drop_column(column, &mut script);
			}
			(SchemaObject::Index { table, index }, DdlAction::Create) => {
				self.create_index(table, index, &mut script)?;
			}
			(SchemaObject::Index { table, index }, DdlAction::Alter) => {
				self.drop_index(table, index, &mut script)?;
				self.create_index(table, index, &mut script)?;
			}
			(SchemaObject::Index { table, index }, DdlAction::Drop) => {
				self.drop_index(table, index, &mut script)?;
			}
			(SchemaObject::Relation { database, relation }, DdlAction::Create) => {
				self.create_relation(database, relation, &mut script)?;
			}
			(SchemaObject::Relation { database, relation }, DdlAction::Alter) => {
				self.drop_relation(database, relation, &mut script)?;
				self.create_relation(database, relation, &mut script)?;
			}
			(SchemaObject::Relation { database, relation }, DdlAction::Drop) => {
				self.drop_relation(database, relation, &mut script)?;
			}
			(SchemaObject::View(view), DdlAction::Create) => {
				self.create_view(view, false, &mut script)?;
			}
			(SchemaObject::View(view), DdlAction::Alter) => self.alter_view(view, &mut script)?,
			(SchemaObject::View(view), DdlAction::Drop) => self.drop_view(view, &mut script),
			(SchemaObject::Sequence(seq), DdlAction::Create) => {
				self.create_sequence(None, seq, &mut script)?;
			}
			(SchemaObject::Sequence(seq), DdlAction::Alter) => {
				self.alter_sequence(None, seq, &mut script)?;
			}
			(SchemaObject::Sequence(seq), DdlAction::Drop) => {
				self.drop_sequence(None, seq, &mut script)?;
			}
		}

		debug!(
			dialect = %self.dialect.kind(),
			object = object.kind(),
			action = action.as_str(),
			statements = script.len(),
			"Generated DDL script"
		);
		Ok(script)
	}

	fn quote(&self, name: &str) -> String {
		self.dialect.quote_identifier(name)
	}

	/// Quoted name, prefixed with `schema` or the configured schema where
	/// the dialect supports schemas.
	fn qualify(&self, schema: Option<&str>, name: &str) -> String {
		self.dialect.qualify_identifier(schema, name)
	}

	fn identity_style(&self) -> IdentityStyle {
		self.dialect.config().identity_style()
	}

	/// Comma separated, quoted column names.
	fn column_list(&self, columns: &[TableColumn]) -> Result<String> {
		let mut writer = SqlWriter::new();
		writer.push_list(columns, ", ", |w, column| {
			w.push_identifier(column.name(), |s| self.quote(s));
			Ok(())
		})?;
		Ok(writer.finish().0)
	}

	fn require(&self, feature: Feature, action: DdlAction, object: &'static str) -> Result<()> {
		if self.dialect.supports(feature) {
			Ok(())
		} else {
			Err(DdlError::unsupported(action, object))
		}
	}
}

/// Generates the DDL script for `object` with a one-off generator.
///
/// # Errors
///
/// See [`DdlGenerator::generate`].
pub fn render_ddl(
	object: SchemaObject<'_>,
	action: DdlAction,
	dialect: &dyn DialectHandler,
) -> Result<DdlScript> {
	DdlGenerator::new(dialect).generate(object, action)
}

//! Foreign key relations.

use sqlmason_query::{Database, Feature, Phrase, Relation};

use super::{DdlAction, DdlGenerator};
use crate::error::Result;
use crate::script::DdlScript;

impl DdlGenerator<'_> {
	/// `CONSTRAINT FK FOREIGN KEY (..) REFERENCES T (..)[ ON DELETE ..]`
	pub(crate) fn foreign_key_clause(&self, database: &Database, relation: &Relation) -> Result<String> {
		let resolved = relation.resolve(database)?;
		let mut clause = format!(
			"CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
			self.quote(relation.name()),
			self.column_list(&resolved.source_columns)?,
			resolved.target.ident().qualified_name(self.dialect),
			self.column_list(&resolved.target_columns)?,
		);
		if let Some(on_delete) = relation.on_delete().as_sql() {
			clause.push(' ');
			clause.push_str(on_delete);
		}
		Ok(clause)
	}

	pub(crate) fn create_relation(
		&self,
		database: &Database,
		relation: &Relation,
		script: &mut DdlScript,
	) -> Result<()> {
		self.require(Feature::AlterTableConstraints, DdlAction::Create, "relation")?;
		let source = database.table(relation.source_table())?;
		script.push(format!(
			"ALTER TABLE {} ADD {}",
			source.ident().qualified_name(self.dialect),
			self.foreign_key_clause(database, relation)?
		));
		Ok(())
	}

	pub(crate) fn drop_relation(
		&self,
		database: &Database,
		relation: &Relation,
		script: &mut DdlScript,
	) -> Result<()> {
		self.require(Feature::AlterTableConstraints, DdlAction::Drop, "relation")?;
		let source = database.table(relation.source_table())?;
		let table_name = source.ident().qualified_name(self.dialect);
		let name = self.quote(relation.name());
		script.push(self.dialect.fill_phrase(
			Phrase::DdlDropForeignKey,
			None,
			&[&table_name, &name],
		)?);
		Ok(())
	}
}

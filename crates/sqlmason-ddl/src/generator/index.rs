//! Secondary indexes and primary key constraints.

use sqlmason_query::{Feature, Index, Phrase, Table};

use super::{DdlAction, DdlGenerator};
use crate::error::Result;
use crate::script::DdlScript;

impl DdlGenerator<'_> {
	/// `CREATE [UNIQUE] INDEX`, or `ADD CONSTRAINT .. PRIMARY KEY` for the
	/// primary key of an existing table.
	pub(crate) fn create_index(&self, table: &Table, index: &Index, script: &mut DdlScript) -> Result<()> {
		let table_name = table.ident().qualified_name(self.dialect);
		let columns = self.column_list(index.columns())?;
		if index.is_primary() {
			self.require(Feature::AlterTableConstraints, DdlAction::Create, "primary key")?;
			script.push(format!(
				"ALTER TABLE {table_name} ADD CONSTRAINT {} PRIMARY KEY ({columns})",
				self.quote(index.name())
			));
			return Ok(());
		}
		let unique = if index.is_unique() { "UNIQUE " } else { "" };
		script.push(format!(
			"CREATE {unique}INDEX {} ON {table_name} ({columns})",
			self.quote(index.name())
		));
		Ok(())
	}

	pub(crate) fn drop_index(&self, table: &Table, index: &Index, script: &mut DdlScript) -> Result<()> {
		let table_name = table.ident().qualified_name(self.dialect);
		if index.is_primary() {
			self.require(Feature::AlterTableConstraints, DdlAction::Drop, "primary key")?;
			let name = self.quote(index.name());
			script.push(self.dialect.fill_phrase(
				Phrase::DdlDropPrimaryKey,
				None,
				&[&table_name, &name],
			)?);
			return Ok(());
		}
		// indexes dropped without their table are addressed by schema
		let name = if self.dialect.supports(Feature::DropIndexOnTable) {
			self.quote(index.name())
		} else {
			self.qualify(table.ident().schema(), index.name())
		};
		script.push(
			self.dialect
				.fill_phrase(Phrase::DdlDropIndex, None, &[&name, &table_name])?,
		);
		Ok(())
	}
}

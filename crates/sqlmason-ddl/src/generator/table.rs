//! CREATE TABLE and DROP TABLE.

use sqlmason_query::{IdentityStyle, Index, SqlWriter, Table};

use super::DdlGenerator;
use crate::error::Result;
use crate::script::DdlScript;

impl DdlGenerator<'_> {
	/// `CREATE TABLE T (columns[, primary key][, foreign keys])`.
	///
	/// `foreign_keys` are complete constraint clauses for dialects that
	/// cannot add constraints later.
	pub(crate) fn create_table(
		&self,
		table: &Table,
		foreign_keys: &[String],
		script: &mut DdlScript,
	) -> Result<()> {
		let primary_key = table.primary_key();
		let inline_key = self.identity_style() == IdentityStyle::PrimaryKeyAutoIncrement
			&& matches!(
				primary_key.map(Index::columns),
				Some([column]) if column.is_auto_generated()
			);

		let mut parts = Vec::with_capacity(table.columns().len() + foreign_keys.len() + 1);
		for column in table.columns() {
			let key_column = inline_key && primary_key.is_some_and(|pk| pk.contains(column));
			parts.push(self.column_definition(column, key_column)?);
		}
		if let Some(pk) = primary_key.filter(|_| !inline_key) {
			parts.push(format!(
				"CONSTRAINT {} PRIMARY KEY ({})",
				self.quote(pk.name()),
				self.column_list(pk.columns())?
			));
		}
		parts.extend(foreign_keys.iter().cloned());

		let mut writer = SqlWriter::new();
		writer.push("CREATE TABLE ");
		writer.push(&table.ident().qualified_name(self.dialect));
		writer.push(" (");
		writer.push_list(&parts, ", ", |w, part| {
			w.push(part);
			Ok(())
		})?;
		writer.push(")");
		script.push(writer.finish().0);
		Ok(())
	}

	/// Sequences of the auto-increment columns, the table, then its
	/// secondary indexes.
	///
	/// With the sequence table emulation the sequence table itself must
	/// already exist.
	pub(crate) fn create_table_script(&self, table: &Table, script: &mut DdlScript) -> Result<()> {
		let schema = table.ident().schema();
		for seq in self.column_sequences(table.columns()) {
			self.create_sequence(schema, &seq, script)?;
		}
		self.create_table(table, &[], script)?;
		for index in table.indexes() {
			self.create_index(table, index, script)?;
		}
		Ok(())
	}

	pub(crate) fn drop_table(&self, table: &Table, script: &mut DdlScript) {
		script.push(format!(
			"DROP TABLE {}",
			table.ident().qualified_name(self.dialect)
		));
	}

	/// The table, then the sequences of its auto-increment columns.
	pub(crate) fn drop_table_script(&self, table: &Table, script: &mut DdlScript) -> Result<()> {
		self.drop_table(table, script);
		let schema = table.ident().schema();
		for seq in self.column_sequences(table.columns()) {
			self.drop_sequence(schema, &seq, script)?;
		}
		Ok(())
	}
}

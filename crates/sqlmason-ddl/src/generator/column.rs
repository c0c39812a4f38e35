//! Column definitions and column level ALTER TABLE statements.

use sqlmason_query::{
	DataType, Feature, IdentityStyle, Phrase, SqlWriter, TableColumn,
	format_literal,
};

use super::{DdlAction, DdlGenerator};
use crate::error::Result;
use crate::script::DdlScript;

impl DdlGenerator<'_> {
	/// `NAME TYPE [DEFAULT v] [NOT NULL]`.
	///
	/// Auto-increment columns get the identity clause of the dialect instead
	/// of a default. `inline_key` marks the single column primary key of a
	/// dialect that declares auto-increment keys inline.
	pub(crate) fn column_definition(&self, column: &TableColumn, inline_key: bool) -> Result<String> {
		let mut writer = SqlWriter::new();
		writer.push_identifier(column.name(), |s| self.quote(s));

		if column.is_auto_generated() {
			let style = self.identity_style();
			let data_type = match style {
				IdentityStyle::SequenceTable => DataType::Integer,
				_ => DataType::AutoInc,
			};
			writer.push_keyword(&self.dialect.native_type(data_type, column.size())?);
			match style {
				IdentityStyle::Identity => {
					writer.push_keyword(self.dialect.phrase(Phrase::DdlIdentity)?);
					writer.push_keyword("NOT NULL");
				}
				IdentityStyle::AutoIncrement => {
					writer.push_keyword("NOT NULL");
					writer.push_keyword(self.dialect.phrase(Phrase::DdlIdentity)?);
				}
				IdentityStyle::PrimaryKeyAutoIncrement if inline_key => {
					writer.push_keyword(self.dialect.phrase(Phrase::DdlIdentity)?);
				}
				_ => writer.push_keyword("NOT NULL"),
			}
			return Ok(writer.finish().0);
		}

		writer.push_keyword(&self.dialect.native_type(column.data_type(), column.size())?);
		if let Some(default) = column.default_value() {
			writer.push_keyword("DEFAULT");
			writer.push_keyword(&format_literal(default, column.data_type(), self.dialect)?);
		}
		if column.is_required() {
			writer.push_keyword("NOT NULL");
		}
		Ok(writer.finish().0)
	}

	/// Adds `column` to its table, creating its sequence first where keys
	/// come from sequences.
	pub(crate) fn add_column(&self, column: &TableColumn, script: &mut DdlScript) -> Result<()> {
		let schema = column.table().schema();
		for seq in self.column_sequences(std::slice::from_ref(column)) {
			self.create_sequence(schema, &seq, script)?;
		}
		let table = column.table().qualified_name(self.dialect);
		let definition = self.column_definition(column, false)?;
		script.push(
			self.dialect
				.fill_phrase(Phrase::DdlAddColumn, None, &[&table, &definition])?,
		);
		Ok(())
	}

	/// Changes type and nullability of `column` to its current definition.
	pub(crate) fn alter_column(&self, column: &TableColumn, script: &mut DdlScript) -> Result<()> {
		self.require(Feature::AlterColumn, DdlAction::Alter, "column")?;
		let table = column.table().qualified_name(self.dialect);
		let name = self.quote(column.name());
		// serial pseudo types cannot be altered to
		let data_type = match column.data_type() {
			DataType::AutoInc => DataType::Integer,
			other => other,
		};
		let native = self.dialect.native_type(data_type, column.size())?;

		if self.dialect.supports(Feature::SeparateNullability) {
			script.push(self.alter_phrase(Phrase::DdlAlterColumn, &[&table, &name, &native])?);
			let nullability = if column.is_required() {
				Phrase::DdlSetNotNull
			} else {
				Phrase::DdlDropNotNull
			};
			script.push(self.alter_phrase(nullability, &[&table, &name])?);
		} else {
			let nullability = if column.is_required() { "NOT NULL" } else { "NULL" };
			let definition = format!("{native} {nullability}");
			script.push(self.alter_phrase(Phrase::DdlAlterColumn, &[&table, &name, &definition])?);
		}
		Ok(())
	}

	pub(crate) fn drop_column(&self, column: &TableColumn, script: &mut DdlScript) {
		script.push(format!(
			"ALTER TABLE {} DROP COLUMN {}",
			column.table().qualified_name(self.dialect),
			self.quote(column.name())
		));
	}

	fn alter_phrase(&self, phrase: Phrase, args: &[&str]) -> Result<String> {
		Ok(self.dialect.fill_phrase(phrase, None, args)?)
	}
}

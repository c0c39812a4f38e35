//! Sequences, native or emulated by a sequence table.
//!
//! The sequence table holds one row per sequence with the last issued
//! value and the increment. Rows start one increment below the sequence
//! start so the first value issued by `next_sequence_value` is the start
//! value.

use sqlmason_query::dialect::{
	SEQUENCE_INCREMENT_COLUMN, SEQUENCE_NAME_COLUMN, SEQUENCE_VALUE_COLUMN,
};
use sqlmason_query::value::quote_text;
use sqlmason_query::{
	ColumnSize, DataType, Feature, IdentityStyle, Phrase, QueryError, Sequence, TableColumn,
};

use super::DdlGenerator;
use crate::error::Result;
use crate::script::DdlScript;

/// Width of the sequence name column.
const SEQUENCE_NAME_SIZE: i32 = 80;

impl DdlGenerator<'_> {
	/// Whether sequences live in the sequence table rather than natively.
	pub(crate) fn emulates_sequences(&self) -> bool {
		self.dialect.config().emulates_sequences()
	}

	/// Sequences feeding the auto-increment columns among `columns`.
	///
	/// Empty unless the dialect generates keys from sequences.
	pub(crate) fn column_sequences(&self, columns: &[TableColumn]) -> Vec<Sequence> {
		if !matches!(
			self.identity_style(),
			IdentityStyle::Sequence | IdentityStyle::SequenceTable
		) {
			return Vec::new();
		}
		columns
			.iter()
			.filter(|c| c.is_auto_generated())
			.map(|c| Sequence::new(c.sequence_name(), 1, 1))
			.collect()
	}

	pub(crate) fn create_sequence(
		&self,
		schema: Option<&str>,
		seq: &Sequence,
		script: &mut DdlScript,
	) -> Result<()> {
		if self.emulates_sequences() {
			script.push(format!(
				"INSERT INTO {} ({}, {}, {}) VALUES ({}, {}, {})",
				self.sequence_table(),
				self.quote(SEQUENCE_NAME_COLUMN),
				self.quote(SEQUENCE_VALUE_COLUMN),
				self.quote(SEQUENCE_INCREMENT_COLUMN),
				quote_text(seq.name(), self.dialect),
				seq.start() - seq.increment(),
				seq.increment()
			));
			return Ok(());
		}
		self.require_native_sequences()?;
		let name = self.qualify(schema, seq.name());
		script.push(self.dialect.fill_phrase(
			Phrase::DdlCreateSequence,
			None,
			&[&name, &seq.start().to_string(), &seq.increment().to_string()],
		)?);
		Ok(())
	}

	/// Restarts `seq` at its start value.
	pub(crate) fn alter_sequence(
		&self,
		schema: Option<&str>,
		seq: &Sequence,
		script: &mut DdlScript,
	) -> Result<()> {
		if self.emulates_sequences() {
			script.push(format!(
				"UPDATE {} SET {} = {}, {} = {} WHERE {} = {}",
				self.sequence_table(),
				self.quote(SEQUENCE_VALUE_COLUMN),
				seq.start() - seq.increment(),
				self.quote(SEQUENCE_INCREMENT_COLUMN),
				seq.increment(),
				self.quote(SEQUENCE_NAME_COLUMN),
				quote_text(seq.name(), self.dialect)
			));
			return Ok(());
		}
		self.require_native_sequences()?;
		let name = self.qualify(schema, seq.name());
		script.push(self.dialect.fill_phrase(
			Phrase::DdlRestartSequence,
			None,
			&[&name, &seq.start().to_string()],
		)?);
		Ok(())
	}

	pub(crate) fn drop_sequence(
		&self,
		schema: Option<&str>,
		seq: &Sequence,
		script: &mut DdlScript,
	) -> Result<()> {
		if self.emulates_sequences() {
			script.push(format!(
				"DELETE FROM {} WHERE {} = {}",
				self.sequence_table(),
				self.quote(SEQUENCE_NAME_COLUMN),
				quote_text(seq.name(), self.dialect)
			));
			return Ok(());
		}
		self.require_native_sequences()?;
		script.push(format!("DROP SEQUENCE {}", self.qualify(schema, seq.name())));
		Ok(())
	}

	pub(crate) fn create_sequence_table(&self, script: &mut DdlScript) -> Result<()> {
		let name_type = self
			.dialect
			.native_type(DataType::Text, ColumnSize::from(SEQUENCE_NAME_SIZE))?;
		let value_type = self.dialect.native_type(DataType::Integer, ColumnSize::from(8))?;
		let table_name = &self.dialect.settings().sequence_table_name;
		script.push(format!(
			"CREATE TABLE {} ({} {name_type} NOT NULL, {} {value_type} NOT NULL, {} {value_type} NOT NULL, CONSTRAINT {} PRIMARY KEY ({}))",
			self.sequence_table(),
			self.quote(SEQUENCE_NAME_COLUMN),
			self.quote(SEQUENCE_VALUE_COLUMN),
			self.quote(SEQUENCE_INCREMENT_COLUMN),
			self.quote(&format!("{table_name}_PK")),
			self.quote(SEQUENCE_NAME_COLUMN),
		));
		Ok(())
	}

	pub(crate) fn drop_sequence_table(&self, script: &mut DdlScript) {
		script.push(format!("DROP TABLE {}", self.sequence_table()));
	}

	/// Quoted name of the sequence table, as `next_sequence_value` addresses it.
	fn sequence_table(&self) -> String {
		self.quote(&self.dialect.settings().sequence_table_name)
	}

	/// Fails the same way `next_sequence_value` does when the dialect has
	/// no native sequences and the emulation is off.
	fn require_native_sequences(&self) -> Result<()> {
		if self.dialect.supports(Feature::Sequences) {
			return Ok(());
		}
		Err(QueryError::UnsupportedFeature {
			dialect: self.dialect.kind(),
			feature: Feature::Sequences,
		}
		.into())
	}
}

//! Whole-database scripts.

use sqlmason_query::{Database, Feature, IdentityStyle, Sequence};

use super::DdlGenerator;
use crate::error::Result;
use crate::script::DdlScript;

impl DdlGenerator<'_> {
	pub(crate) fn create_database(&self, db: &Database, script: &mut DdlScript) -> Result<()> {
		let schema = db.schema();
		if let Some(schema) = schema.filter(|_| self.dialect.supports(Feature::Schemas)) {
			script.push(format!("CREATE SCHEMA {}", self.quote(schema)));
		}

		let sequences = self.database_sequences(db);
		if !sequences.is_empty() && self.emulates_sequences() {
			self.create_sequence_table(script)?;
		}
		for seq in &sequences {
			self.create_sequence(schema, seq, script)?;
		}

		let inline_foreign_keys = !self.dialect.supports(Feature::AlterTableConstraints);
		for table in db.tables() {
			let foreign_keys = if inline_foreign_keys {
				db.relations()
					.iter()
					.filter(|r| r.source_table().eq_ignore_ascii_case(table.name()))
					.map(|r| self.foreign_key_clause(db, r))
					.collect::<Result<Vec<_>>>()?
			} else {
				Vec::new()
			};
			self.create_table(table, &foreign_keys, script)?;
		}

		for table in db.tables() {
			for index in table.indexes() {
				self.create_index(table, index, script)?;
			}
		}

		if !inline_foreign_keys {
			for relation in db.relations() {
				self.create_relation(db, relation, script)?;
			}
		}

		for view in db.views() {
			self.create_view(view, false, script)?;
		}
		Ok(())
	}

	/// Reverse of [`create_database`](Self::create_database). Indexes go
	/// with their tables.
	pub(crate) fn drop_database(&self, db: &Database, script: &mut DdlScript) -> Result<()> {
		for view in db.views().iter().rev() {
			self.drop_view(view, script);
		}
		if self.dialect.supports(Feature::AlterTableConstraints) {
			for relation in db.relations().iter().rev() {
				self.drop_relation(db, relation, script)?;
			}
		}
		for table in db.tables().iter().rev() {
			self.drop_table(table, script);
		}

		let sequences = self.database_sequences(db);
		if !sequences.is_empty() {
			if self.emulates_sequences() {
				self.drop_sequence_table(script);
			} else {
				for seq in sequences.iter().rev() {
					self.drop_sequence(db.schema(), seq, script)?;
				}
			}
		}

		if let Some(schema) = db
			.schema()
			.filter(|_| self.dialect.supports(Feature::Schemas))
		{
			script.push(format!("DROP SCHEMA {}", self.quote(schema)));
		}
		Ok(())
	}

	/// Declared sequences, plus the implicit ones of auto-increment
	/// columns when keys come from sequences.
	fn database_sequences(&self, db: &Database) -> Vec<Sequence> {
		match self.identity_style() {
			IdentityStyle::Sequence | IdentityStyle::SequenceTable => db.all_sequences(),
			_ => db.sequences().to_vec(),
		}
	}
}

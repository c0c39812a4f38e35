//! PostgreSQL dialect.

use super::{
	DialectConfig, DialectHandler, DialectKind, DialectSettings, DialectSpec, Feature,
	IdentityStyle, PagingStyle, Phrase, integer_type, standard_phrase,
};
use crate::types::{ColumnSize, DataType};

const SPEC: DialectSpec = DialectSpec {
	kind: DialectKind::Postgres,
	phrase,
	native_type,
	features: &[
		Feature::Schemas,
		Feature::Sequences,
		Feature::RowLimit,
		Feature::RowOffset,
		Feature::ReplaceView,
		Feature::AlterTableConstraints,
		Feature::AlterColumn,
		Feature::SeparateNullability,
	],
	reserved_words: &["ANALYSE", "ANALYZE", "LIMIT", "OFFSET", "ONLY", "RETURNING", "WINDOW"],
	quote: ('"', '"'),
	paging: PagingStyle::LimitOffset,
	identity: IdentityStyle::Serial,
	min_text_size: 255,
	escapes_backslash: false,
	dummy_table: None,
};

fn phrase(phrase: Phrase) -> Option<&'static str> {
	match phrase {
		Phrase::Parameter => Some("${0}"),
		Phrase::FuncIndexOf => Some("STRPOS(?, {0})"),
		Phrase::FuncCeiling => Some("CEIL(?)"),
		Phrase::SequenceNextValue => Some("SELECT nextval('{0}')"),
		Phrase::DdlAlterColumn => Some("ALTER TABLE {0} ALTER COLUMN {1} TYPE {2}"),
		Phrase::DdlSetNotNull => Some("ALTER TABLE {0} ALTER COLUMN {1} SET NOT NULL"),
		Phrase::DdlDropNotNull => Some("ALTER TABLE {0} ALTER COLUMN {1} DROP NOT NULL"),
		_ => standard_phrase(phrase),
	}
}

fn native_type(data_type: DataType, size: ColumnSize) -> Option<String> {
	Some(match data_type {
		DataType::Integer => integer_type(size, "SMALLINT", "INTEGER", "BIGINT"),
		DataType::AutoInc => integer_type(size, "SERIAL", "SERIAL", "BIGSERIAL"),
		DataType::Text => format!("VARCHAR({})", size.precision),
		DataType::Char => format!("CHAR({})", size.precision),
		DataType::Date => "DATE".to_string(),
		DataType::DateTime => "TIMESTAMP".to_string(),
		DataType::Float => "DOUBLE PRECISION".to_string(),
		DataType::Decimal => format!("DECIMAL({}, {})", size.precision, size.scale),
		DataType::Bool => "BOOLEAN".to_string(),
		DataType::Clob => "TEXT".to_string(),
		DataType::Blob => "BYTEA".to_string(),
		DataType::UniqueId => "UUID".to_string(),
		DataType::Unknown => return None,
	})
}

/// PostgreSQL: `$n` placeholders, `LIMIT`/`OFFSET` paging and `SERIAL` keys.
#[derive(Debug, Clone)]
pub struct PostgresDialect {
	config: DialectConfig,
}

impl PostgresDialect {
	pub fn new() -> Self {
		Self::with_settings(DialectSettings::default())
	}

	pub fn with_settings(settings: DialectSettings) -> Self {
		Self {
			config: DialectConfig::new(SPEC, settings),
		}
	}
}

impl Default for PostgresDialect {
	fn default() -> Self {
		Self::new()
	}
}

impl DialectHandler for PostgresDialect {
	fn config(&self) -> &DialectConfig {
		&self.config
	}
}

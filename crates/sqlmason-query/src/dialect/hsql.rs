//! HSQLDB dialect.

use super::{
	DialectConfig, DialectHandler, DialectKind, DialectSettings, DialectSpec, Feature,
	IdentityStyle, PagingStyle, Phrase, integer_type, standard_phrase,
};
use crate::types::{ColumnSize, DataType};

const SPEC: DialectSpec = DialectSpec {
	kind: DialectKind::Hsql,
	phrase,
	native_type,
	features: &[
		Feature::Schemas,
		Feature::Sequences,
		Feature::RowLimit,
		Feature::RowOffset,
		Feature::AlterTableConstraints,
		Feature::AlterColumn,
		Feature::SeparateNullability,
	],
	reserved_words: &["LIMIT", "OFFSET", "TOP", "POSITION", "VALUE"],
	quote: ('"', '"'),
	paging: PagingStyle::LimitOffset,
	identity: IdentityStyle::Sequence,
	min_text_size: 255,
	escapes_backslash: false,
	dummy_table: Some("(VALUES(0))"),
};

fn phrase(phrase: Phrase) -> Option<&'static str> {
	match phrase {
		Phrase::FuncIndexOf => Some("LOCATE({0}, ?)"),
		Phrase::FuncTrunc => Some("TRUNCATE(?, {0})"),
		Phrase::FuncReverse => None,
		Phrase::SequenceNextValue => Some("CALL NEXT VALUE FOR {0}"),
		Phrase::DdlAlterColumn => Some("ALTER TABLE {0} ALTER COLUMN {1} SET DATA TYPE {2}"),
		Phrase::DdlSetNotNull => Some("ALTER TABLE {0} ALTER COLUMN {1} SET NOT NULL"),
		Phrase::DdlDropNotNull => Some("ALTER TABLE {0} ALTER COLUMN {1} SET NULL"),
		Phrase::DdlReplaceView => None,
		_ => standard_phrase(phrase),
	}
}

fn native_type(data_type: DataType, size: ColumnSize) -> Option<String> {
	Some(match data_type {
		DataType::Integer => integer_type(size, "SMALLINT", "INTEGER", "BIGINT"),
		DataType::AutoInc => integer_type(size, "INTEGER", "INTEGER", "BIGINT"),
		DataType::Text => format!("VARCHAR({})", size.precision),
		DataType::Char => format!("CHAR({})", size.precision),
		DataType::Date => "DATE".to_string(),
		DataType::DateTime => "TIMESTAMP".to_string(),
		DataType::Float => "DOUBLE".to_string(),
		DataType::Decimal => format!("DECIMAL({}, {})", size.precision, size.scale),
		DataType::Bool => "BOOLEAN".to_string(),
		DataType::Clob => "CLOB".to_string(),
		DataType::Blob => "BLOB".to_string(),
		DataType::UniqueId => "CHAR(36)".to_string(),
		DataType::Unknown => return None,
	})
}

/// HSQLDB: sequences for generated keys and `LIMIT`/`OFFSET` paging.
#[derive(Debug, Clone)]
pub struct HsqlDialect {
	config: DialectConfig,
}

impl HsqlDialect {
	pub fn new() -> Self {
		Self::with_settings(DialectSettings::default())
	}

	pub fn with_settings(settings: DialectSettings) -> Self {
		Self {
			config: DialectConfig::new(SPEC, settings),
		}
	}
}

impl Default for HsqlDialect {
	fn default() -> Self {
		Self::new()
	}
}

impl DialectHandler for HsqlDialect {
	fn config(&self) -> &DialectConfig {
		&self.config
	}
}

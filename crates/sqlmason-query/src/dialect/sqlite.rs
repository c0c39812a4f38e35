//! SQLite dialect.

use super::{
	DialectConfig, DialectHandler, DialectKind, DialectSettings, DialectSpec, Feature,
	IdentityStyle, PagingStyle, Phrase, standard_phrase,
};
use crate::types::{ColumnSize, DataType};

const SPEC: DialectSpec = DialectSpec {
	kind: DialectKind::Sqlite,
	phrase,
	native_type,
	features: &[Feature::Identity, Feature::RowLimit, Feature::RowOffset],
	reserved_words: &["ABORT", "AUTOINCREMENT", "GLOB", "LIMIT", "OFFSET", "PRAGMA", "REGEXP"],
	quote: ('"', '"'),
	paging: PagingStyle::LimitOffset,
	identity: IdentityStyle::PrimaryKeyAutoIncrement,
	min_text_size: 255,
	escapes_backslash: false,
	dummy_table: None,
};

fn phrase(phrase: Phrase) -> Option<&'static str> {
	match phrase {
		Phrase::BooleanTrue => Some("1"),
		Phrase::BooleanFalse => Some("0"),
		Phrase::DateTemplate => Some("'{0}'"),
		Phrase::DateTimeTemplate => Some("'{0}'"),
		Phrase::FuncSubstring => Some("SUBSTR(?, {0})"),
		Phrase::FuncSubstringEx => Some("SUBSTR(?, {0}, {1})"),
		Phrase::FuncIndexOf => Some("INSTR(?, {0})"),
		Phrase::FuncReverse => None,
		Phrase::FuncModulo => Some("(? % {0})"),
		Phrase::FuncDay => Some("CAST(strftime('%d', ?) AS INTEGER)"),
		Phrase::FuncMonth => Some("CAST(strftime('%m', ?) AS INTEGER)"),
		Phrase::FuncYear => Some("CAST(strftime('%Y', ?) AS INTEGER)"),
		Phrase::PagingOffset => Some("LIMIT -1 OFFSET {0}"),
		Phrase::PagingOffsetFetch | Phrase::PagingFetchFirst => None,
		Phrase::DdlIdentity => Some("PRIMARY KEY AUTOINCREMENT"),
		Phrase::DdlAlterColumn
		| Phrase::DdlReplaceView
		| Phrase::DdlDropForeignKey
		| Phrase::DdlDropPrimaryKey
		| Phrase::DdlCreateSequence
		| Phrase::DdlRestartSequence => None,
		_ => standard_phrase(phrase),
	}
}

fn native_type(data_type: DataType, size: ColumnSize) -> Option<String> {
	Some(match data_type {
		DataType::Integer | DataType::AutoInc => "INTEGER".to_string(),
		DataType::Text | DataType::Clob | DataType::UniqueId => "TEXT".to_string(),
		DataType::Char => format!("CHAR({})", size.precision),
		DataType::Date => "DATE".to_string(),
		DataType::DateTime => "DATETIME".to_string(),
		DataType::Float => "REAL".to_string(),
		DataType::Decimal => format!("NUMERIC({}, {})", size.precision, size.scale),
		DataType::Bool => "BOOLEAN".to_string(),
		DataType::Blob => "BLOB".to_string(),
		DataType::Unknown => return None,
	})
}

/// SQLite: dynamic typing, inline foreign keys and `AUTOINCREMENT` primary keys.
#[derive(Debug, Clone)]
pub struct SqliteDialect {
	config: DialectConfig,
}

impl SqliteDialect {
	pub fn new() -> Self {
		Self::with_settings(DialectSettings::default())
	}

	pub fn with_settings(settings: DialectSettings) -> Self {
		Self {
			config: DialectConfig::new(SPEC, settings),
		}
	}
}

impl Default for SqliteDialect {
	fn default() -> Self {
		Self::new()
	}
}

impl DialectHandler for SqliteDialect {
	fn config(&self) -> &DialectConfig {
		&self.config
	}
}

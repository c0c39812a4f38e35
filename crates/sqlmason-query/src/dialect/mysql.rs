//! MySQL dialect.

use super::{
	DialectConfig, DialectHandler, DialectKind, DialectSettings, DialectSpec, Feature,
	IdentityStyle, PagingStyle, Phrase, integer_type, standard_phrase,
};
use crate::types::{ColumnSize, DataType};

const SPEC: DialectSpec = DialectSpec {
	kind: DialectKind::MySql,
	phrase,
	native_type,
	features: &[
		Feature::Identity,
		Feature::RowLimit,
		Feature::RowOffset,
		Feature::ReplaceView,
		Feature::AlterTableConstraints,
		Feature::DropIndexOnTable,
		Feature::AlterColumn,
	],
	reserved_words: &[
		"DATABASE", "DIV", "INTERVAL", "KEYS", "LIMIT", "LOCK", "MOD", "OPTION", "RANGE", "READ",
		"REGEXP", "SCHEMA", "SHOW", "XOR",
	],
	quote: ('`', '`'),
	paging: PagingStyle::LimitOffset,
	identity: IdentityStyle::AutoIncrement,
	min_text_size: 191,
	escapes_backslash: true,
	dummy_table: None,
};

fn phrase(phrase: Phrase) -> Option<&'static str> {
	match phrase {
		Phrase::CurrentDateTime => Some("NOW()"),
		Phrase::Concat => Some("CONCAT(?, {0})"),
		Phrase::FuncLength => Some("CHAR_LENGTH(?)"),
		Phrase::FuncIndexOf => Some("LOCATE({0}, ?)"),
		Phrase::FuncTrunc => Some("TRUNCATE(?, {0})"),
		Phrase::FuncDay => Some("DAY(?)"),
		Phrase::FuncMonth => Some("MONTH(?)"),
		Phrase::FuncYear => Some("YEAR(?)"),
		Phrase::PagingOffset => Some("LIMIT 18446744073709551615 OFFSET {0}"),
		Phrase::PagingOffsetFetch | Phrase::PagingFetchFirst => None,
		Phrase::DdlAlterColumn => Some("ALTER TABLE {0} MODIFY COLUMN {1} {2}"),
		Phrase::DdlIdentity => Some("AUTO_INCREMENT"),
		Phrase::DdlDropIndex => Some("DROP INDEX {0} ON {1}"),
		Phrase::DdlDropForeignKey => Some("ALTER TABLE {0} DROP FOREIGN KEY {1}"),
		Phrase::DdlDropPrimaryKey => Some("ALTER TABLE {0} DROP PRIMARY KEY"),
		Phrase::DdlCreateSequence | Phrase::DdlRestartSequence => None,
		_ => standard_phrase(phrase),
	}
}

fn native_type(data_type: DataType, size: ColumnSize) -> Option<String> {
	Some(match data_type {
		DataType::Integer => integer_type(size, "SMALLINT", "INT", "BIGINT"),
		DataType::AutoInc => integer_type(size, "INT", "INT", "BIGINT"),
		DataType::Text => format!("VARCHAR({})", size.precision),
		DataType::Char => format!("CHAR({})", size.precision),
		DataType::Date => "DATE".to_string(),
		DataType::DateTime => "DATETIME".to_string(),
		DataType::Float => "DOUBLE".to_string(),
		DataType::Decimal => format!("DECIMAL({}, {})", size.precision, size.scale),
		DataType::Bool => "TINYINT(1)".to_string(),
		DataType::Clob => "LONGTEXT".to_string(),
		DataType::Blob => "LONGBLOB".to_string(),
		DataType::UniqueId => "CHAR(36)".to_string(),
		DataType::Unknown => return None,
	})
}

/// MySQL: backtick quoting, backslash escapes and `AUTO_INCREMENT` keys.
#[derive(Debug, Clone)]
pub struct MySqlDialect {
	config: DialectConfig,
}

impl MySqlDialect {
	pub fn new() -> Self {
		Self::with_settings(DialectSettings::default())
	}

	pub fn with_settings(settings: DialectSettings) -> Self {
		Self {
			config: DialectConfig::new(SPEC, settings),
		}
	}
}

impl Default for MySqlDialect {
	fn default() -> Self {
		Self::new()
	}
}

impl DialectHandler for MySqlDialect {
	fn config(&self) -> &DialectConfig {
		&self.config
	}
}

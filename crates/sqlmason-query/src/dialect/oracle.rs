//! Oracle dialect.

use super::{
	DialectConfig, DialectHandler, DialectKind, DialectSettings, DialectSpec, Feature,
	IdentityStyle, PagingStyle, Phrase, standard_phrase,
};
use crate::types::{ColumnSize, DataType};

const SPEC: DialectSpec = DialectSpec {
	kind: DialectKind::Oracle,
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
	],
	reserved_words: &[
		"ACCESS", "AUDIT", "COMMENT", "FILE", "LEVEL", "MODE", "NUMBER", "RAW", "ROWID", "ROWNUM",
		"SESSION", "SIZE", "SYSDATE", "UID",
	],
	quote: ('"', '"'),
	paging: PagingStyle::OffsetFetch,
	identity: IdentityStyle::Sequence,
	min_text_size: 255,
	escapes_backslash: false,
	dummy_table: Some("DUAL"),
};

fn phrase(phrase: Phrase) -> Option<&'static str> {
	match phrase {
		Phrase::BooleanTrue => Some("1"),
		Phrase::BooleanFalse => Some("0"),
		Phrase::CurrentDate => Some("TRUNC(SYSDATE)"),
		Phrase::CurrentDateTime => Some("SYSTIMESTAMP"),
		Phrase::FuncSubstring => Some("SUBSTR(?, {0})"),
		Phrase::FuncSubstringEx => Some("SUBSTR(?, {0}, {1})"),
		Phrase::FuncIndexOf => Some("INSTR(?, {0})"),
		Phrase::FuncCoalesce => Some("NVL(?, {0})"),
		Phrase::FuncCeiling => Some("CEIL(?)"),
		Phrase::PagingOffset => Some("OFFSET {0} ROWS"),
		Phrase::PagingLimit | Phrase::PagingLimitOffset => None,
		Phrase::SequenceNextValue => Some("SELECT {0}.NEXTVAL FROM DUAL"),
		Phrase::DdlAddColumn => Some("ALTER TABLE {0} ADD {1}"),
		Phrase::DdlAlterColumn => Some("ALTER TABLE {0} MODIFY {1} {2}"),
		Phrase::DdlCreateSequence => {
			Some("CREATE SEQUENCE {0} START WITH {1} INCREMENT BY {2} NOCACHE")
		}
		Phrase::DdlRestartSequence => Some("ALTER SEQUENCE {0} RESTART START WITH {1}"),
		_ => standard_phrase(phrase),
	}
}

fn native_type(data_type: DataType, size: ColumnSize) -> Option<String> {
	let number = |precision: i32| format!("NUMBER({precision})");
	Some(match data_type {
		DataType::Integer | DataType::AutoInc => match size.precision {
			1..=2 if data_type == DataType::Integer => number(5),
			p if p > 4 => number(19),
			_ => number(10),
		},
		DataType::Text => format!("VARCHAR2({})", size.precision),
		DataType::Char => format!("CHAR({})", size.precision),
		DataType::Date => "DATE".to_string(),
		DataType::DateTime => "TIMESTAMP".to_string(),
		DataType::Float => "FLOAT".to_string(),
		DataType::Decimal => format!("NUMBER({}, {})", size.precision, size.scale),
		DataType::Bool => number(1),
		DataType::Clob => "CLOB".to_string(),
		DataType::Blob => "BLOB".to_string(),
		DataType::UniqueId => "CHAR(36)".to_string(),
		DataType::Unknown => return None,
	})
}

/// Oracle: `NUMBER` types, sequences for generated keys and `FETCH FIRST` paging.
#[derive(Debug, Clone)]
pub struct OracleDialect {
	config: DialectConfig,
}

impl OracleDialect {
	pub fn new() -> Self {
		Self::with_settings(DialectSettings::default())
	}

	pub fn with_settings(settings: DialectSettings) -> Self {
		Self {
			config: DialectConfig::new(SPEC, settings),
		}
	}
}

impl Default for OracleDialect {
	fn default() -> Self {
		Self::new()
	}
}

impl DialectHandler for OracleDialect {
	fn config(&self) -> &DialectConfig {
		&self.config
	}
}

//! Microsoft SQL Server dialect.

use super::{
	DialectConfig, DialectHandler, DialectKind, DialectSettings, DialectSpec, Feature,
	IdentityStyle, PagingStyle, Phrase, integer_type, standard_phrase,
};
use crate::types::{ColumnSize, DataType};

const SPEC: DialectSpec = DialectSpec {
	kind: DialectKind::SqlServer,
	phrase,
	native_type,
	features: &[
		Feature::Schemas,
		Feature::Sequences,
		Feature::Identity,
		Feature::RowLimit,
		Feature::RowOffset,
		Feature::OffsetRequiresOrderBy,
		Feature::ReplaceView,
		Feature::AlterTableConstraints,
		Feature::DropIndexOnTable,
		Feature::AlterColumn,
	],
	reserved_words: &[
		"BACKUP", "BROWSE", "CLUSTERED", "DATABASE", "FILE", "IDENTITY", "KILL", "OFFSETS",
		"PERCENT", "PLAN", "PROC", "TOP", "TRAN",
	],
	quote: ('[', ']'),
	paging: PagingStyle::TopOffsetFetch,
	identity: IdentityStyle::Identity,
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
		Phrase::CurrentDate => Some("CAST(GETDATE() AS DATE)"),
		Phrase::CurrentDateTime => Some("GETDATE()"),
		Phrase::Concat => Some("? + {0}"),
		Phrase::FuncTrim => Some("LTRIM(RTRIM(?))"),
		Phrase::FuncLength => Some("LEN(?)"),
		Phrase::FuncSubstring => Some("SUBSTRING(?, {0}, 4000)"),
		Phrase::FuncIndexOf => Some("CHARINDEX({0}, ?)"),
		Phrase::FuncTrunc => Some("ROUND(?, {0}, 1)"),
		Phrase::FuncModulo => Some("(? % {0})"),
		Phrase::FuncDay => Some("DAY(?)"),
		Phrase::FuncMonth => Some("MONTH(?)"),
		Phrase::FuncYear => Some("YEAR(?)"),
		Phrase::PagingTop => Some("TOP {0}"),
		Phrase::PagingOffset => Some("OFFSET {0} ROWS"),
		Phrase::PagingLimit | Phrase::PagingLimitOffset | Phrase::PagingFetchFirst => None,
		Phrase::SequenceNextValue => Some("SELECT NEXT VALUE FOR {0}"),
		Phrase::DdlAddColumn => Some("ALTER TABLE {0} ADD {1}"),
		Phrase::DdlIdentity => Some("IDENTITY(1, 1)"),
		Phrase::DdlReplaceView => Some("CREATE OR ALTER VIEW"),
		Phrase::DdlDropIndex => Some("DROP INDEX {0} ON {1}"),
		_ => standard_phrase(phrase),
	}
}

fn native_type(data_type: DataType, size: ColumnSize) -> Option<String> {
	Some(match data_type {
		DataType::Integer => integer_type(size, "SMALLINT", "INT", "BIGINT"),
		DataType::AutoInc => integer_type(size, "INT", "INT", "BIGINT"),
		DataType::Text => format!("NVARCHAR({})", size.precision),
		DataType::Char => format!("NCHAR({})", size.precision),
		DataType::Date => "DATE".to_string(),
		DataType::DateTime => "DATETIME2".to_string(),
		DataType::Float => "FLOAT".to_string(),
		DataType::Decimal => format!("DECIMAL({}, {})", size.precision, size.scale),
		DataType::Bool => "BIT".to_string(),
		DataType::Clob => "NVARCHAR(MAX)".to_string(),
		DataType::Blob => "VARBINARY(MAX)".to_string(),
		DataType::UniqueId => "UNIQUEIDENTIFIER".to_string(),
		DataType::Unknown => return None,
	})
}

/// SQL Server: bracket quoting, `TOP`/`OFFSET FETCH` paging and identity columns.
#[derive(Debug, Clone)]
pub struct SqlServerDialect {
	config: DialectConfig,
}

impl SqlServerDialect {
	pub fn new() -> Self {
		Self::with_settings(DialectSettings::default())
	}

	pub fn with_settings(settings: DialectSettings) -> Self {
		Self {
			config: DialectConfig::new(SPEC, settings),
		}
	}
}

impl Default for SqlServerDialect {
	fn default() -> Self {
		Self::new()
	}
}

impl DialectHandler for SqlServerDialect {
	fn config(&self) -> &DialectConfig {
		&self.config
	}
}

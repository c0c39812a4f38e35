//! Dialect handlers.
//!
//! A dialect handler knows how one SQL dialect spells things: the phrase
//! templates for functions, literals and paging, the native column types,
//! the identifier quoting rules and the optional features it supports.
//!
//! - [`OracleDialect`]
//! - [`SqlServerDialect`]
//! - [`PostgresDialect`]
//! - [`HsqlDialect`]
//! - [`MySqlDialect`]
//! - [`SqliteDialect`]
//!
//! Handlers are immutable once constructed; settings and overrides are
//! applied by `with_settings`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{QueryError, Result};
use crate::types::{ColumnSize, DataType};

mod hsql;
mod mysql;
mod oracle;
mod phrase;
mod postgres;
mod sequence;
mod settings;
mod sqlite;
mod sqlserver;

pub use hsql::HsqlDialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use phrase::{Phrase, TemplatePart, fill_template, parse_template};
pub use postgres::PostgresDialect;
pub use sequence::{
	SEQUENCE_INCREMENT_COLUMN, SEQUENCE_NAME_COLUMN, SEQUENCE_VALUE_COLUMN, next_sequence_value,
};
pub use settings::{DEFAULT_SEQUENCE_TABLE, DialectSettings};
pub use sqlite::SqliteDialect;
pub use sqlserver::SqlServerDialect;

/// The built-in dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectKind {
	Oracle,
	SqlServer,
	Postgres,
	Hsql,
	MySql,
	Sqlite,
}

impl DialectKind {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Oracle => "Oracle",
			Self::SqlServer => "SQL Server",
			Self::Postgres => "PostgreSQL",
			Self::Hsql => "HSQLDB",
			Self::MySql => "MySQL",
			Self::Sqlite => "SQLite",
		}
	}
}

impl fmt::Display for DialectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Optional capabilities of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
	/// Tables can live in a named schema
	Schemas,
	/// Native `CREATE SEQUENCE`
	Sequences,
	/// Auto-increment columns declared with an identity clause
	Identity,
	/// Limiting the number of returned rows
	RowLimit,
	/// Skipping leading rows
	RowOffset,
	/// Skipping rows is only allowed on ordered results
	OffsetRequiresOrderBy,
	/// Replacing a view in one statement
	ReplaceView,
	/// Adding and dropping constraints with `ALTER TABLE`
	AlterTableConstraints,
	/// `DROP INDEX` names the table
	DropIndexOnTable,
	/// Changing a column's type with `ALTER TABLE`
	AlterColumn,
	/// Type and nullability of a column are altered by separate statements
	SeparateNullability,
}

/// How a dialect limits and skips rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingStyle {
	/// `LIMIT n [OFFSET m]` after ORDER BY
	LimitOffset,
	/// `SELECT TOP n`, or `OFFSET m ROWS FETCH NEXT n ROWS ONLY` when skipping
	TopOffsetFetch,
	/// `[OFFSET m ROWS] FETCH ...` after ORDER BY
	OffsetFetch,
}

/// How a dialect generates values for auto-increment columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityStyle {
	/// Serial pseudo types (`SERIAL`, `BIGSERIAL`)
	Serial,
	/// `IDENTITY(1, 1)` column clause
	Identity,
	/// `AUTO_INCREMENT` column clause
	AutoIncrement,
	/// `INTEGER PRIMARY KEY AUTOINCREMENT` on the key column
	PrimaryKeyAutoIncrement,
	/// One `CREATE SEQUENCE` per auto-increment column
	Sequence,
	/// A shared table holding one row per sequence
	SequenceTable,
}

/// Static description of a dialect, one per handler module.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DialectSpec {
	pub kind: DialectKind,
	pub phrase: fn(Phrase) -> Option<&'static str>,
	pub native_type: fn(DataType, ColumnSize) -> Option<String>,
	pub features: &'static [Feature],
	pub reserved_words: &'static [&'static str],
	pub quote: (char, char),
	pub paging: PagingStyle,
	pub identity: IdentityStyle,
	pub min_text_size: i32,
	pub escapes_backslash: bool,
	pub dummy_table: Option<&'static str>,
}

/// Resolved configuration of a dialect handler.
#[derive(Debug, Clone)]
pub struct DialectConfig {
	kind: DialectKind,
	phrases: HashMap<Phrase, String>,
	native_type: fn(DataType, ColumnSize) -> Option<String>,
	features: HashSet<Feature>,
	reserved_words: HashSet<&'static str>,
	quote: (char, char),
	paging: PagingStyle,
	identity: IdentityStyle,
	min_text_size: i32,
	escapes_backslash: bool,
	dummy_table: Option<&'static str>,
	settings: DialectSettings,
}

impl DialectConfig {
	pub(crate) fn new(spec: DialectSpec, settings: DialectSettings) -> Self {
		let mut phrases: HashMap<Phrase, String> = Phrase::ALL
			.iter()
			.filter_map(|&p| (spec.phrase)(p).map(|t| (p, t.to_string())))
			.collect();
		for (phrase, template) in &settings.phrase_overrides {
			phrases.insert(*phrase, template.clone());
		}
		let reserved_words = COMMON_RESERVED_WORDS
			.iter()
			.chain(spec.reserved_words)
			.copied()
			.collect();

		Self {
			kind: spec.kind,
			phrases,
			native_type: spec.native_type,
			features: spec.features.iter().copied().collect(),
			reserved_words,
			quote: spec.quote,
			paging: spec.paging,
			identity: spec.identity,
			min_text_size: spec.min_text_size,
			escapes_backslash: spec.escapes_backslash,
			dummy_table: spec.dummy_table,
			settings,
		}
	}

	pub fn kind(&self) -> DialectKind {
		self.kind
	}

	/// Returns the template for `phrase`.
	pub fn phrase(&self, phrase: Phrase) -> Result<&str> {
		self.phrases
			.get(&phrase)
			.map(String::as_str)
			.ok_or(QueryError::MissingPhrase {
				dialect: self.kind,
				phrase,
			})
	}

	/// Maps a data type to the native column type.
	///
	/// Text sizes of zero or less use the dialect minimum; decimals without
	/// a size default to `(18, 2)`.
	pub fn native_type(&self, data_type: DataType, size: ColumnSize) -> Result<String> {
		let size = match data_type {
			DataType::Text => size.or_minimum(self.min_text_size),
			DataType::Char => size.or_minimum(1),
			DataType::Decimal if size.is_default() => ColumnSize::decimal(18, 2),
			_ => size,
		};
		let missing = || QueryError::MissingTypeMapping {
			dialect: self.kind,
			data_type,
		};
		match self.settings.type_overrides.get(&data_type) {
			Some(template) => {
				let precision = size.precision.to_string();
				let scale = size.scale.to_string();
				fill_template(template, None, &[&precision, &scale]).ok_or_else(missing)
			}
			None => (self.native_type)(data_type, size).ok_or_else(missing),
		}
	}

	pub fn supports(&self, feature: Feature) -> bool {
		self.features.contains(&feature)
	}

	pub fn paging_style(&self) -> PagingStyle {
		self.paging
	}

	/// Identity style in effect, taking `use_sequence_table` into account.
	pub fn identity_style(&self) -> IdentityStyle {
		if self.settings.use_sequence_table {
			IdentityStyle::SequenceTable
		} else {
			self.identity
		}
	}

	/// Whether sequences live in the sequence table rather than natively.
	///
	/// Both the DDL for sequences and [`next_sequence_value`] follow this.
	pub fn emulates_sequences(&self) -> bool {
		self.identity_style() == IdentityStyle::SequenceTable
	}

	pub fn escapes_backslash(&self) -> bool {
		self.escapes_backslash
	}

	/// Table to select from when a query has no source, e.g. `DUAL`.
	pub fn dummy_table(&self) -> Option<&'static str> {
		self.dummy_table
	}

	pub fn settings(&self) -> &DialectSettings {
		&self.settings
	}

	pub fn is_reserved(&self, word: &str) -> bool {
		self.reserved_words
			.contains(word.to_ascii_uppercase().as_str())
	}

	/// Quotes `name` when it is reserved, not a plain identifier, or when
	/// quoting is forced by the settings.
	pub fn quote_identifier(&self, name: &str) -> String {
		if !self.needs_quotes(name) {
			return name.to_string();
		}
		let (open, close) = self.quote;
		let mut quoted = String::with_capacity(name.len() + 2);
		quoted.push(open);
		for ch in name.chars() {
			if ch == close {
				quoted.push(close);
			}
			quoted.push(ch);
		}
		quoted.push(close);
		quoted
	}

	/// Quoted `name`, prefixed with `schema` or else the `schema_name`
	/// setting. The schema is dropped for dialects without schema support.
	pub fn qualify_identifier(&self, schema: Option<&str>, name: &str) -> String {
		let name = self.quote_identifier(name);
		match schema.or(self.settings.schema_name.as_deref()) {
			Some(schema) if self.supports(Feature::Schemas) => {
				format!("{}.{}", self.quote_identifier(schema), name)
			}
			_ => name,
		}
	}

	fn needs_quotes(&self, name: &str) -> bool {
		if self.settings.always_quote_identifiers {
			return true;
		}
		let mut chars = name.chars();
		let plain_start = chars
			.next()
			.is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
		!plain_start
			|| !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
			|| self.is_reserved(name)
	}
}

/// Dialect-specific SQL generation.
///
/// Implementors only provide [`config`](Self::config); every other method
/// reads the resolved configuration.
pub trait DialectHandler: Send + Sync + fmt::Debug {
	fn config(&self) -> &DialectConfig;

	fn kind(&self) -> DialectKind {
		self.config().kind()
	}

	/// # Errors
	///
	/// [`QueryError::MissingPhrase`] if the dialect has no template for `phrase`.
	fn phrase(&self, phrase: Phrase) -> Result<&str> {
		self.config().phrase(phrase)
	}

	/// Expands the template of `phrase` with already rendered text.
	///
	/// # Errors
	///
	/// [`QueryError::MissingPhrase`] if the template is missing or needs
	/// more arguments than supplied.
	fn fill_phrase(&self, phrase: Phrase, operand: Option<&str>, args: &[&str]) -> Result<String> {
		let template = self.phrase(phrase)?;
		fill_template(template, operand, args).ok_or(QueryError::MissingPhrase {
			dialect: self.kind(),
			phrase,
		})
	}

	/// # Errors
	///
	/// [`QueryError::MissingTypeMapping`] if `data_type` has no native type.
	fn native_type(&self, data_type: DataType, size: ColumnSize) -> Result<String> {
		self.config().native_type(data_type, size)
	}

	fn supports(&self, feature: Feature) -> bool {
		self.config().supports(feature)
	}

	fn quote_identifier(&self, name: &str) -> String {
		self.config().quote_identifier(name)
	}

	fn qualify_identifier(&self, schema: Option<&str>, name: &str) -> String {
		self.config().qualify_identifier(schema, name)
	}

	fn settings(&self) -> &DialectSettings {
		self.config().settings()
	}

	/// Bind placeholder for the 1-based parameter `index`.
	///
	/// A `?` in the template stands for itself.
	fn placeholder(&self, index: usize) -> Result<String> {
		self.fill_phrase(Phrase::Parameter, Some("?"), &[&index.to_string()])
	}
}

/// Templates shared by most dialects; handlers fall back to these.
pub(crate) fn standard_phrase(phrase: Phrase) -> Option<&'static str> {
	Some(match phrase {
		Phrase::Null => "NULL",
		Phrase::BooleanTrue => "TRUE",
		Phrase::BooleanFalse => "FALSE",
		Phrase::DateTemplate => "DATE '{0}'",
		Phrase::DateTimeTemplate => "TIMESTAMP '{0}'",
		Phrase::CurrentDate => "CURRENT_DATE",
		Phrase::CurrentDateTime => "CURRENT_TIMESTAMP",
		Phrase::Parameter => "?",
		Phrase::Concat => "? || {0}",
		Phrase::FuncUpper => "UPPER(?)",
		Phrase::FuncLower => "LOWER(?)",
		Phrase::FuncTrim => "TRIM(?)",
		Phrase::FuncLength => "LENGTH(?)",
		Phrase::FuncSubstring => "SUBSTRING(?, {0})",
		Phrase::FuncSubstringEx => "SUBSTRING(?, {0}, {1})",
		Phrase::FuncReplace => "REPLACE(?, {0}, {1})",
		Phrase::FuncReverse => "REVERSE(?)",
		Phrase::FuncIndexOf => "POSITION({0} IN ?)",
		Phrase::FuncCoalesce => "COALESCE(?, {0})",
		Phrase::FuncAbs => "ABS(?)",
		Phrase::FuncRound => "ROUND(?, {0})",
		Phrase::FuncTrunc => "TRUNC(?, {0})",
		Phrase::FuncCeiling => "CEILING(?)",
		Phrase::FuncFloor => "FLOOR(?)",
		Phrase::FuncModulo => "MOD(?, {0})",
		Phrase::FuncDay => "EXTRACT(DAY FROM ?)",
		Phrase::FuncMonth => "EXTRACT(MONTH FROM ?)",
		Phrase::FuncYear => "EXTRACT(YEAR FROM ?)",
		Phrase::FuncSum => "SUM(?)",
		Phrase::FuncMax => "MAX(?)",
		Phrase::FuncMin => "MIN(?)",
		Phrase::FuncAvg => "AVG(?)",
		Phrase::FuncCount => "COUNT(?)",
		Phrase::FuncCountDistinct => "COUNT(DISTINCT ?)",
		Phrase::FuncCast => "CAST(? AS {0})",
		Phrase::PagingLimit => "LIMIT {0}",
		Phrase::PagingLimitOffset => "LIMIT {0} OFFSET {1}",
		Phrase::PagingOffset => "OFFSET {0}",
		Phrase::PagingOffsetFetch => "OFFSET {1} ROWS FETCH NEXT {0} ROWS ONLY",
		Phrase::PagingFetchFirst => "FETCH FIRST {0} ROWS ONLY",
		Phrase::DdlAddColumn => "ALTER TABLE {0} ADD COLUMN {1}",
		Phrase::DdlAlterColumn => "ALTER TABLE {0} ALTER COLUMN {1} {2}",
		Phrase::DdlReplaceView => "CREATE OR REPLACE VIEW",
		Phrase::DdlDropIndex => "DROP INDEX {0}",
		Phrase::DdlDropForeignKey => "ALTER TABLE {0} DROP CONSTRAINT {1}",
		Phrase::DdlDropPrimaryKey => "ALTER TABLE {0} DROP CONSTRAINT {1}",
		Phrase::DdlCreateSequence => "CREATE SEQUENCE {0} START WITH {1} INCREMENT BY {2}",
		Phrase::DdlRestartSequence => "ALTER SEQUENCE {0} RESTART WITH {1}",
		Phrase::PagingTop
		| Phrase::SequenceNextValue
		| Phrase::DdlSetNotNull
		| Phrase::DdlDropNotNull
		| Phrase::DdlIdentity => return None,
	})
}

/// Picks a native integer type by storage width in bytes.
pub(crate) fn integer_type(size: ColumnSize, small: &str, normal: &str, big: &str) -> String {
	match size.precision {
		1..=2 => small,
		p if p > 4 => big,
		_ => normal,
	}
	.to_string()
}

/// Words quoted by every dialect.
const COMMON_RESERVED_WORDS: &[&str] = &[
	"ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN",
	"CONSTRAINT", "CREATE", "CROSS", "CURRENT_DATE", "CURRENT_TIMESTAMP", "DATE", "DEFAULT",
	"DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXISTS", "FALSE", "FOR", "FOREIGN",
	"FROM", "FULL", "GRANT", "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT", "INTO", "IS",
	"JOIN", "KEY", "LEFT", "LIKE", "NOT", "NULL", "ON", "OR", "ORDER", "OUTER", "PRIMARY",
	"REFERENCES", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO", "TRUE", "UNION", "UNIQUE",
	"UPDATE", "USER", "VALUES", "VIEW", "WHEN", "WHERE", "WITH",
];

#[cfg(test)]
mod tests;

//! Dialect settings loaded from configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Phrase;
use crate::error::{QueryError, Result};
use crate::types::DataType;

/// Name of the table that emulates sequences when none are available natively.
pub const DEFAULT_SEQUENCE_TABLE: &str = "SEQUENCES";

/// Per-handler options, fixed when the handler is constructed.
///
/// # Example
///
/// ```rust
/// use sqlmason_query::{DialectHandler, DialectSettings, Phrase, PostgresDialect};
///
/// let settings = DialectSettings::from_toml_str(r#"
/// prepared_statements = true
///
/// [phrase_overrides]
/// func_upper = "UCASE(?)"
/// "#).unwrap();
///
/// let dialect = PostgresDialect::with_settings(settings);
/// assert_eq!(dialect.phrase(Phrase::FuncUpper).unwrap(), "UCASE(?)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectSettings {
	/// Quote every identifier, not only reserved words and unusual names
	pub always_quote_identifiers: bool,
	/// Render values as bind placeholders instead of inline literals
	pub prepared_statements: bool,
	/// Emulate sequences and auto-increment columns with a sequence table
	pub use_sequence_table: bool,
	pub sequence_table_name: String,
	/// Schema used for tables whose database declares none
	pub schema_name: Option<String>,
	/// Replacement templates, keyed by phrase name
	pub phrase_overrides: HashMap<Phrase, String>,
	/// Replacement native types, keyed by data type name; `{0}` is the
	/// precision and `{1}` the scale
	pub type_overrides: HashMap<DataType, String>,
}

impl Default for DialectSettings {
	fn default() -> Self {
		Self {
			always_quote_identifiers: false,
			prepared_statements: false,
			use_sequence_table: false,
			sequence_table_name: DEFAULT_SEQUENCE_TABLE.to_string(),
			schema_name: None,
			phrase_overrides: HashMap::new(),
			type_overrides: HashMap::new(),
		}
	}
}

impl DialectSettings {
	/// Parses settings from TOML text.
	///
	/// # Errors
	///
	/// Returns [`QueryError::InvalidSettings`] for malformed TOML, unknown
	/// phrase or data type names and an empty sequence table name.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		let settings: Self =
			toml::from_str(text).map_err(|e| QueryError::InvalidSettings(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}

	/// Serializes the settings back to TOML.
	pub fn to_toml_string(&self) -> Result<String> {
		toml::to_string(self).map_err(|e| QueryError::InvalidSettings(e.to_string()))
	}

	pub fn validate(&self) -> Result<()> {
		if self.sequence_table_name.trim().is_empty() {
			return Err(QueryError::InvalidSettings(
				"sequence_table_name must not be empty".to_string(),
			));
		}
		if let Some((phrase, _)) = self
			.phrase_overrides
			.iter()
			.find(|(_, template)| template.trim().is_empty())
		{
			return Err(QueryError::InvalidSettings(format!(
				"override for phrase `{phrase}` is empty"
			)));
		}
		Ok(())
	}

	pub fn with_prepared_statements(mut self, enabled: bool) -> Self {
		self.prepared_statements = enabled;
		self
	}

	pub fn with_sequence_table(mut self, enabled: bool) -> Self {
		self.use_sequence_table = enabled;
		self
	}

	pub fn with_quoted_identifiers(mut self, enabled: bool) -> Self {
		self.always_quote_identifiers = enabled;
		self
	}

	pub fn with_phrase(mut self, phrase: Phrase, template: impl Into<String>) -> Self {
		self.phrase_overrides.insert(phrase, template.into());
		self
	}

	pub fn with_native_type(mut self, data_type: DataType, native: impl Into<String>) -> Self {
		self.type_overrides.insert(data_type, native.into());
		self
	}
}

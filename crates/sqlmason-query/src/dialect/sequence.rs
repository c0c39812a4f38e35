//! Fetching the next value of a sequence.

use super::{DialectHandler, Feature, Phrase};
use crate::error::{QueryError, Result};
use crate::value::quote_text;

/// Column of the sequence table holding the sequence name.
pub const SEQUENCE_NAME_COLUMN: &str = "SEQ_NAME";
/// Column of the sequence table holding the last issued value.
pub const SEQUENCE_VALUE_COLUMN: &str = "SEQ_VALUE";
/// Column of the sequence table holding the step between values.
pub const SEQUENCE_INCREMENT_COLUMN: &str = "SEQ_INCREMENT";

/// Returns the statements that fetch the next value of `sequence`.
///
/// Dialects with native sequences return a single query naming the
/// sequence in `schema`, or in the `schema_name` setting when `schema` is
/// `None`. With the sequence table emulation two statements are returned:
/// an UPDATE that advances the stored value by the stored increment and a
/// SELECT that reads it back. Both must run in the same transaction.
///
/// # Errors
///
/// [`QueryError::UnsupportedFeature`] when the dialect has neither native
/// sequences nor the sequence table emulation enabled.
pub fn next_sequence_value(
	dialect: &dyn DialectHandler,
	schema: Option<&str>,
	sequence: &str,
) -> Result<Vec<String>> {
	let config = dialect.config();
	if config.emulates_sequences() {
		let table = dialect.quote_identifier(&config.settings().sequence_table_name);
		let name_col = dialect.quote_identifier(SEQUENCE_NAME_COLUMN);
		let value_col = dialect.quote_identifier(SEQUENCE_VALUE_COLUMN);
		let increment_col = dialect.quote_identifier(SEQUENCE_INCREMENT_COLUMN);
		let name = quote_text(sequence, dialect);
		return Ok(vec![
			format!(
				"UPDATE {table} SET {value_col} = {value_col} + {increment_col} WHERE {name_col} = {name}"
			),
			format!("SELECT {value_col} FROM {table} WHERE {name_col} = {name}"),
		]);
	}
	if !dialect.supports(Feature::Sequences) {
		return Err(QueryError::UnsupportedFeature {
			dialect: dialect.kind(),
			feature: Feature::Sequences,
		});
	}
	let name = dialect.qualify_identifier(schema, sequence);
	Ok(vec![dialect.fill_phrase(
		Phrase::SequenceNextValue,
		None,
		&[&name],
	)?])
}

//! Inline literal formatting.

use chrono::{NaiveDate, NaiveDateTime};

use super::Value;
use crate::dialect::{DialectHandler, Phrase};
use crate::error::{QueryError, Result};
use crate::types::DataType;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Renders `value` as an inline SQL literal for `dialect`.
///
/// `hint` is the data type of the column the value is compared with or
/// assigned to. Text holding an ISO date is rendered as a date literal
/// when the hint is temporal; otherwise the value's own type decides.
///
/// # Errors
///
/// - [`QueryError::MalformedExpression`] for non-finite floats and binary values,
///   which can only travel as parameters
/// - [`QueryError::MissingPhrase`] if the dialect lacks a literal template
pub fn format_literal(value: &Value, hint: DataType, dialect: &dyn DialectHandler) -> Result<String> {
	match value {
		Value::Null => Ok(dialect.phrase(Phrase::Null)?.to_string()),
		Value::Bool(true) => Ok(dialect.phrase(Phrase::BooleanTrue)?.to_string()),
		Value::Bool(false) => Ok(dialect.phrase(Phrase::BooleanFalse)?.to_string()),
		Value::Int(v) => Ok(v.to_string()),
		Value::Float(v) if !v.is_finite() => Err(QueryError::malformed(
			v,
			"non-finite numbers have no SQL literal",
		)),
		Value::Float(v) => Ok(v.to_string()),
		Value::Decimal(v) => Ok(v.to_string()),
		Value::Text(s) => match hint {
			DataType::Date => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
				Ok(date) => date_literal(&date, dialect),
				Err(_) => Ok(quote_text(s, dialect)),
			},
			DataType::DateTime => match parse_date_time(s) {
				Some(dt) => date_time_literal(&dt, dialect),
				None => Ok(quote_text(s, dialect)),
			},
			_ => Ok(quote_text(s, dialect)),
		},
		Value::Date(d) => date_literal(d, dialect),
		Value::DateTime(dt) => date_time_literal(dt, dialect),
		Value::Uuid(u) => Ok(quote_text(&u.to_string(), dialect)),
		Value::Bytes(b) => Err(QueryError::malformed(
			format!("<{} bytes>", b.len()),
			"binary values must be bound as parameters",
		)),
		Value::CurrentDate => Ok(dialect.phrase(Phrase::CurrentDate)?.to_string()),
		Value::CurrentDateTime => Ok(dialect.phrase(Phrase::CurrentDateTime)?.to_string()),
	}
}

/// Wraps text in single quotes, doubling embedded quotes.
///
/// Dialects that treat backslash as an escape character also get
/// backslashes doubled.
pub fn quote_text(text: &str, dialect: &dyn DialectHandler) -> String {
	let mut quoted = String::with_capacity(text.len() + 2);
	quoted.push('\'');
	for ch in text.chars() {
		match ch {
			'\'' => quoted.push_str("''"),
			'\\' if dialect.config().escapes_backslash() => quoted.push_str("\\\\"),
			_ => quoted.push(ch),
		}
	}
	quoted.push('\'');
	quoted
}

fn date_literal(date: &NaiveDate, dialect: &dyn DialectHandler) -> Result<String> {
	let text = date.format(DATE_FORMAT).to_string();
	dialect.fill_phrase(Phrase::DateTemplate, None, &[&text])
}

fn date_time_literal(dt: &NaiveDateTime, dialect: &dyn DialectHandler) -> Result<String> {
	let text = dt.format(DATE_TIME_FORMAT).to_string();
	dialect.fill_phrase(Phrase::DateTimeTemplate, None, &[&text])
}

fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
	["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
		.iter()
		.find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
		.or_else(|| {
			NaiveDate::parse_from_str(text, DATE_FORMAT)
				.ok()
				.and_then(|d| d.and_hms_opt(0, 0, 0))
		})
}

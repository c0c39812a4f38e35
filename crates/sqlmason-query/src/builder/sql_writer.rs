//! SQL text accumulator.
//!
//! [`SqlWriter`] collects the SQL text of one statement together with the
//! bind parameters in placeholder order.

use crate::error::Result;
use crate::value::{Value, Values};

/// SQL Writer for constructing SQL strings
///
/// # Examples
///
/// ```rust
/// use sqlmason_query::{SqlWriter, Value};
///
/// let mut writer = SqlWriter::new();
/// writer.push("SELECT");
/// writer.push_keyword("NAME");
/// writer.push_keyword("FROM");
/// writer.push_keyword("T WHERE ID =");
/// writer.push_space();
/// writer.push_param(Value::from(7), |i| Ok(format!("${i}"))).unwrap();
///
/// let (sql, values) = writer.finish();
/// assert_eq!(sql, "SELECT NAME FROM T WHERE ID = $1");
/// assert_eq!(values.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SqlWriter {
	sql: String,
	values: Values,
	/// Index of the next placeholder, 1-based
	param_index: usize,
}

impl SqlWriter {
	pub fn new() -> Self {
		Self {
			sql: String::new(),
			values: Values::default(),
			param_index: 1,
		}
	}

	pub fn push(&mut self, s: &str) {
		self.sql.push_str(s);
	}

	/// Push a space unless the text is empty or already ends with one.
	pub fn push_space(&mut self) {
		if !self.sql.is_empty() && !self.sql.ends_with(' ') {
			self.sql.push(' ');
		}
	}

	/// Push a keyword preceded by a space.
	pub fn push_keyword(&mut self, keyword: &str) {
		self.push_space();
		self.sql.push_str(keyword);
	}

	pub fn push_identifier<F>(&mut self, ident: &str, escape_fn: F)
	where
		F: FnOnce(&str) -> String,
	{
		self.sql.push_str(&escape_fn(ident));
	}

	pub fn push_comma(&mut self) {
		self.sql.push_str(", ");
	}

	/// Push a placeholder for `value` and collect the value.
	///
	/// `format_fn` receives the 1-based parameter index.
	pub fn push_param<F>(&mut self, value: Value, format_fn: F) -> Result<usize>
	where
		F: FnOnce(usize) -> Result<String>,
	{
		let index = self.param_index;
		self.sql.push_str(&format_fn(index)?);
		self.values.push(value);
		self.param_index += 1;
		Ok(index)
	}

	/// Push a list of items with a separator, stopping at the first error.
	pub fn push_list<I, T, F>(&mut self, items: I, separator: &str, mut f: F) -> Result<()>
	where
		I: IntoIterator<Item = T>,
		F: FnMut(&mut Self, T) -> Result<()>,
	{
		let mut first = true;
		for item in items {
			if !first {
				self.sql.push_str(separator);
			}
			f(self, item)?;
			first = false;
		}
		Ok(())
	}

	pub fn sql(&self) -> &str {
		&self.sql
	}

	pub fn values(&self) -> &Values {
		&self.values
	}

	pub fn param_index(&self) -> usize {
		self.param_index
	}

	pub fn is_empty(&self) -> bool {
		self.sql.is_empty()
	}

	pub fn len(&self) -> usize {
		self.sql.len()
	}

	/// Consume writer and return (SQL, Values)
	pub fn finish(self) -> (String, Values) {
		(self.sql, self.values)
	}
}

impl Default for SqlWriter {
	fn default() -> Self {
		Self::new()
	}
}

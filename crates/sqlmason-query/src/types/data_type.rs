//! Abstract column data types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Database-independent data type of a column or expression.
///
/// Dialects map each variant to a native column type; see
/// [`DialectHandler::native_type`](crate::dialect::DialectHandler::native_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
	/// Type not known, e.g. an untyped constant
	Unknown,
	/// Integer number; the size selects the storage width in bytes
	Integer,
	/// Integer generated by the database on insert
	AutoInc,
	/// Variable length text
	Text,
	/// Calendar date
	Date,
	/// Date with time of day
	DateTime,
	/// Fixed length text
	Char,
	/// Floating point number
	Float,
	/// Exact decimal; the size carries precision and scale
	Decimal,
	/// Boolean flag
	Bool,
	/// Large text object
	Clob,
	/// Large binary object
	Blob,
	/// Globally unique identifier
	UniqueId,
}

impl DataType {
	/// Every data type, in declaration order.
	pub const ALL: [DataType; 13] = [
		Self::Unknown,
		Self::Integer,
		Self::AutoInc,
		Self::Text,
		Self::Date,
		Self::DateTime,
		Self::Char,
		Self::Float,
		Self::Decimal,
		Self::Bool,
		Self::Clob,
		Self::Blob,
		Self::UniqueId,
	];

	/// Returns the upper-case name used in configuration files.
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Unknown => "UNKNOWN",
			Self::Integer => "INTEGER",
			Self::AutoInc => "AUTO_INC",
			Self::Text => "TEXT",
			Self::Date => "DATE",
			Self::DateTime => "DATE_TIME",
			Self::Char => "CHAR",
			Self::Float => "FLOAT",
			Self::Decimal => "DECIMAL",
			Self::Bool => "BOOL",
			Self::Clob => "CLOB",
			Self::Blob => "BLOB",
			Self::UniqueId => "UNIQUE_ID",
		}
	}

	/// Looks a data type up by its [`as_str`](Self::as_str) name, ignoring case.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|dt| dt.as_str().eq_ignore_ascii_case(name))
	}

	#[must_use]
	pub fn is_numeric(&self) -> bool {
		matches!(
			self,
			Self::Integer | Self::AutoInc | Self::Float | Self::Decimal
		)
	}

	#[must_use]
	pub fn is_text(&self) -> bool {
		matches!(self, Self::Text | Self::Char | Self::Clob)
	}

	#[must_use]
	pub fn is_temporal(&self) -> bool {
		matches!(self, Self::Date | Self::DateTime)
	}
}

impl fmt::Display for DataType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// Serialized by name so data types can key TOML tables.
impl Serialize for DataType {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for DataType {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let name = String::deserialize(deserializer)?;
		Self::from_name(&name)
			.ok_or_else(|| serde::de::Error::custom(format!("unknown data type `{name}`")))
	}
}

/// Size of a column.
///
/// `precision` is the length for text types, the byte width for integers
/// and the number of digits for decimals. A precision of zero or less
/// means "use the dialect default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColumnSize {
	pub precision: i32,
	pub scale: i32,
}

impl ColumnSize {
	pub const fn new(precision: i32) -> Self {
		Self {
			precision,
			scale: 0,
		}
	}

	pub const fn decimal(precision: i32, scale: i32) -> Self {
		Self { precision, scale }
	}

	/// Returns `true` when the dialect default should be used.
	#[must_use]
	pub fn is_default(&self) -> bool {
		self.precision <= 0
	}

	/// Replaces a default precision with `minimum`.
	#[must_use]
	pub fn or_minimum(self, minimum: i32) -> Self {
		if self.is_default() {
			Self {
				precision: minimum,
				scale: self.scale.max(0),
			}
		} else {
			self
		}
	}
}

impl From<i32> for ColumnSize {
	fn from(precision: i32) -> Self {
		Self::new(precision)
	}
}

impl From<(i32, i32)> for ColumnSize {
	fn from((precision, scale): (i32, i32)) -> Self {
		Self::decimal(precision, scale)
	}
}

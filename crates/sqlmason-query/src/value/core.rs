//! Core Value enum definition.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::types::DataType;

/// A constant used in an expression or bound as a parameter.
///
/// ## Example
///
/// ```rust
/// use sqlmason_query::Value;
///
/// let id = Value::from(42);
/// let name = Value::from("Smith");
/// let missing = Value::from(Option::<i32>::None);
/// assert!(missing.is_null());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// SQL NULL
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Decimal(Decimal),
	Text(String),
	Date(NaiveDate),
	DateTime(NaiveDateTime),
	Uuid(Uuid),
	/// Binary data; always bound as a parameter
	Bytes(Vec<u8>),
	/// The database's current date
	CurrentDate,
	/// The database's current date and time
	CurrentDateTime,
}

impl Value {
	/// Returns `true` if this value is null.
	#[must_use]
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the data type this value naturally maps to.
	#[must_use]
	pub fn data_type(&self) -> DataType {
		match self {
			Self::Null => DataType::Unknown,
			Self::Bool(_) => DataType::Bool,
			Self::Int(_) => DataType::Integer,
			Self::Float(_) => DataType::Float,
			Self::Decimal(_) => DataType::Decimal,
			Self::Text(_) => DataType::Text,
			Self::Date(_) | Self::CurrentDate => DataType::Date,
			Self::DateTime(_) | Self::CurrentDateTime => DataType::DateTime,
			Self::Uuid(_) => DataType::UniqueId,
			Self::Bytes(_) => DataType::Blob,
		}
	}
}

macro_rules! impl_from_integer {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(v: $ty) -> Self {
					Self::Int(i64::from(v))
				}
			}
		)*
	};
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Self::Float(f64::from(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<Decimal> for Value {
	fn from(v: Decimal) -> Self {
		Self::Decimal(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Self::Text(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Self::Text(v)
	}
}

impl From<&String> for Value {
	fn from(v: &String) -> Self {
		Self::Text(v.clone())
	}
}

impl From<NaiveDate> for Value {
	fn from(v: NaiveDate) -> Self {
		Self::Date(v)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(v: NaiveDateTime) -> Self {
		Self::DateTime(v)
	}
}

impl From<Uuid> for Value {
	fn from(v: Uuid) -> Self {
		Self::Uuid(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Self {
		Self::Bytes(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map_or(Self::Null, Into::into)
	}
}

/// Ordered list of bind parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Values(pub Vec<Value>);

impl Values {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, value: Value) {
		self.0.push(value);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.0.iter()
	}

	pub fn into_inner(self) -> Vec<Value> {
		self.0
	}
}

impl IntoIterator for Values {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Values {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

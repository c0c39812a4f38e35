//! Sequences.

/// A named number generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
	name: String,
	start: i64,
	increment: i64,
}

impl Sequence {
	pub fn new(name: impl Into<String>, start: i64, increment: i64) -> Self {
		Self {
			name: name.into(),
			start,
			increment,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn start(&self) -> i64 {
		self.start
	}

	pub fn increment(&self) -> i64 {
		self.increment
	}
}

//! Ordered DDL statement lists.

use std::fmt;

/// Statements to run in order, without trailing separators.
///
/// Statements are numbered from zero so a driver that stops on a failing
/// statement can report its position.
///
/// # Examples
///
/// ```rust
/// use sqlmason_ddl::DdlScript;
///
/// let mut script = DdlScript::new();
/// script.push("DROP VIEW V");
/// script.push("DROP TABLE T");
///
/// let positions: Vec<(usize, &str)> = script.iter().collect();
/// assert_eq!(positions[1], (1, "DROP TABLE T"));
/// assert_eq!(script.to_string(), "DROP VIEW V;\nDROP TABLE T;\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DdlScript {
	statements: Vec<String>,
}

impl DdlScript {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, statement: impl Into<String>) {
		self.statements.push(statement.into());
	}

	/// Appends all statements of `other`.
	pub fn append(&mut self, other: DdlScript) {
		self.statements.extend(other.statements);
	}

	pub fn statements(&self) -> &[String] {
		&self.statements
	}

	/// Statement at `position`, if any.
	pub fn get(&self, position: usize) -> Option<&str> {
		self.statements.get(position).map(String::as_str)
	}

	/// Iterates `(position, statement)` pairs in execution order.
	pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
		self.statements
			.iter()
			.enumerate()
			.map(|(i, s)| (i, s.as_str()))
	}

	pub fn len(&self) -> usize {
		self.statements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.statements.is_empty()
	}

	pub fn into_inner(self) -> Vec<String> {
		self.statements
	}
}

impl IntoIterator for DdlScript {
	type Item = String;
	type IntoIter = std::vec::IntoIter<String>;

	fn into_iter(self) -> Self::IntoIter {
		self.statements.into_iter()
	}
}

impl fmt::Display for DdlScript {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for statement in &self.statements {
			writeln!(f, "{statement};")?;
		}
		Ok(())
	}
}

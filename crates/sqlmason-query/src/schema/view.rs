//! Views.

use std::sync::Arc;

use super::{AsSource, TableColumn, TableIdent};
use crate::command::Command;
use crate::error::Result;

/// A named query.
///
/// The view's columns mirror the select list of its defining command and
/// can be selected like table columns.
#[derive(Debug, Clone)]
pub struct View {
	ident: Arc<TableIdent>,
	command: Command,
	columns: Vec<TableColumn>,
}

impl View {
	pub(crate) fn new(ident: Arc<TableIdent>, command: Command) -> Result<Self> {
		let columns = command.output_columns(&ident)?;
		Ok(Self {
			ident,
			command,
			columns,
		})
	}

	pub fn name(&self) -> &str {
		self.ident.name()
	}

	pub fn ident(&self) -> &Arc<TableIdent> {
		&self.ident
	}

	pub fn command(&self) -> &Command {
		&self.command
	}

	pub fn columns(&self) -> &[TableColumn] {
		&self.columns
	}

	pub fn column(&self, name: &str) -> Result<TableColumn> {
		self.columns
			.iter()
			.find(|c| c.name().eq_ignore_ascii_case(name))
			.cloned()
			.ok_or_else(|| crate::error::QueryError::ObjectNotFound {
				kind: "column",
				name: format!("{}.{}", self.name(), name),
			})
	}
}

impl AsSource for View {
	fn source(&self) -> Arc<TableIdent> {
		Arc::clone(&self.ident)
	}
}

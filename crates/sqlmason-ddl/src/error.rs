//! Error types for DDL generation.

use sqlmason_query::QueryError;

use crate::generator::DdlAction;

/// Errors raised while generating a DDL script.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DdlError {
	/// Rendering a name, type or view query failed.
	#[error(transparent)]
	Query(#[from] QueryError),

	/// The action cannot be expressed for this object on the target dialect.
	#[error("{action} is not supported for {object}")]
	UnsupportedAction {
		action: DdlAction,
		object: &'static str,
	},
}

impl DdlError {
	pub(crate) fn unsupported(action: DdlAction, object: &'static str) -> Self {
		Self::UnsupportedAction { action, object }
	}
}

/// Result alias used throughout the DDL crate.
pub type Result<T> = std::result::Result<T, DdlError>;

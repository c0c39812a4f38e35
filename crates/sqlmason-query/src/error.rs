//! Error types for expression building and SQL rendering.

use crate::dialect::{DialectKind, Feature, Phrase};
use crate::types::DataType;

/// Errors raised while building commands or rendering them into SQL.
///
/// Rendering is all-or-nothing: when any of these is returned no partial
/// SQL text escapes the builder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
	/// An expression node cannot be rendered as constructed.
	#[error("Malformed expression `{node}`: {reason}")]
	MalformedExpression { node: String, reason: String },

	/// A column belongs to a database that is neither the command's own nor attached to it.
	#[error("Column `{column}` is not bound to database `{database}` or any attached database")]
	UnboundColumn { column: String, database: String },

	/// Two select-list entries share the same output alias.
	#[error("Duplicate select alias `{alias}`")]
	DuplicateAlias { alias: String },

	/// The dialect can only skip rows of an ordered result.
	#[error("{dialect} requires an ORDER BY clause when skipping rows")]
	OffsetRequiresOrderBy { dialect: DialectKind },

	/// The command cannot produce the requested statement.
	#[error("Invalid command: {reason}")]
	InvalidCommand { reason: String },

	/// A schema object was looked up by name and not found.
	#[error("{kind} `{name}` not found")]
	ObjectNotFound { kind: &'static str, name: String },

	/// A schema object with the same name already exists.
	#[error("{kind} `{name}` is already defined")]
	DuplicateObject { kind: &'static str, name: String },

	/// The dialect has no template for a phrase.
	#[error("Phrase {phrase} is not mapped for {dialect}")]
	MissingPhrase { dialect: DialectKind, phrase: Phrase },

	/// The dialect has no native type for a data type.
	#[error("Data type {data_type} has no native type mapping for {dialect}")]
	MissingTypeMapping {
		dialect: DialectKind,
		data_type: DataType,
	},

	/// The dialect lacks a capability the command needs.
	#[error("{feature:?} is not supported by {dialect}")]
	UnsupportedFeature { dialect: DialectKind, feature: Feature },

	/// Dialect settings could not be parsed or applied.
	#[error("Invalid dialect settings: {0}")]
	InvalidSettings(String),
}

impl QueryError {
	pub(crate) fn malformed(node: impl std::fmt::Display, reason: impl Into<String>) -> Self {
		Self::MalformedExpression {
			node: node.to_string(),
			reason: reason.into(),
		}
	}

	pub(crate) fn invalid_command(reason: impl Into<String>) -> Self {
		Self::InvalidCommand {
			reason: reason.into(),
		}
	}
}

/// Result alias used throughout the query crate.
pub type Result<T> = std::result::Result<T, QueryError>;

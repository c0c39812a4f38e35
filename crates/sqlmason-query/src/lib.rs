//! # sqlmason-query
//!
//! Database-agnostic SQL expressions rendered into dialect-specific SQL.
//!
//! Queries are described as trees of typed nodes bound to schema objects
//! ([`Database`], [`Table`], [`TableColumn`]). A [`Command`] collects the
//! select list, joins, constraints, grouping, ordering and paging, and the
//! [`SqlBuilder`] renders it through a [`DialectHandler`] that knows the
//! phrases, literal formats and type mappings of one SQL dialect.
//!
//! ## Architecture
//!
//! - [`value`]: [`Value`] and the literal formatter
//! - [`types`]: [`DataType`], [`ColumnSize`] and the operator enums
//! - [`schema`]: databases, tables, columns, indexes, relations, views and sequences
//! - [`expr`]: column expressions, operands and compare expressions
//! - [`command`]: the [`Command`] statement model
//! - [`dialect`]: the [`DialectHandler`] trait and the six built-in dialects
//! - [`builder`]: the [`SqlBuilder`] and the [`render`] entry points
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlmason_query::prelude::*;
//!
//! let mut db = Database::new("HR");
//! let mut employees = db.create_table("EMPLOYEES");
//! let id = employees.add_column("EMPLOYEE_ID", DataType::AutoInc, 0, true).unwrap();
//! let name = employees.add_column("LASTNAME", DataType::Text, 40, true).unwrap();
//! db.add_table(employees).unwrap();
//!
//! let mut cmd = db.command();
//! cmd.select(&id).select(&name).and_where(name.like("S%"));
//!
//! let (sql, params) = render(&cmd, &PostgresDialect::new()).unwrap();
//! assert_eq!(sql, "SELECT EMPLOYEE_ID, LASTNAME FROM EMPLOYEES WHERE LASTNAME LIKE 'S%'");
//! assert!(params.is_empty());
//! ```

pub mod builder;
pub mod command;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod schema;
pub mod types;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use builder::{SqlBuilder, SqlWriter, StatementKind, render, render_statement};
pub use command::{Command, DerivedTable, Join, OrderBy, SetExpr};
pub use dialect::{
	DialectConfig, DialectHandler, DialectKind, DialectSettings, Feature, HsqlDialect,
	IdentityStyle, MySqlDialect, OracleDialect, PagingStyle, Phrase, PostgresDialect,
	SqlServerDialect, SqliteDialect, next_sequence_value,
};
pub use error::{QueryError, Result};
pub use expr::{
	CaseExpr, ColumnCompare, ColumnExpr, CompareExpr, FunctionExpr, Operand, RenderContext,
	RenderSql,
};
pub use schema::{
	AsSource, ColumnReference, ColumnSpec, Database, DatabaseId, DeleteAction, Index, Options,
	Relation, Sequence, SourceKind, Table, TableColumn, TableIdent, View,
};
pub use types::{ArithOperator, CmpOperator, ColumnSize, DataType, JoinType, Order};
pub use value::{Value, Values, format_literal};

/// Convenient re-exports for building and rendering commands.
pub mod prelude {
	pub use crate::builder::{StatementKind, render, render_statement};
	pub use crate::command::Command;
	pub use crate::dialect::{
		DialectHandler, DialectSettings, HsqlDialect, MySqlDialect, OracleDialect,
		PostgresDialect, SqlServerDialect, SqliteDialect,
	};
	pub use crate::error::{QueryError, Result};
	pub use crate::expr::{ColumnExpr, CompareExpr, Operand};
	pub use crate::schema::{ColumnSpec, Database, Table, TableColumn};
	pub use crate::types::{DataType, JoinType, Order};
	pub use crate::value::Value;
}

//! # sqlmason
//!
//! Database-agnostic SQL: build a statement once as an expression tree over
//! schema objects, then render it for Oracle, SQL Server, PostgreSQL,
//! HSQLDB, MySQL or SQLite.
//!
//! ## Feature Flags
//!
//! - `full` (default) - everything below
//! - `ddl` - CREATE, ALTER and DROP scripts for schema objects
//! - `minimal` - query rendering only
//!
//! Query rendering is always available.
//!
//! ## Quick Example
//!
//! ```rust
//! use sqlmason::prelude::*;
//!
//! let mut db = Database::new("HR");
//! let mut employees = db.create_table("EMPLOYEES");
//! let last_name = employees.add_column("LASTNAME", DataType::Text, 40, true).unwrap();
//! let retired = employees.add_column("RETIRED", DataType::Bool, 0, true).unwrap();
//! db.add_table(employees).unwrap();
//!
//! let mut cmd = db.command();
//! cmd.select(&last_name).and_where(retired.eq(false));
//!
//! let (sql, _) = render(&cmd, &SqlServerDialect::new()).unwrap();
//! assert_eq!(sql, "SELECT LASTNAME FROM EMPLOYEES WHERE RETIRED = 0");
//! ```

pub mod query;

#[cfg(feature = "ddl")]
pub mod ddl;

pub use sqlmason_query::{
	Command, Database, DialectHandler, DialectKind, DialectSettings, QueryError, StatementKind,
	Table, TableColumn, render, render_statement,
};

#[cfg(feature = "ddl")]
pub use sqlmason_ddl::{DdlAction, DdlError, DdlGenerator, DdlScript, SchemaObject, render_ddl};

/// Everything needed to describe a schema, build commands and render them.
pub mod prelude {
	pub use sqlmason_query::prelude::*;

	#[cfg(feature = "ddl")]
	pub use sqlmason_ddl::{DdlAction, DdlGenerator, DdlScript, SchemaObject, render_ddl};
}

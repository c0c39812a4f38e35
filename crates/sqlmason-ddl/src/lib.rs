//! # sqlmason-ddl
//!
//! CREATE, ALTER and DROP scripts for the schema objects of
//! [`sqlmason_query`].
//!
//! A [`DdlGenerator`] is bound to one [`DialectHandler`] and turns a
//! [`SchemaObject`] plus a [`DdlAction`] into a [`DdlScript`]: the ordered
//! statements a migration driver runs one by one.
//!
//! Creating a whole database follows a strict order so that every
//! statement only refers to objects created before it:
//!
//! 1. the schema, where the dialect supports schemas
//! 2. sequences, or the sequence table emulating them
//! 3. tables, primary keys inline
//! 4. secondary indexes
//! 5. foreign key relations
//! 6. views
//!
//! Dropping a database runs the same steps in reverse.
//!
//! ## Example
//!
//! ```rust
//! use sqlmason_ddl::{DdlAction, DdlGenerator, SchemaObject};
//! use sqlmason_query::{DataType, Database, HsqlDialect};
//!
//! let mut db = Database::new("HR");
//! let mut employees = db.create_table("EMPLOYEES");
//! employees.add_column("EMPLOYEE_ID", DataType::AutoInc, 0, true).unwrap();
//! employees.add_column("LASTNAME", DataType::Text, 40, true).unwrap();
//! db.add_table(employees).unwrap();
//!
//! let dialect = HsqlDialect::new();
//! let script = DdlGenerator::new(&dialect)
//! 	.generate(SchemaObject::Table(db.table("EMPLOYEES").unwrap()), DdlAction::Create)
//! 	.unwrap();
//!
//! assert_eq!(
//! 	script.statements(),
//! 	[
//! 		"CREATE SEQUENCE EMPLOYEES_EMPLOYEE_ID_SEQ START WITH 1 INCREMENT BY 1",
//! 		"CREATE TABLE EMPLOYEES (EMPLOYEE_ID INTEGER NOT NULL, LASTNAME VARCHAR(40) NOT NULL)",
//! 	]
//! );
//! ```

pub mod error;
pub mod generator;
pub mod script;

pub use error::{DdlError, Result};
pub use generator::{DdlAction, DdlGenerator, SchemaObject, render_ddl};
pub use script::DdlScript;

pub use sqlmason_query::DialectHandler;

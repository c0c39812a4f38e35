//! Expression trees, commands, schema objects and dialects.
//!
//! # Examples
//!
//! ```rust
//! use sqlmason::query::{DialectHandler, Phrase, PostgresDialect};
//!
//! let dialect = PostgresDialect::new();
//! assert_eq!(dialect.phrase(Phrase::FuncUpper).unwrap(), "UPPER(?)");
//! ```

pub use sqlmason_query::*;

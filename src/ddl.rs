//! DDL script generation.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "ddl")]
//! # {
//! use sqlmason::ddl::DdlScript;
//!
//! let mut script = DdlScript::new();
//! script.push("DROP TABLE EMPLOYEES");
//! assert_eq!(script.to_string(), "DROP TABLE EMPLOYEES;\n");
//! # }
//! ```

pub use sqlmason_ddl::*;

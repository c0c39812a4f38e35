//! Values carried by expressions and the literal formatter.
//!
//! - [`Value`]: a constant in an expression or a bind parameter
//! - [`Values`]: the ordered parameter list produced by rendering
//! - [`format_literal`]: renders a value as an inline SQL literal for a dialect

mod core;
mod format;

pub use self::core::{Value, Values};
pub use self::format::{format_literal, quote_text};

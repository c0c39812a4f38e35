//! Data types, column sizes and SQL operators.

mod data_type;
mod operators;

pub use data_type::{ColumnSize, DataType};
pub use operators::{ArithOperator, CmpOperator, JoinType, OperatorFamily, Order};

//! SQL operators for expressions.
//!
//! - [`CmpOperator`]: comparison operators of a column constraint
//! - [`ArithOperator`]: arithmetic between column expressions
//! - [`JoinType`]: join kinds
//! - [`Order`]: sort direction

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOperator {
	/// Equal (=)
	Eq,
	/// Not equal (<>)
	Ne,
	/// Less than (<)
	Lt,
	/// Less than or equal (<=)
	Le,
	/// Greater than (>)
	Gt,
	/// Greater than or equal (>=)
	Ge,
	/// LIKE
	Like,
	/// NOT LIKE
	NotLike,
	/// IN
	In,
	/// NOT IN
	NotIn,
	/// BETWEEN
	Between,
	/// NOT BETWEEN
	NotBetween,
	/// IS NULL
	IsNull,
	/// IS NOT NULL
	NotNull,
}

/// Groups of operators that constrain a column in the same way.
///
/// Adding a constraint to a command replaces an existing constraint on the
/// same column whose operator belongs to the same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
	/// `=`, `<>`, `IN`, `NOT IN`, `IS NULL`, `IS NOT NULL`
	Identity,
	/// `LIKE`, `NOT LIKE`
	Pattern,
	/// `BETWEEN`, `NOT BETWEEN`
	Range,
	/// `>`, `>=`
	LowerBound,
	/// `<`, `<=`
	UpperBound,
}

impl CmpOperator {
	/// Returns the SQL representation of this operator.
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Ne => "<>",
			Self::Lt => "<",
			Self::Le => "<=",
			Self::Gt => ">",
			Self::Ge => ">=",
			Self::Like => "LIKE",
			Self::NotLike => "NOT LIKE",
			Self::In => "IN",
			Self::NotIn => "NOT IN",
			Self::Between => "BETWEEN",
			Self::NotBetween => "NOT BETWEEN",
			Self::IsNull => "IS NULL",
			Self::NotNull => "IS NOT NULL",
		}
	}

	#[must_use]
	pub fn family(&self) -> OperatorFamily {
		match self {
			Self::Eq | Self::Ne | Self::In | Self::NotIn | Self::IsNull | Self::NotNull => {
				OperatorFamily::Identity
			}
			Self::Like | Self::NotLike => OperatorFamily::Pattern,
			Self::Between | Self::NotBetween => OperatorFamily::Range,
			Self::Gt | Self::Ge => OperatorFamily::LowerBound,
			Self::Lt | Self::Le => OperatorFamily::UpperBound,
		}
	}

	/// Returns `true` for `IN`/`NOT IN`.
	#[must_use]
	pub fn is_membership(&self) -> bool {
		matches!(self, Self::In | Self::NotIn)
	}

	/// Returns `true` for `BETWEEN`/`NOT BETWEEN`.
	#[must_use]
	pub fn is_range(&self) -> bool {
		matches!(self, Self::Between | Self::NotBetween)
	}

	/// Returns `true` for the operators that take no right-hand operand.
	#[must_use]
	pub fn is_unary(&self) -> bool {
		matches!(self, Self::IsNull | Self::NotNull)
	}
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOperator {
	Add,
	Sub,
	Mul,
	Div,
}

impl ArithOperator {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Add => "+",
			Self::Sub => "-",
			Self::Mul => "*",
			Self::Div => "/",
		}
	}
}

/// Join kinds supported by every dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinType {
	#[default]
	Inner,
	Left,
	Right,
}

impl JoinType {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Inner => "INNER JOIN",
			Self::Left => "LEFT JOIN",
			Self::Right => "RIGHT JOIN",
		}
	}
}

/// Sort direction of an ORDER BY entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
	#[default]
	Asc,
	Desc,
}

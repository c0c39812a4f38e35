//! Property-based tests for condition rendering and constraint folding

use proptest::prelude::*;

use sqlmason_query::prelude::*;
use sqlmason_query::{CmpOperator, RenderContext, RenderSql, SqlBuilder};

mod common;
use common::{HrSchema, all_dialects, hr};

const LEAVES: i32 = 6;

/// Boolean tree mirrored into a [`CompareExpr`]; each leaf `n` stands for
/// `DEPARTMENT_ID = n`.
#[derive(Debug, Clone)]
enum Condition {
	Leaf(i32),
	And(Box<Condition>, Box<Condition>),
	Or(Box<Condition>, Box<Condition>),
	Not(Box<Condition>),
	Group(Box<Condition>),
}

impl Condition {
	fn to_expr(&self, column: &TableColumn) -> CompareExpr {
		match self {
			Self::Leaf(n) => column.eq(*n),
			Self::And(l, r) => l.to_expr(column).and(r.to_expr(column)),
			Self::Or(l, r) => l.to_expr(column).or(r.to_expr(column)),
			Self::Not(inner) => inner.to_expr(column).not(),
			Self::Group(inner) => inner.to_expr(column).parenthesis(),
		}
	}

	fn eval(&self, truth: &[bool]) -> bool {
		match self {
			Self::Leaf(n) => truth[*n as usize],
			Self::And(l, r) => l.eval(truth) && r.eval(truth),
			Self::Or(l, r) => l.eval(truth) || r.eval(truth),
			Self::Not(inner) => !inner.eval(truth),
			Self::Group(inner) => inner.eval(truth),
		}
	}
}

fn condition() -> impl Strategy<Value = Condition> {
	(0..LEAVES)
		.prop_map(Condition::Leaf)
		.prop_recursive(5, 32, 2, |inner| {
			prop_oneof![
				(inner.clone(), inner.clone())
					.prop_map(|(l, r)| Condition::And(Box::new(l), Box::new(r))),
				(inner.clone(), inner.clone())
					.prop_map(|(l, r)| Condition::Or(Box::new(l), Box::new(r))),
				inner.clone().prop_map(|c| Condition::Not(Box::new(c))),
				inner.prop_map(|c| Condition::Group(Box::new(c))),
			]
		})
}

/// Evaluates rendered SQL with the usual precedence: NOT, then AND, then OR.
struct SqlEvaluator<'a> {
	tokens: Vec<String>,
	pos: usize,
	truth: &'a [bool],
}

impl<'a> SqlEvaluator<'a> {
	fn new(sql: &str, truth: &'a [bool]) -> Self {
		let tokens = sql
			.replace('(', " ( ")
			.replace(')', " ) ")
			.split_whitespace()
			.map(str::to_string)
			.collect();
		Self {
			tokens,
			pos: 0,
			truth,
		}
	}

	fn evaluate(mut self) -> bool {
		let value = self.or_expr();
		assert_eq!(self.pos, self.tokens.len(), "trailing tokens in {:?}", self.tokens);
		value
	}

	fn peek(&self) -> Option<&str> {
		self.tokens.get(self.pos).map(String::as_str)
	}

	fn next(&mut self) -> &str {
		self.pos += 1;
		&self.tokens[self.pos - 1]
	}

	fn or_expr(&mut self) -> bool {
		let mut value = self.and_expr();
		while self.peek() == Some("OR") {
			self.next();
			let right = self.and_expr();
			value = value || right;
		}
		value
	}

	fn and_expr(&mut self) -> bool {
		let mut value = self.unary();
		while self.peek() == Some("AND") {
			self.next();
			let right = self.unary();
			value = value && right;
		}
		value
	}

	fn unary(&mut self) -> bool {
		match self.peek() {
			Some("NOT") => {
				self.next();
				!self.unary()
			}
			Some("(") => {
				self.next();
				let value = self.or_expr();
				assert_eq!(self.next(), ")");
				value
			}
			_ => {
				assert_eq!(self.next(), "DEPARTMENT_ID");
				assert_eq!(self.next(), "=");
				let leaf: usize = self.next().parse().unwrap();
				self.truth[leaf]
			}
		}
	}
}

fn render_condition(expr: &CompareExpr, dialect: &dyn DialectHandler) -> String {
	let mut builder = SqlBuilder::new(dialect);
	expr.render_into(&mut builder, RenderContext::DEFAULT).unwrap();
	builder.finish().0
}

const BINARY_OPERATORS: [CmpOperator; 8] = [
	CmpOperator::Eq,
	CmpOperator::Ne,
	CmpOperator::Lt,
	CmpOperator::Le,
	CmpOperator::Gt,
	CmpOperator::Ge,
	CmpOperator::Like,
	CmpOperator::NotLike,
];

/// One WHERE term over a few employee columns, sometimes combined.
fn constraint(hr: &HrSchema, spec: &(usize, usize, i32, u8)) -> CompareExpr {
	let (column, op, value, shape) = *spec;
	let columns = [&hr.emp_dept, &hr.last_name, &hr.salary];
	let leaf = columns[column].cmp(BINARY_OPERATORS[op], value);
	match shape {
		0 => leaf.or(hr.retired.eq(true)),
		1 => leaf.and(hr.emp_id.gt(value)),
		_ => leaf,
	}
}

fn constraint_spec() -> impl Strategy<Value = (usize, usize, i32, u8)> {
	(0..3usize, 0..BINARY_OPERATORS.len(), -50..50i32, 0..4u8)
}

proptest! {
	/// Test rendered conditions keep the meaning of the tree they came from
	fn prop_rendered_condition_preserves_meaning(
		cond in condition(),
		truth in prop::collection::vec(any::<bool>(), LEAVES as usize),
	) {
		let hr = hr();
		let expr = cond.to_expr(&hr.emp_dept);

		for dialect in all_dialects() {
			let sql = render_condition(&expr, dialect.as_ref());
			let rendered = SqlEvaluator::new(&sql, &truth).evaluate();
			prop_assert_eq!(rendered, cond.eval(&truth), "{}", sql);
		}
	}

	/// Test a single comparison renders as column, operator and literal
	fn prop_column_compare_renders_operator(op in 0..BINARY_OPERATORS.len(), n in any::<i32>()) {
		let hr = hr();
		let op = BINARY_OPERATORS[op];
		let expr = hr.emp_dept.cmp(op, n);

		for dialect in all_dialects() {
			prop_assert_eq!(
				render_condition(&expr, dialect.as_ref()),
				format!("DEPARTMENT_ID {} {}", op.as_str(), n)
			);
		}
	}

	/// Test adding the same constraint twice leaves the command as after the first time
	fn prop_and_where_is_idempotent(
		prefix in prop::collection::vec(constraint_spec(), 0..6),
		spec in constraint_spec(),
	) {
		let hr = hr();
		let mut cmd = hr.db.command();
		cmd.select(&hr.last_name);
		for p in &prefix {
			cmd.and_where(constraint(&hr, p));
		}

		let mut once = cmd.clone();
		once.and_where(constraint(&hr, &spec));
		let mut twice = once.clone();
		twice.and_where(constraint(&hr, &spec));

		prop_assert_eq!(once, twice);
	}
}

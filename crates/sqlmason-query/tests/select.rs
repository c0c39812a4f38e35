//! SELECT rendering integration tests

use rstest::rstest;

use sqlmason_query::prelude::*;
use sqlmason_query::{CmpOperator, DialectKind};

mod common;
use common::{HrSchema, all_dialects, hr};

fn active_in_departments(hr: &HrSchema) -> Command {
	let mut cmd = hr.db.command();
	cmd.select(&hr.emp_id)
		.select(&hr.last_name)
		.and_where(hr.retired.eq(false))
		.and_where(hr.emp_dept.eq(3).or(hr.emp_dept.eq(5)));
	cmd
}

/// Test the same command on PostgreSQL renders boolean keywords
#[rstest]
fn test_postgres_select_with_or_group(hr: HrSchema) {
	let cmd = active_in_departments(&hr);

	let (sql, params) = render(&cmd, &PostgresDialect::new()).unwrap();

	assert_eq!(
		sql,
		"SELECT EMPLOYEE_ID, LASTNAME FROM EMPLOYEES WHERE RETIRED = FALSE AND (DEPARTMENT_ID = 3 OR DEPARTMENT_ID = 5)"
	);
	assert!(params.is_empty());
}

/// Test the same command on SQL Server renders booleans as bits
#[rstest]
fn test_sql_server_select_with_or_group(hr: HrSchema) {
	let cmd = active_in_departments(&hr);

	let (sql, _) = render(&cmd, &SqlServerDialect::new()).unwrap();

	assert_eq!(
		sql,
		"SELECT EMPLOYEE_ID, LASTNAME FROM EMPLOYEES WHERE RETIRED = 0 AND (DEPARTMENT_ID = 3 OR DEPARTMENT_ID = 5)"
	);
}

/// Test reserved identifiers are quoted with each dialect's quote characters
#[rstest]
fn test_reserved_identifiers_are_quoted() {
	let mut db = Database::new("SHOP");
	let mut order = db.create_table("ORDER");
	let key = order.add_column("KEY", DataType::Integer, 4, true).unwrap();
	let total = order.add_column("TOTAL", DataType::Decimal, (12, 2), false).unwrap();
	db.add_table(order).unwrap();

	let mut cmd = db.command();
	cmd.select(&key).select(&total).and_where(key.gt(100));

	assert_eq!(
		render(&cmd, &SqlServerDialect::new()).unwrap().0,
		"SELECT [KEY], TOTAL FROM [ORDER] WHERE [KEY] > 100"
	);
	assert_eq!(
		render(&cmd, &MySqlDialect::new()).unwrap().0,
		"SELECT `KEY`, TOTAL FROM `ORDER` WHERE `KEY` > 100"
	);
	assert_eq!(
		render(&cmd, &PostgresDialect::new()).unwrap().0,
		"SELECT \"KEY\", TOTAL FROM \"ORDER\" WHERE \"KEY\" > 100"
	);
}

/// Test rendering is deterministic for the same command and dialect
#[rstest]
fn test_rendering_is_deterministic(hr: HrSchema) {
	let mut cmd = hr.db.command();
	cmd.select(&hr.dep_name)
		.select(&hr.last_name)
		.select(hr.salary.sum().alias("PAYROLL"))
		.and_where(hr.emp_dept.eq(&hr.dep_id))
		.group_by(&hr.dep_name)
		.group_by(&hr.last_name)
		.order_by(&hr.dep_name, Order::Asc);

	for dialect in all_dialects() {
		let first = render(&cmd, dialect.as_ref()).unwrap();
		let second = render(&cmd.clone(), dialect.as_ref()).unwrap();
		assert_eq!(first, second, "{}", dialect.kind());
		assert!(first.0.contains("FROM DEPARTMENTS, EMPLOYEES"), "{}", first.0);
	}
}

/// Test left and right joins against the department table
#[rstest]
#[case(JoinType::Left, "LEFT JOIN")]
#[case(JoinType::Right, "RIGHT JOIN")]
#[case(JoinType::Inner, "INNER JOIN")]
fn test_join_kinds(hr: HrSchema, #[case] kind: JoinType, #[case] keyword: &str) {
	let mut cmd = hr.db.command();
	cmd.select(&hr.last_name)
		.select(&hr.dep_name)
		.join_on(&hr.emp_dept, &hr.dep_id, kind)
		.and_where(hr.dep_name.like("S%"));

	let (sql, _) = render(&cmd, &HsqlDialect::new()).unwrap();

	assert_eq!(
		sql,
		format!(
			"SELECT EMPLOYEES.LASTNAME, DEPARTMENTS.NAME FROM EMPLOYEES {keyword} DEPARTMENTS ON EMPLOYEES.DEPARTMENT_ID = DEPARTMENTS.DEPARTMENT_ID WHERE DEPARTMENTS.NAME LIKE 'S%'"
		)
	);
}

/// Test EXISTS injects its correlation with AND when the sub-select already filters
#[rstest]
fn test_exists_appends_to_an_existing_where(hr: HrSchema) {
	let mut sales = hr.db.command();
	sales.select(&hr.dep_id).and_where(hr.dep_name.eq("Sales"));

	let mut cmd = hr.db.command();
	cmd.select(&hr.last_name).and_where(CompareExpr::exists_where(
		sales,
		hr.dep_id.eq(&hr.emp_dept),
	));

	let (sql, _) = render(&cmd, &PostgresDialect::new()).unwrap();

	assert_eq!(
		sql,
		"SELECT LASTNAME FROM EMPLOYEES WHERE EXISTS (SELECT DEPARTMENTS.DEPARTMENT_ID FROM DEPARTMENTS WHERE DEPARTMENTS.NAME = 'Sales' AND DEPARTMENTS.DEPARTMENT_ID = EMPLOYEES.DEPARTMENT_ID)"
	);
}

/// Test a NOT EXISTS without correlation
#[rstest]
fn test_not_exists(hr: HrSchema) {
	let mut retired = hr.db.command();
	retired.select(&hr.emp_id).and_where(hr.retired.eq(true));

	let mut cmd = hr.db.command();
	cmd.select(&hr.dep_name)
		.and_where(CompareExpr::exists(retired).not());

	let (sql, _) = render(&cmd, &SqliteDialect::new()).unwrap();

	assert_eq!(
		sql,
		"SELECT NAME FROM DEPARTMENTS WHERE NOT (EXISTS (SELECT EMPLOYEES.EMPLOYEE_ID FROM EMPLOYEES WHERE EMPLOYEES.RETIRED = 1))"
	);
}

/// Test dates are rendered with each dialect's literal template
#[rstest]
fn test_date_literals_per_dialect(hr: HrSchema) {
	let mut cmd = hr.db.command();
	cmd.select(&hr.last_name).and_where(hr.hired.gte("2020-01-31"));

	for dialect in all_dialects() {
		let (sql, _) = render(&cmd, dialect.as_ref()).unwrap();
		let expected = match dialect.kind() {
			DialectKind::SqlServer | DialectKind::Sqlite => "HIRED >= '2020-01-31'",
			_ => "HIRED >= DATE '2020-01-31'",
		};
		assert!(sql.ends_with(expected), "{}: {sql}", dialect.kind());
	}
}

/// Test comparison operators render the same way in every dialect
#[rstest]
#[case(CmpOperator::Eq, "=")]
#[case(CmpOperator::Ne, "<>")]
#[case(CmpOperator::Lt, "<")]
#[case(CmpOperator::Le, "<=")]
#[case(CmpOperator::Gt, ">")]
#[case(CmpOperator::Ge, ">=")]
fn test_comparison_operators(hr: HrSchema, #[case] op: CmpOperator, #[case] sql_op: &str) {
	let mut cmd = hr.db.command();
	cmd.select(&hr.emp_id).and_where(hr.emp_dept.cmp(op, 7));

	for dialect in all_dialects() {
		let (sql, _) = render(&cmd, dialect.as_ref()).unwrap();
		assert!(
			sql.ends_with(&format!("WHERE DEPARTMENT_ID {sql_op} 7")),
			"{}: {sql}",
			dialect.kind()
		);
	}
}

/// Test a view can be selected from like a table
#[rstest]
fn test_select_from_view(mut hr: HrSchema) {
	let mut def = hr.db.command();
	def.select(&hr.emp_id)
		.select(hr.first_name.concat(" ").concat(&hr.last_name).alias("FULL_NAME"));
	let view = hr.db.add_view("EMPLOYEE_NAMES", def).unwrap();

	let mut cmd = hr.db.command();
	cmd.select(&view.column("FULL_NAME").unwrap())
		.order_by(&view.column("FULL_NAME").unwrap(), Order::Asc);

	let (sql, _) = render(&cmd, &PostgresDialect::new()).unwrap();
	assert_eq!(sql, "SELECT FULL_NAME FROM EMPLOYEE_NAMES ORDER BY FULL_NAME");
}

/// Test a column of a database that is not attached is rejected
#[rstest]
fn test_unbound_column_is_rejected(hr: HrSchema) {
	let mut audit = Database::new("AUDIT");
	let mut log = audit.create_table("LOG");
	let entry = log.add_column("ENTRY", DataType::Text, 100, true).unwrap();
	audit.add_table(log).unwrap();

	let mut cmd = hr.db.command();
	cmd.select(&hr.last_name).and_where(entry.eq(&hr.last_name));

	assert!(matches!(
		render(&cmd, &PostgresDialect::new()),
		Err(QueryError::UnboundColumn { .. })
	));

	cmd.attach(&audit);
	assert!(render(&cmd, &PostgresDialect::new()).is_ok());
}

/// Test limit and offset with each dialect's paging syntax
#[rstest]
fn test_paging_per_dialect(hr: HrSchema) {
	let mut cmd = hr.db.command();
	cmd.select(&hr.last_name)
		.order_by(&hr.last_name, Order::Asc)
		.limit(5)
		.skip(2);

	for dialect in all_dialects() {
		let (sql, params) = render(&cmd, dialect.as_ref()).unwrap();
		let paging = match dialect.kind() {
			DialectKind::Oracle | DialectKind::SqlServer => "OFFSET 2 ROWS FETCH NEXT 5 ROWS ONLY",
			_ => "LIMIT 5 OFFSET 2",
		};
		assert_eq!(
			sql,
			format!("SELECT LASTNAME FROM EMPLOYEES ORDER BY LASTNAME {paging}"),
			"{}",
			dialect.kind()
		);
		assert!(params.is_empty());
	}
}

/// Test a limit without offset
#[rstest]
#[case(Box::new(SqlServerDialect::new()), "SELECT TOP 5 LASTNAME FROM EMPLOYEES ORDER BY LASTNAME")]
#[case(Box::new(OracleDialect::new()), "SELECT LASTNAME FROM EMPLOYEES ORDER BY LASTNAME FETCH FIRST 5 ROWS ONLY")]
#[case(Box::new(MySqlDialect::new()), "SELECT LASTNAME FROM EMPLOYEES ORDER BY LASTNAME LIMIT 5")]
fn test_limit_only(hr: HrSchema, #[case] dialect: Box<dyn DialectHandler>, #[case] expected: &str) {
	let mut cmd = hr.db.command();
	cmd.select(&hr.last_name)
		.order_by(&hr.last_name, Order::Asc)
		.limit(5);

	assert_eq!(render(&cmd, dialect.as_ref()).unwrap().0, expected);
}

/// Test an offset without ORDER BY fails only where the dialect requires ordering
#[rstest]
fn test_offset_without_order_by(hr: HrSchema) {
	let mut cmd = hr.db.command();
	cmd.select(&hr.last_name).limit(5).skip(2);

	for dialect in all_dialects() {
		let result = render(&cmd, dialect.as_ref());
		if dialect.kind() == DialectKind::SqlServer {
			assert_eq!(
				result.unwrap_err(),
				QueryError::OffsetRequiresOrderBy {
					dialect: DialectKind::SqlServer,
				}
			);
		} else {
			assert!(result.is_ok(), "{}", dialect.kind());
		}
	}
}

/// Test SQL Server pages an ordered listing and refuses an unordered one
#[rstest]
fn test_sql_server_page_of_employees(hr: HrSchema) {
	let dialect = SqlServerDialect::new();
	let mut cmd = hr.db.command();
	cmd.select(&hr.emp_id)
		.select(&hr.last_name)
		.order_by(&hr.last_name, Order::Asc)
		.limit(20)
		.skip(10);

	assert_eq!(
		render(&cmd, &dialect).unwrap().0,
		"SELECT EMPLOYEE_ID, LASTNAME FROM EMPLOYEES ORDER BY LASTNAME OFFSET 10 ROWS FETCH NEXT 20 ROWS ONLY"
	);

	cmd.clear_order_by();
	assert!(matches!(
		render(&cmd, &dialect),
		Err(QueryError::OffsetRequiresOrderBy { .. })
	));
}

//! INSERT, UPDATE and DELETE integration tests

use rstest::rstest;

use sqlmason_query::prelude::*;
use sqlmason_query::{DialectKind, Feature, next_sequence_value};

mod common;
use common::{HrSchema, all_dialects, hr};

/// Test a hire, a transfer and a dismissal rendered for MySQL with bind parameters
#[rstest]
fn test_employee_lifecycle_with_prepared_statements(hr: HrSchema) {
	let mysql = MySqlDialect::with_settings(DialectSettings::default().with_prepared_statements(true));

	// Hire
	let mut hire = hr.db.command();
	hire.set(&hr.last_name, "Bloggs")
		.set(&hr.emp_dept, 2)
		.set(&hr.retired, false);
	let (sql, params) = render_statement(&hire, StatementKind::Insert, &mysql).unwrap();
	assert_eq!(
		sql,
		"INSERT INTO EMPLOYEES (LASTNAME, DEPARTMENT_ID, RETIRED) VALUES (?, ?, ?)"
	);
	assert_eq!(
		params.into_inner(),
		vec![Value::from("Bloggs"), Value::from(2), Value::from(false)]
	);

	// Transfer
	let mut transfer = hr.db.command();
	transfer
		.set(&hr.emp_dept, 5)
		.and_where(hr.last_name.eq("Bloggs"));
	let (sql, params) = render_statement(&transfer, StatementKind::Update, &mysql).unwrap();
	assert_eq!(sql, "UPDATE EMPLOYEES SET DEPARTMENT_ID = ? WHERE LASTNAME = ?");
	assert_eq!(params.len(), 2);

	// Dismissal
	let mut dismiss = hr.db.command();
	dismiss.and_where(hr.last_name.eq("Bloggs"));
	let (sql, params) = render_statement(&dismiss, StatementKind::Delete, &mysql).unwrap();
	assert_eq!(sql, "DELETE FROM EMPLOYEES WHERE LASTNAME = ?");
	assert_eq!(params.into_inner(), vec![Value::from("Bloggs")]);
}

/// Test PostgreSQL numbers its placeholders across the whole statement
#[rstest]
fn test_postgres_numbered_placeholders(hr: HrSchema) {
	let postgres =
		PostgresDialect::with_settings(DialectSettings::default().with_prepared_statements(true));
	let mut cmd = hr.db.command();
	cmd.set(&hr.salary, 1000)
		.set(&hr.retired, true)
		.and_where(hr.emp_dept.eq(3))
		.and_where(hr.first_name.is_null());

	let (sql, params) = render_statement(&cmd, StatementKind::Update, &postgres).unwrap();

	assert_eq!(
		sql,
		"UPDATE EMPLOYEES SET SALARY = $1, RETIRED = $2 WHERE DEPARTMENT_ID = $3 AND FIRSTNAME IS NULL"
	);
	assert_eq!(params.len(), 3);
}

/// Test the same update renders inline literals without prepared statements
#[rstest]
fn test_update_with_inline_literals(hr: HrSchema) {
	let mut cmd = hr.db.command();
	cmd.set(&hr.last_name, "D'Arcy")
		.set(&hr.hired, "2021-06-01")
		.and_where(hr.emp_id.eq(7));

	for dialect in all_dialects() {
		let (sql, params) = render_statement(&cmd, StatementKind::Update, dialect.as_ref()).unwrap();
		let hired = match dialect.kind() {
			DialectKind::SqlServer | DialectKind::Sqlite => "'2021-06-01'",
			_ => "DATE '2021-06-01'",
		};
		assert_eq!(
			sql,
			format!("UPDATE EMPLOYEES SET LASTNAME = 'D''Arcy', HIRED = {hired} WHERE EMPLOYEE_ID = 7"),
			"{}",
			dialect.kind()
		);
		assert!(params.is_empty());
	}
}

/// Test setting a column twice keeps only the last value
#[rstest]
fn test_set_replaces_an_earlier_assignment(hr: HrSchema) {
	let mut cmd = hr.db.command();
	cmd.set(&hr.last_name, "First").set(&hr.last_name, "Second");

	let (sql, _) = render_statement(&cmd, StatementKind::Insert, &SqliteDialect::new()).unwrap();

	assert_eq!(sql, "INSERT INTO EMPLOYEES (LASTNAME) VALUES ('Second')");
}

/// Test an UPDATE without assignments is rejected
#[rstest]
fn test_update_without_assignments(hr: HrSchema) {
	let mut cmd = hr.db.command();
	cmd.and_where(hr.emp_id.eq(1));

	assert!(matches!(
		render_statement(&cmd, StatementKind::Update, &PostgresDialect::new()),
		Err(QueryError::InvalidCommand { .. })
	));
}

/// Test fetching the next key from native sequences
#[rstest]
#[case(Box::new(PostgresDialect::new()), "SELECT nextval('EMPLOYEES_EMPLOYEE_ID_SEQ')")]
#[case(Box::new(OracleDialect::new()), "SELECT EMPLOYEES_EMPLOYEE_ID_SEQ.NEXTVAL FROM DUAL")]
#[case(Box::new(HsqlDialect::new()), "CALL NEXT VALUE FOR EMPLOYEES_EMPLOYEE_ID_SEQ")]
#[case(Box::new(SqlServerDialect::new()), "SELECT NEXT VALUE FOR EMPLOYEES_EMPLOYEE_ID_SEQ")]
fn test_next_sequence_value_native(
	hr: HrSchema,
	#[case] dialect: Box<dyn DialectHandler>,
	#[case] expected: &str,
) {
	let statements = next_sequence_value(dialect.as_ref(), None, &hr.emp_id.sequence_name()).unwrap();

	assert_eq!(statements, vec![expected.to_string()]);
}

/// Test the sequence table emulation increments then reads back
#[rstest]
fn test_next_sequence_value_emulated(hr: HrSchema) {
	let mysql = MySqlDialect::with_settings(DialectSettings::default().with_sequence_table(true));

	let statements = next_sequence_value(&mysql, None, &hr.emp_id.sequence_name()).unwrap();

	assert_eq!(
		statements,
		vec![
			"UPDATE SEQUENCES SET SEQ_VALUE = SEQ_VALUE + SEQ_INCREMENT WHERE SEQ_NAME = 'EMPLOYEES_EMPLOYEE_ID_SEQ'"
				.to_string(),
			"SELECT SEQ_VALUE FROM SEQUENCES WHERE SEQ_NAME = 'EMPLOYEES_EMPLOYEE_ID_SEQ'".to_string(),
		]
	);
}

/// Test dialects without sequences fail unless the emulation is enabled
#[rstest]
#[case(Box::new(MySqlDialect::new()))]
#[case(Box::new(SqliteDialect::new()))]
fn test_next_sequence_value_unsupported(#[case] dialect: Box<dyn DialectHandler>) {
	assert_eq!(
		next_sequence_value(dialect.as_ref(), None, "ANY_SEQ").unwrap_err(),
		QueryError::UnsupportedFeature {
			dialect: dialect.kind(),
			feature: Feature::Sequences,
		}
	);
}

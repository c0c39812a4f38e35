//! Common fixtures for query integration tests

// Each test binary compiles common.rs separately, so not every item is used everywhere.
#![allow(dead_code, unreachable_pub)]

use rstest::fixture;

use sqlmason_query::prelude::*;

/// HR schema: departments and the employees working in them.
pub struct HrSchema {
	pub db: Database,
	pub departments: Table,
	pub employees: Table,
	pub dep_id: TableColumn,
	pub dep_name: TableColumn,
	pub emp_id: TableColumn,
	pub first_name: TableColumn,
	pub last_name: TableColumn,
	pub emp_dept: TableColumn,
	pub salary: TableColumn,
	pub retired: TableColumn,
	pub hired: TableColumn,
}

#[fixture]
pub fn hr() -> HrSchema {
	let mut db = Database::new("HR");

	let mut departments = db.create_table("DEPARTMENTS");
	let dep_id = departments
		.add_column("DEPARTMENT_ID", DataType::AutoInc, 0, true)
		.unwrap();
	let dep_name = departments
		.add_column("NAME", DataType::Text, 80, true)
		.unwrap();
	departments.set_primary_key(&[&dep_id]).unwrap();

	let mut employees = db.create_table("EMPLOYEES");
	let emp_id = employees
		.add_column("EMPLOYEE_ID", DataType::AutoInc, 0, true)
		.unwrap();
	let first_name = employees
		.add_column("FIRSTNAME", DataType::Text, 40, false)
		.unwrap();
	let last_name = employees
		.add_column("LASTNAME", DataType::Text, 40, true)
		.unwrap();
	let emp_dept = employees
		.add_column("DEPARTMENT_ID", DataType::Integer, 4, true)
		.unwrap();
	let salary = employees
		.add_column("SALARY", DataType::Decimal, (10, 2), false)
		.unwrap();
	let retired = employees
		.add_column("RETIRED", DataType::Bool, 0, true)
		.unwrap();
	let hired = employees
		.add_column("HIRED", DataType::Date, 0, false)
		.unwrap();
	employees.set_primary_key(&[&emp_id]).unwrap();

	db.add_table(departments.clone()).unwrap();
	db.add_table(employees.clone()).unwrap();
	db.add_relation("EMP_DEPARTMENT_FK", &[(&emp_dept, &dep_id)])
		.unwrap();

	HrSchema {
		db,
		departments,
		employees,
		dep_id,
		dep_name,
		emp_id,
		first_name,
		last_name,
		emp_dept,
		salary,
		retired,
		hired,
	}
}

/// The six built-in dialects.
pub fn all_dialects() -> Vec<Box<dyn DialectHandler>> {
	vec![
		Box::new(OracleDialect::new()),
		Box::new(SqlServerDialect::new()),
		Box::new(PostgresDialect::new()),
		Box::new(HsqlDialect::new()),
		Box::new(MySqlDialect::new()),
		Box::new(SqliteDialect::new()),
	]
}

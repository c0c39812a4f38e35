//! HR schema shared by the unit tests.

use crate::schema::{Database, Table, TableColumn};
use crate::types::DataType;

pub(crate) struct Hr {
	pub db: Database,
	pub employees: Table,
	pub departments: Table,
	pub emp_id: TableColumn,
	pub first_name: TableColumn,
	pub last_name: TableColumn,
	pub emp_dept: TableColumn,
	pub salary: TableColumn,
	pub retired: TableColumn,
	pub birth_date: TableColumn,
	pub dep_id: TableColumn,
	pub dep_name: TableColumn,
}

pub(crate) fn hr() -> Hr {
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
	let birth_date = employees
		.add_column("DATE_OF_BIRTH", DataType::Date, 0, false)
		.unwrap();
	employees.set_primary_key(&[&emp_id]).unwrap();

	db.add_table(departments.clone()).unwrap();
	db.add_table(employees.clone()).unwrap();
	db.add_relation("EMP_DEPARTMENT_FK", &[(&emp_dept, &dep_id)])
		.unwrap();

	Hr {
		db,
		employees,
		departments,
		emp_id,
		first_name,
		last_name,
		emp_dept,
		salary,
		retired,
		birth_date,
		dep_id,
		dep_name,
	}
}

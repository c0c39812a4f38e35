//! DDL script integration tests

use rstest::{fixture, rstest};

use sqlmason_ddl::{DdlAction, DdlError, DdlGenerator, DdlScript, SchemaObject, render_ddl};
use sqlmason_query::{
	DataType, Database, DialectHandler, DialectSettings, Feature, HsqlDialect, MySqlDialect,
	OracleDialect, PostgresDialect, QueryError, SqlServerDialect, SqliteDialect,
	next_sequence_value,
};

/// Authors and their books, with a view joining the two.
#[fixture]
fn library() -> Database {
	let mut db = Database::new("LIBRARY");

	let mut authors = db.create_table("AUTHORS");
	let author_id = authors
		.add_column("AUTHOR_ID", DataType::AutoInc, 0, true)
		.unwrap();
	let name = authors.add_column("NAME", DataType::Text, 60, true).unwrap();
	authors.set_primary_key(&[&author_id]).unwrap();

	let mut books = db.create_table("BOOKS");
	let book_id = books
		.add_column("BOOK_ID", DataType::AutoInc, 0, true)
		.unwrap();
	let book_author = books
		.add_column("AUTHOR_ID", DataType::Integer, 4, true)
		.unwrap();
	let title = books
		.add_column("TITLE", DataType::Text, 120, true)
		.unwrap();
	books
		.add_column("PRICE", DataType::Decimal, (8, 2), false)
		.unwrap();
	books.set_primary_key(&[&book_id]).unwrap();
	books.add_index("BOOK_TITLE_IDX", true, &[&title]).unwrap();

	db.add_table(authors).unwrap();
	db.add_table(books).unwrap();
	db.add_relation("BOOK_AUTHOR_FK", &[(&book_author, &author_id)])
		.unwrap();

	let mut titles = db.command();
	titles
		.select(&title)
		.select(&name)
		.and_where(book_author.eq(&author_id));
	db.add_view("BOOK_TITLES", titles).unwrap();
	db
}

fn all_dialects() -> Vec<Box<dyn DialectHandler>> {
	vec![
		Box::new(OracleDialect::new()),
		Box::new(SqlServerDialect::new()),
		Box::new(PostgresDialect::new()),
		Box::new(HsqlDialect::new()),
		Box::new(MySqlDialect::new()),
		Box::new(SqliteDialect::new()),
	]
}

/// Test creating a database on HSQLDB creates sequences before the tables using them
#[rstest]
fn test_hsql_database_create_script(library: Database) {
	// Build
	let dialect = HsqlDialect::new();
	let script = DdlGenerator::new(&dialect)
		.generate(SchemaObject::Database(&library), DdlAction::Create)
		.unwrap();

	// Verify
	assert_eq!(
		script.statements(),
		[
			"CREATE SEQUENCE AUTHORS_AUTHOR_ID_SEQ START WITH 1 INCREMENT BY 1",
			"CREATE SEQUENCE BOOKS_BOOK_ID_SEQ START WITH 1 INCREMENT BY 1",
			"CREATE TABLE AUTHORS (AUTHOR_ID INTEGER NOT NULL, NAME VARCHAR(60) NOT NULL, CONSTRAINT AUTHORS_PK PRIMARY KEY (AUTHOR_ID))",
			"CREATE TABLE BOOKS (BOOK_ID INTEGER NOT NULL, AUTHOR_ID INTEGER NOT NULL, TITLE VARCHAR(120) NOT NULL, PRICE DECIMAL(8, 2), CONSTRAINT BOOKS_PK PRIMARY KEY (BOOK_ID))",
			"CREATE UNIQUE INDEX BOOK_TITLE_IDX ON BOOKS (TITLE)",
			"ALTER TABLE BOOKS ADD CONSTRAINT BOOK_AUTHOR_FK FOREIGN KEY (AUTHOR_ID) REFERENCES AUTHORS (AUTHOR_ID)",
			"CREATE VIEW BOOK_TITLES (TITLE, NAME) AS SELECT BOOKS.TITLE, AUTHORS.NAME FROM BOOKS, AUTHORS WHERE BOOKS.AUTHOR_ID = AUTHORS.AUTHOR_ID",
		]
	);
}

/// Test dropping a database on HSQLDB removes objects in reverse dependency order
#[rstest]
fn test_hsql_database_drop_script(library: Database) {
	// Build
	let script = render_ddl(
		SchemaObject::Database(&library),
		DdlAction::Drop,
		&HsqlDialect::new(),
	)
	.unwrap();

	// Verify
	assert_eq!(
		script.into_inner(),
		vec![
			"DROP VIEW BOOK_TITLES",
			"ALTER TABLE BOOKS DROP CONSTRAINT BOOK_AUTHOR_FK",
			"DROP TABLE BOOKS",
			"DROP TABLE AUTHORS",
			"DROP SEQUENCE BOOKS_BOOK_ID_SEQ",
			"DROP SEQUENCE AUTHORS_AUTHOR_ID_SEQ",
		]
	);
}

/// Test every dialect can create and drop the whole database
#[rstest]
fn test_every_dialect_creates_and_drops(library: Database) {
	for dialect in all_dialects() {
		let generator = DdlGenerator::new(dialect.as_ref());

		let create = generator
			.generate(SchemaObject::Database(&library), DdlAction::Create)
			.unwrap();
		let drop = generator
			.generate(SchemaObject::Database(&library), DdlAction::Drop)
			.unwrap();

		let tables: Vec<&str> = create
			.iter()
			.filter(|(_, sql)| sql.starts_with("CREATE TABLE"))
			.map(|(_, sql)| sql)
			.collect();
		assert_eq!(tables.len(), 2, "{}", dialect.kind());
		assert!(tables[0].starts_with("CREATE TABLE AUTHORS"));
		assert_eq!(
			drop.iter().filter(|(_, sql)| sql.starts_with("DROP TABLE")).count(),
			2,
			"{}",
			dialect.kind()
		);
		assert!(create.get(0).is_some_and(|first| !first.starts_with("DROP")));
	}
}

/// Test a failing statement can be reported by its position in the script
#[rstest]
fn test_statement_positions(library: Database) {
	let script = render_ddl(
		SchemaObject::Database(&library),
		DdlAction::Create,
		&PostgresDialect::new(),
	)
	.unwrap();

	let relation = script
		.iter()
		.find(|(_, sql)| sql.contains("FOREIGN KEY"))
		.map(|(position, _)| position);

	assert_eq!(relation, Some(3));
	assert_eq!(
		script.get(3),
		Some("ALTER TABLE BOOKS ADD CONSTRAINT BOOK_AUTHOR_FK FOREIGN KEY (AUTHOR_ID) REFERENCES AUTHORS (AUTHOR_ID)")
	);
}

/// Test scripts print as semicolon-terminated lines
#[rstest]
fn test_script_display(library: Database) {
	let books = library.table("BOOKS").unwrap();
	let script = render_ddl(SchemaObject::Table(books), DdlAction::Drop, &MySqlDialect::new()).unwrap();

	assert_eq!(script.to_string(), "DROP TABLE BOOKS;\n");
}

/// Test scripts for several objects can be concatenated into one migration
#[rstest]
fn test_migration_from_several_objects(library: Database) {
	let dialect = PostgresDialect::new();
	let generator = DdlGenerator::new(&dialect);
	let view = library.view("BOOK_TITLES").unwrap();
	let price = library.table("BOOKS").unwrap().column("PRICE").unwrap();

	let mut migration = DdlScript::new();
	migration.append(generator.generate(SchemaObject::View(view), DdlAction::Drop).unwrap());
	migration.append(generator.generate(SchemaObject::Column(&price), DdlAction::Drop).unwrap());
	migration.append(generator.generate(SchemaObject::View(view), DdlAction::Create).unwrap());

	assert_eq!(
		migration.into_inner(),
		vec![
			"DROP VIEW BOOK_TITLES",
			"ALTER TABLE BOOKS DROP COLUMN PRICE",
			"CREATE VIEW BOOK_TITLES (TITLE, NAME) AS SELECT BOOKS.TITLE, AUTHORS.NAME FROM BOOKS, AUTHORS WHERE BOOKS.AUTHOR_ID = AUTHORS.AUTHOR_ID",
		]
	);
}

/// Test the emulated sequence table is created once, before any sequence row
#[rstest]
fn test_sequence_table_on_mysql(library: Database) {
	let dialect = MySqlDialect::with_settings(DialectSettings::default().with_sequence_table(true));

	let script = render_ddl(SchemaObject::Database(&library), DdlAction::Create, &dialect).unwrap();

	assert!(script.statements()[0].starts_with("CREATE TABLE SEQUENCES ("));
	assert_eq!(
		&script.statements()[1..3],
		[
			"INSERT INTO SEQUENCES (SEQ_NAME, SEQ_VALUE, SEQ_INCREMENT) VALUES ('AUTHORS_AUTHOR_ID_SEQ', 0, 1)",
			"INSERT INTO SEQUENCES (SEQ_NAME, SEQ_VALUE, SEQ_INCREMENT) VALUES ('BOOKS_BOOK_ID_SEQ', 0, 1)",
		]
	);
	assert_eq!(
		script
			.iter()
			.filter(|(_, sql)| sql.starts_with("CREATE TABLE SEQUENCES"))
			.count(),
		1
	);
}

/// Test an emulated sequence starts one increment below its start and steps by its increment
#[rstest]
fn test_sequence_table_honours_the_increment() {
	let mut db = Database::new("SHOP");
	db.add_sequence("ORDER_SEQ", 100, 10).unwrap();
	let dialect = MySqlDialect::with_settings(DialectSettings::default().with_sequence_table(true));

	let script = render_ddl(SchemaObject::Database(&db), DdlAction::Create, &dialect).unwrap();
	let next = next_sequence_value(&dialect, db.schema(), "ORDER_SEQ").unwrap();

	assert_eq!(
		script.statements()[1],
		"INSERT INTO SEQUENCES (SEQ_NAME, SEQ_VALUE, SEQ_INCREMENT) VALUES ('ORDER_SEQ', 90, 10)"
	);
	assert_eq!(
		next,
		vec![
			"UPDATE SEQUENCES SET SEQ_VALUE = SEQ_VALUE + SEQ_INCREMENT WHERE SEQ_NAME = 'ORDER_SEQ'",
			"SELECT SEQ_VALUE FROM SEQUENCES WHERE SEQ_NAME = 'ORDER_SEQ'",
		]
	);
}

/// Test a declared sequence on a dialect without sequences fails for both DDL and next value
#[rstest]
#[case(Box::new(MySqlDialect::new()))]
#[case(Box::new(SqliteDialect::new()))]
fn test_declared_sequence_without_emulation(#[case] dialect: Box<dyn DialectHandler>) {
	let mut db = Database::new("SHOP");
	db.add_sequence("ORDER_SEQ", 100, 10).unwrap();

	let ddl = render_ddl(SchemaObject::Database(&db), DdlAction::Create, dialect.as_ref());
	let next = next_sequence_value(dialect.as_ref(), db.schema(), "ORDER_SEQ");

	let unsupported = QueryError::UnsupportedFeature {
		dialect: dialect.kind(),
		feature: Feature::Sequences,
	};
	assert_eq!(ddl.unwrap_err(), DdlError::Query(unsupported.clone()));
	assert_eq!(next.unwrap_err(), unsupported);
}

/// Test a sequence in a schema is created and read under the same qualified name
#[rstest]
#[case(
	Box::new(OracleDialect::new()),
	"CREATE SEQUENCE HR.EMP_ID_SEQ START WITH 1 INCREMENT BY 1 NOCACHE",
	"SELECT HR.EMP_ID_SEQ.NEXTVAL FROM DUAL"
)]
#[case(
	Box::new(PostgresDialect::new()),
	"CREATE SEQUENCE HR.EMP_ID_SEQ START WITH 1 INCREMENT BY 1",
	"SELECT nextval('HR.EMP_ID_SEQ')"
)]
fn test_sequence_in_schema(
	#[case] dialect: Box<dyn DialectHandler>,
	#[case] create: &str,
	#[case] expected: &str,
) {
	let mut db = Database::with_schema("PAYROLL", "HR");
	db.add_sequence("EMP_ID_SEQ", 1, 1).unwrap();

	let script = render_ddl(SchemaObject::Database(&db), DdlAction::Create, dialect.as_ref()).unwrap();
	let next = next_sequence_value(dialect.as_ref(), db.schema(), "EMP_ID_SEQ").unwrap();

	assert_eq!(
		script.statements(),
		["CREATE SCHEMA HR", create]
	);
	assert_eq!(next, vec![expected.to_string()]);
}

/// Test unsupported actions surface as errors rather than empty scripts
#[rstest]
fn test_unsupported_action(library: Database) {
	let err = render_ddl(
		SchemaObject::Database(&library),
		DdlAction::Alter,
		&PostgresDialect::new(),
	)
	.unwrap_err();

	assert_eq!(
		err,
		DdlError::UnsupportedAction {
			action: DdlAction::Alter,
			object: "database",
		}
	);
}

use super::*;
use rstest::rstest;

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

#[rstest]
fn test_every_dialect_maps_the_core_phrases() {
	let core = [
		Phrase::Null,
		Phrase::BooleanTrue,
		Phrase::BooleanFalse,
		Phrase::DateTemplate,
		Phrase::DateTimeTemplate,
		Phrase::Parameter,
		Phrase::Concat,
		Phrase::FuncUpper,
		Phrase::FuncCount,
		Phrase::FuncCast,
		Phrase::PagingOffset,
	];
	for dialect in all_dialects() {
		for phrase in core {
			assert!(
				dialect.phrase(phrase).is_ok(),
				"{} lacks {phrase}",
				dialect.kind()
			);
		}
	}
}

#[rstest]
fn test_every_dialect_maps_every_known_data_type() {
	for dialect in all_dialects() {
		for dt in DataType::ALL.into_iter().filter(|dt| *dt != DataType::Unknown) {
			assert!(dialect.native_type(dt, ColumnSize::default()).is_ok());
		}
		assert_eq!(
			dialect.native_type(DataType::Unknown, ColumnSize::default()),
			Err(QueryError::MissingTypeMapping {
				dialect: dialect.kind(),
				data_type: DataType::Unknown,
			})
		);
	}
}

#[rstest]
fn test_missing_phrase_is_an_error() {
	let dialect = SqliteDialect::new();
	assert_eq!(
		dialect.phrase(Phrase::FuncReverse),
		Err(QueryError::MissingPhrase {
			dialect: DialectKind::Sqlite,
			phrase: Phrase::FuncReverse,
		})
	);
}

#[rstest]
#[case(Box::new(PostgresDialect::new()), "$3")]
#[case(Box::new(MySqlDialect::new()), "?")]
#[case(Box::new(SqlServerDialect::new()), "?")]
fn test_placeholder(#[case] dialect: Box<dyn DialectHandler>, #[case] expected: &str) {
	assert_eq!(dialect.placeholder(3).unwrap(), expected);
}

#[rstest]
#[case(Box::new(PostgresDialect::new()), "ORDER", "\"ORDER\"")]
#[case(Box::new(SqlServerDialect::new()), "ORDER", "[ORDER]")]
#[case(Box::new(MySqlDialect::new()), "order", "`order`")]
#[case(Box::new(PostgresDialect::new()), "LASTNAME", "LASTNAME")]
#[case(Box::new(PostgresDialect::new()), "first name", "\"first name\"")]
#[case(Box::new(PostgresDialect::new()), "1ST", "\"1ST\"")]
#[case(Box::new(SqlServerDialect::new()), "a]b", "[a]]b]")]
#[case(Box::new(PostgresDialect::new()), "a\"b", "\"a\"\"b\"")]
fn test_quote_identifier(
	#[case] dialect: Box<dyn DialectHandler>,
	#[case] name: &str,
	#[case] expected: &str,
) {
	assert_eq!(dialect.quote_identifier(name), expected);
}

#[rstest]
fn test_always_quote_identifiers() {
	let dialect =
		PostgresDialect::with_settings(DialectSettings::default().with_quoted_identifiers(true));
	assert_eq!(dialect.quote_identifier("LASTNAME"), "\"LASTNAME\"");
}

#[rstest]
#[case(Box::new(PostgresDialect::new()), DataType::Text, ColumnSize::new(40), "VARCHAR(40)")]
#[case(Box::new(PostgresDialect::new()), DataType::Text, ColumnSize::new(0), "VARCHAR(255)")]
#[case(Box::new(MySqlDialect::new()), DataType::Text, ColumnSize::new(-5), "VARCHAR(191)")]
#[case(Box::new(PostgresDialect::new()), DataType::AutoInc, ColumnSize::new(0), "SERIAL")]
#[case(Box::new(PostgresDialect::new()), DataType::AutoInc, ColumnSize::new(8), "BIGSERIAL")]
#[case(Box::new(PostgresDialect::new()), DataType::Integer, ColumnSize::new(2), "SMALLINT")]
#[case(Box::new(SqlServerDialect::new()), DataType::Bool, ColumnSize::new(0), "BIT")]
#[case(Box::new(OracleDialect::new()), DataType::AutoInc, ColumnSize::new(0), "NUMBER(10)")]
#[case(Box::new(OracleDialect::new()), DataType::Decimal, ColumnSize::decimal(10, 2), "NUMBER(10, 2)")]
#[case(Box::new(HsqlDialect::new()), DataType::Decimal, ColumnSize::new(0), "DECIMAL(18, 2)")]
#[case(Box::new(HsqlDialect::new()), DataType::Char, ColumnSize::new(0), "CHAR(1)")]
#[case(Box::new(SqliteDialect::new()), DataType::Text, ColumnSize::new(40), "TEXT")]
fn test_native_type(
	#[case] dialect: Box<dyn DialectHandler>,
	#[case] data_type: DataType,
	#[case] size: ColumnSize,
	#[case] expected: &str,
) {
	assert_eq!(dialect.native_type(data_type, size).unwrap(), expected);
}

#[rstest]
fn test_settings_override_phrases_and_types() {
	let settings = DialectSettings::default()
		.with_phrase(Phrase::FuncUpper, "UCASE(?)")
		.with_native_type(DataType::Text, "NVARCHAR2({0})");
	let dialect = OracleDialect::with_settings(settings);

	assert_eq!(dialect.phrase(Phrase::FuncUpper).unwrap(), "UCASE(?)");
	assert_eq!(
		dialect.native_type(DataType::Text, ColumnSize::new(20)).unwrap(),
		"NVARCHAR2(20)"
	);
	// untouched phrases keep the dialect template
	assert_eq!(dialect.phrase(Phrase::FuncLower).unwrap(), "LOWER(?)");
}

#[rstest]
fn test_feature_flags() {
	assert!(SqlServerDialect::new().supports(Feature::OffsetRequiresOrderBy));
	assert!(SqlServerDialect::new().supports(Feature::DropIndexOnTable));
	assert!(!PostgresDialect::new().supports(Feature::OffsetRequiresOrderBy));
	assert!(!SqliteDialect::new().supports(Feature::AlterTableConstraints));
	assert!(!MySqlDialect::new().supports(Feature::Sequences));
	assert!(OracleDialect::new().supports(Feature::Sequences));
}

#[rstest]
fn test_identity_style_follows_sequence_table_setting() {
	let plain = MySqlDialect::new();
	assert_eq!(plain.config().identity_style(), IdentityStyle::AutoIncrement);

	let emulated =
		MySqlDialect::with_settings(DialectSettings::default().with_sequence_table(true));
	assert_eq!(
		emulated.config().identity_style(),
		IdentityStyle::SequenceTable
	);
}

#[rstest]
#[case(Box::new(PostgresDialect::new()), "SELECT nextval('EMP_SEQ')")]
#[case(Box::new(OracleDialect::new()), "SELECT EMP_SEQ.NEXTVAL FROM DUAL")]
#[case(Box::new(SqlServerDialect::new()), "SELECT NEXT VALUE FOR EMP_SEQ")]
#[case(Box::new(HsqlDialect::new()), "CALL NEXT VALUE FOR EMP_SEQ")]
fn test_next_sequence_value_native(
	#[case] dialect: Box<dyn DialectHandler>,
	#[case] expected: &str,
) {
	assert_eq!(
		next_sequence_value(dialect.as_ref(), None, "EMP_SEQ").unwrap(),
		vec![expected.to_string()]
	);
}

#[rstest]
fn test_next_sequence_value_emulated() {
	let dialect =
		MySqlDialect::with_settings(DialectSettings::default().with_sequence_table(true));
	assert_eq!(
		next_sequence_value(&dialect, None, "EMP_SEQ").unwrap(),
		vec![
			"UPDATE SEQUENCES SET SEQ_VALUE = SEQ_VALUE + SEQ_INCREMENT WHERE SEQ_NAME = 'EMP_SEQ'"
				.to_string(),
			"SELECT SEQ_VALUE FROM SEQUENCES WHERE SEQ_NAME = 'EMP_SEQ'".to_string(),
		]
	);
}

#[rstest]
#[case(Box::new(OracleDialect::new()), "SELECT HR.EMP_SEQ.NEXTVAL FROM DUAL")]
#[case(Box::new(PostgresDialect::new()), "SELECT nextval('HR.EMP_SEQ')")]
#[case(Box::new(HsqlDialect::new()), "CALL NEXT VALUE FOR HR.EMP_SEQ")]
fn test_next_sequence_value_in_schema(
	#[case] dialect: Box<dyn DialectHandler>,
	#[case] expected: &str,
) {
	assert_eq!(
		next_sequence_value(dialect.as_ref(), Some("HR"), "EMP_SEQ").unwrap(),
		vec![expected.to_string()]
	);
}

#[rstest]
fn test_next_sequence_value_uses_configured_schema() {
	let dialect = OracleDialect::with_settings(DialectSettings {
		schema_name: Some("PAYROLL".to_string()),
		..Default::default()
	});
	assert_eq!(
		next_sequence_value(&dialect, None, "EMP_SEQ").unwrap(),
		vec!["SELECT PAYROLL.EMP_SEQ.NEXTVAL FROM DUAL".to_string()]
	);
	assert_eq!(
		next_sequence_value(&dialect, Some("HR"), "EMP_SEQ").unwrap(),
		vec!["SELECT HR.EMP_SEQ.NEXTVAL FROM DUAL".to_string()]
	);
}

#[rstest]
fn test_emulation_is_decided_by_the_sequence_table_setting() {
	let plain = MySqlDialect::new();
	let emulated =
		MySqlDialect::with_settings(DialectSettings::default().with_sequence_table(true));

	assert!(!plain.config().emulates_sequences());
	assert!(emulated.config().emulates_sequences());
	assert!(!OracleDialect::new().config().emulates_sequences());
}

#[rstest]
fn test_next_sequence_value_unsupported() {
	assert_eq!(
		next_sequence_value(&SqliteDialect::new(), None, "EMP_SEQ"),
		Err(QueryError::UnsupportedFeature {
			dialect: DialectKind::Sqlite,
			feature: Feature::Sequences,
		})
	);
}

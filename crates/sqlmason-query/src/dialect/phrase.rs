//! Phrase identifiers and template expansion.
//!
//! A phrase template is SQL text with two kinds of slots: `?` stands for
//! the operand the phrase is applied to, `{n}` for its n-th argument.
//! `UPPER(?)`, `SUBSTRING(?, {0}, {1})` and `OFFSET {1} ROWS FETCH NEXT {0} ROWS ONLY`
//! are typical templates.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

macro_rules! phrases {
	($($(#[$meta:meta])* $variant:ident => $name:literal,)*) => {
		/// Identifier of a dialect-specific SQL fragment.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
		pub enum Phrase {
			$($(#[$meta])* $variant,)*
		}

		impl Phrase {
			/// Every phrase, in declaration order.
			pub const ALL: &'static [Phrase] = &[$(Phrase::$variant,)*];

			/// Returns the snake_case name used in configuration files.
			#[must_use]
			pub fn as_str(&self) -> &'static str {
				match self {
					$(Self::$variant => $name,)*
				}
			}
		}
	};
}

phrases! {
	/// `NULL` literal
	Null => "null",
	BooleanTrue => "boolean_true",
	BooleanFalse => "boolean_false",
	/// Date literal; `{0}` is `YYYY-MM-DD`
	DateTemplate => "date_template",
	/// Timestamp literal; `{0}` is `YYYY-MM-DD HH:MM:SS[.fff]`
	DateTimeTemplate => "date_time_template",
	CurrentDate => "current_date",
	CurrentDateTime => "current_date_time",
	/// Bind placeholder; `{0}` is the 1-based parameter index
	Parameter => "parameter",
	/// Concatenation of `?` and `{0}`
	Concat => "concat",
	FuncUpper => "func_upper",
	FuncLower => "func_lower",
	FuncTrim => "func_trim",
	FuncLength => "func_length",
	FuncSubstring => "func_substring",
	FuncSubstringEx => "func_substring_ex",
	FuncReplace => "func_replace",
	FuncReverse => "func_reverse",
	FuncIndexOf => "func_index_of",
	FuncCoalesce => "func_coalesce",
	FuncAbs => "func_abs",
	FuncRound => "func_round",
	FuncTrunc => "func_trunc",
	FuncCeiling => "func_ceiling",
	FuncFloor => "func_floor",
	FuncModulo => "func_modulo",
	FuncDay => "func_day",
	FuncMonth => "func_month",
	FuncYear => "func_year",
	FuncSum => "func_sum",
	FuncMax => "func_max",
	FuncMin => "func_min",
	FuncAvg => "func_avg",
	FuncCount => "func_count",
	FuncCountDistinct => "func_count_distinct",
	/// `{0}` is the native type name
	FuncCast => "func_cast",
	/// `{0}` is the row limit
	PagingLimit => "paging_limit",
	/// `{0}` is the row limit, `{1}` the number of skipped rows
	PagingLimitOffset => "paging_limit_offset",
	/// `{0}` is the number of skipped rows
	PagingOffset => "paging_offset",
	/// Row limit placed right after `SELECT`
	PagingTop => "paging_top",
	/// `{0}` is the row limit, `{1}` the number of skipped rows
	PagingOffsetFetch => "paging_offset_fetch",
	PagingFetchFirst => "paging_fetch_first",
	/// Complete statement fetching the next value of sequence `{0}`
	SequenceNextValue => "sequence_next_value",
	/// `{0}` table, `{1}` column definition
	DdlAddColumn => "ddl_add_column",
	/// `{0}` table, `{1}` column, `{2}` new type (and nullability where combined)
	DdlAlterColumn => "ddl_alter_column",
	DdlSetNotNull => "ddl_set_not_null",
	DdlDropNotNull => "ddl_drop_not_null",
	/// Identity clause appended to an auto-increment column
	DdlIdentity => "ddl_identity",
	/// Statement prefix replacing an existing view
	DdlReplaceView => "ddl_replace_view",
	/// `{0}` index, `{1}` table
	DdlDropIndex => "ddl_drop_index",
	/// `{0}` table, `{1}` constraint
	DdlDropForeignKey => "ddl_drop_foreign_key",
	/// `{0}` table, `{1}` constraint
	DdlDropPrimaryKey => "ddl_drop_primary_key",
	/// `{0}` name, `{1}` start, `{2}` increment
	DdlCreateSequence => "ddl_create_sequence",
	/// `{0}` name, `{1}` start
	DdlRestartSequence => "ddl_restart_sequence",
}

impl Phrase {
	/// Looks a phrase up by its [`as_str`](Self::as_str) name, ignoring case.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL
			.iter()
			.copied()
			.find(|p| p.as_str().eq_ignore_ascii_case(name))
	}
}

impl fmt::Display for Phrase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Serialize for Phrase {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Phrase {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let name = String::deserialize(deserializer)?;
		Self::from_name(&name)
			.ok_or_else(|| serde::de::Error::custom(format!("unknown phrase `{name}`")))
	}
}

/// A piece of a parsed phrase template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart<'t> {
	/// Literal SQL text
	Text(&'t str),
	/// The `?` operand slot
	Operand,
	/// The `{n}` argument slot
	Arg(usize),
}

/// Splits a template into text, operand and argument parts.
///
/// A `{` that does not start a well-formed `{n}` slot is kept as text.
pub fn parse_template(template: &str) -> Vec<TemplatePart<'_>> {
	let mut parts = Vec::new();
	let bytes = template.as_bytes();
	let mut start = 0;
	let mut i = 0;
	while i < bytes.len() {
		match bytes[i] {
			b'?' => {
				if start < i {
					parts.push(TemplatePart::Text(&template[start..i]));
				}
				parts.push(TemplatePart::Operand);
				i += 1;
				start = i;
			}
			b'{' => {
				let digits = bytes[i + 1..]
					.iter()
					.take_while(|b| b.is_ascii_digit())
					.count();
				let close = i + 1 + digits;
				if digits > 0 && bytes.get(close) == Some(&b'}') {
					if start < i {
						parts.push(TemplatePart::Text(&template[start..i]));
					}
					// digits are ASCII so the slice is valid and parses
					let index = template[i + 1..close].parse().unwrap_or(usize::MAX);
					parts.push(TemplatePart::Arg(index));
					i = close + 1;
					start = i;
				} else {
					i += 1;
				}
			}
			_ => i += 1,
		}
	}
	if start < bytes.len() {
		parts.push(TemplatePart::Text(&template[start..]));
	}
	parts
}

/// Expands a template with already rendered text.
///
/// Returns `None` when the template refers to an argument that was not supplied
/// or uses the operand slot without an operand.
pub fn fill_template(template: &str, operand: Option<&str>, args: &[&str]) -> Option<String> {
	let mut out = String::with_capacity(template.len() + 16);
	for part in parse_template(template) {
		match part {
			TemplatePart::Text(text) => out.push_str(text),
			TemplatePart::Operand => out.push_str(operand?),
			TemplatePart::Arg(index) => out.push_str(args.get(index)?),
		}
	}
	Some(out)
}

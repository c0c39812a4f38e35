//! Table columns.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::TableIdent;
use crate::types::{ColumnSize, DataType};
use crate::value::Value;

/// Allowed values of a column with their display labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options(Vec<(Value, String)>);

impl Options {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an option, replacing the label of an existing equal value.
	pub fn add(mut self, value: impl Into<Value>, label: impl Into<String>) -> Self {
		let value = value.into();
		let label = label.into();
		match self.0.iter_mut().find(|(v, _)| *v == value) {
			Some(entry) => entry.1 = label,
			None => self.0.push((value, label)),
		}
		self
	}

	pub fn label(&self, value: &Value) -> Option<&str> {
		self.0
			.iter()
			.find(|(v, _)| v == value)
			.map(|(_, label)| label.as_str())
	}

	pub fn contains(&self, value: &Value) -> bool {
		self.label(value).is_some()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Value, &str)> {
		self.0.iter().map(|(v, l)| (v, l.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Declaration of a column before it is added to a table.
///
/// # Example
///
/// ```rust
/// use sqlmason_query::{ColumnSpec, DataType, Database};
///
/// let db = Database::new("HR");
/// let mut employees = db.create_table("EMPLOYEES");
/// let retired = employees
/// 	.add(ColumnSpec::new("RETIRED", DataType::Bool).required(true).default_value(false))
/// 	.unwrap();
/// assert!(retired.is_required());
/// ```
#[derive(Debug, Clone)]
pub struct ColumnSpec {
	pub(crate) name: String,
	pub(crate) data_type: DataType,
	pub(crate) size: ColumnSize,
	pub(crate) required: bool,
	pub(crate) read_only: bool,
	pub(crate) default: Option<Value>,
	pub(crate) options: Option<Options>,
	pub(crate) sequence: Option<String>,
	pub(crate) comment: Option<String>,
}

impl ColumnSpec {
	pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
		Self {
			name: name.into(),
			data_type,
			size: ColumnSize::default(),
			required: false,
			read_only: false,
			default: None,
			options: None,
			sequence: None,
			comment: None,
		}
	}

	pub fn size(mut self, size: impl Into<ColumnSize>) -> Self {
		self.size = size.into();
		self
	}

	/// Marks the column NOT NULL. Auto-increment columns are always required.
	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	pub fn read_only(mut self, read_only: bool) -> Self {
		self.read_only = read_only;
		self
	}

	pub fn default_value(mut self, value: impl Into<Value>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn options(mut self, options: Options) -> Self {
		self.options = Some(options);
		self
	}

	/// Names the sequence feeding an auto-increment column.
	pub fn sequence(mut self, name: impl Into<String>) -> Self {
		self.sequence = Some(name.into());
		self
	}

	pub fn comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());
		self
	}
}

/// Resolved column definition shared by all [`TableColumn`] handles.
#[derive(Debug, Clone)]
pub struct ColumnDef {
	pub(crate) table: Arc<TableIdent>,
	pub(crate) name: String,
	pub(crate) data_type: DataType,
	pub(crate) size: ColumnSize,
	pub(crate) required: bool,
	pub(crate) read_only: bool,
	pub(crate) default: Option<Value>,
	pub(crate) options: Option<Options>,
	pub(crate) sequence: Option<String>,
	pub(crate) comment: Option<String>,
}

impl ColumnDef {
	pub(crate) fn from_spec(table: Arc<TableIdent>, spec: ColumnSpec) -> Self {
		let auto = spec.data_type == DataType::AutoInc;
		Self {
			table,
			name: spec.name,
			data_type: spec.data_type,
			size: spec.size,
			required: spec.required || auto,
			read_only: spec.read_only || auto,
			default: spec.default,
			options: spec.options,
			sequence: spec.sequence,
			comment: spec.comment,
		}
	}

	/// Column of a view or derived table, typed after the select expression.
	pub(crate) fn derived(table: Arc<TableIdent>, name: String, data_type: DataType) -> Self {
		Self {
			table,
			name,
			data_type,
			size: ColumnSize::default(),
			required: false,
			read_only: true,
			default: None,
			options: None,
			sequence: None,
			comment: None,
		}
	}
}

/// Shared handle to a column of a table, view or derived table.
///
/// Identity is the owning source plus the column name, so handles
/// obtained from different clones of a table compare equal.
#[derive(Debug, Clone)]
pub struct TableColumn(Arc<ColumnDef>);

impl TableColumn {
	pub(crate) fn new(def: ColumnDef) -> Self {
		Self(Arc::new(def))
	}

	/// Same column definition, owned by another source.
	pub(crate) fn rebind(&self, table: Arc<TableIdent>) -> Self {
		Self::new(ColumnDef {
			table,
			..(*self.0).clone()
		})
	}

	pub fn name(&self) -> &str {
		&self.0.name
	}

	pub fn table(&self) -> &Arc<TableIdent> {
		&self.0.table
	}

	pub fn data_type(&self) -> DataType {
		self.0.data_type
	}

	pub fn size(&self) -> ColumnSize {
		self.0.size
	}

	pub fn is_required(&self) -> bool {
		self.0.required
	}

	pub fn is_read_only(&self) -> bool {
		self.0.read_only
	}

	pub fn is_auto_generated(&self) -> bool {
		self.0.data_type == DataType::AutoInc
	}

	pub fn default_value(&self) -> Option<&Value> {
		self.0.default.as_ref()
	}

	pub fn options(&self) -> Option<&Options> {
		self.0.options.as_ref()
	}

	pub fn comment(&self) -> Option<&str> {
		self.0.comment.as_deref()
	}

	/// Sequence feeding this column: the declared one, else `{TABLE}_{COLUMN}_SEQ`.
	pub fn sequence_name(&self) -> String {
		self.0
			.sequence
			.clone()
			.unwrap_or_else(|| format!("{}_{}_SEQ", self.0.table.name(), self.0.name))
	}

	pub fn definition(&self) -> &ColumnDef {
		&self.0
	}

	/// Returns `true` if this column belongs to `table`.
	pub fn belongs_to(&self, table: &TableIdent) -> bool {
		*self.0.table == *table
	}
}

impl PartialEq for TableColumn {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
			|| (self.0.name == other.0.name && self.0.table == other.0.table)
	}
}

impl Eq for TableColumn {}

impl Hash for TableColumn {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.table.hash(state);
		self.0.name.hash(state);
	}
}

impl fmt::Display for TableColumn {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.0.table.reference_name(), self.0.name)
	}
}

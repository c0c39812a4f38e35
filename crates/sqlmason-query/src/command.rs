//! The statement model.
//!
//! A [`Command`] is a mutable, dialect-independent description of a query:
//! select list, explicit sources and joins, constraints, grouping, ordering,
//! paging and the column assignments used by INSERT and UPDATE. It is
//! rendered into SQL by the [`builder`](crate::builder).
//!
//! Constraints added with [`Command::and_where`] are folded: a constraint
//! on the same column and operator family as an existing one replaces it,
//! and adding an identical constraint is a no-op.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::error::{QueryError, Result};
use crate::expr::{ColumnExpr, CompareExpr, Operand, RenderSql};
use crate::schema::{
	AsSource, ColumnDef, Database, DatabaseId, SourceKind, TableColumn, TableIdent,
};
use crate::types::{JoinType, Order};

/// A joined source with its join condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
	pub source: Arc<TableIdent>,
	pub on: CompareExpr,
	pub kind: JoinType,
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
	pub expr: ColumnExpr,
	pub order: Order,
}

/// A column assignment of an INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
	pub column: TableColumn,
	pub value: Operand,
}

/// A command used as a row source under an alias.
#[derive(Debug, Clone)]
pub struct DerivedTable {
	ident: Arc<TableIdent>,
	columns: Vec<TableColumn>,
}

impl DerivedTable {
	pub fn alias(&self) -> &str {
		self.ident.name()
	}

	pub fn ident(&self) -> &Arc<TableIdent> {
		&self.ident
	}

	pub fn columns(&self) -> &[TableColumn] {
		&self.columns
	}

	/// Column of the derived table named after a select-list entry.
	pub fn column(&self, name: &str) -> Result<TableColumn> {
		self.columns
			.iter()
			.find(|c| c.name().eq_ignore_ascii_case(name))
			.cloned()
			.ok_or_else(|| QueryError::ObjectNotFound {
				kind: "column",
				name: format!("{}.{}", self.alias(), name),
			})
	}
}

impl AsSource for DerivedTable {
	fn source(&self) -> Arc<TableIdent> {
		Arc::clone(&self.ident)
	}
}

/// A dialect-independent statement bound to one [`Database`].
///
/// Create one with [`Database::command`].
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
	database: DatabaseId,
	database_name: Arc<str>,
	attached: Vec<DatabaseId>,
	distinct: bool,
	select: Vec<ColumnExpr>,
	from: Vec<Arc<TableIdent>>,
	joins: Vec<Join>,
	where_: Option<CompareExpr>,
	group_by: Vec<ColumnExpr>,
	having: Option<CompareExpr>,
	order_by: Vec<OrderBy>,
	limit: Option<u64>,
	skip: Option<u64>,
	set: Vec<SetExpr>,
}

impl Command {
	pub(crate) fn new(database: DatabaseId, database_name: Arc<str>) -> Self {
		Self {
			database,
			database_name,
			attached: Vec::new(),
			distinct: false,
			select: Vec::new(),
			from: Vec::new(),
			joins: Vec::new(),
			where_: None,
			group_by: Vec::new(),
			having: None,
			order_by: Vec::new(),
			limit: None,
			skip: None,
			set: Vec::new(),
		}
	}

	pub fn database(&self) -> DatabaseId {
		self.database
	}

	pub fn database_name(&self) -> &str {
		&self.database_name
	}

	/// Allows columns of `other` to be referenced by this command.
	pub fn attach(&mut self, other: &Database) -> &mut Self {
		if other.id() != self.database && !self.attached.contains(&other.id()) {
			self.attached.push(other.id());
		}
		self
	}

	/// Adds an expression to the select list; an expression already selected is ignored.
	pub fn select(&mut self, expr: impl Into<ColumnExpr>) -> &mut Self {
		let expr = expr.into();
		if !self.select.contains(&expr) {
			self.select.push(expr);
		}
		self
	}

	pub fn select_all<I, T>(&mut self, exprs: I) -> &mut Self
	where
		I: IntoIterator<Item = T>,
		T: Into<ColumnExpr>,
	{
		for expr in exprs {
			self.select(expr);
		}
		self
	}

	pub fn distinct(&mut self) -> &mut Self {
		self.distinct = true;
		self
	}

	/// Adds an explicit source. Sources are otherwise inferred from the
	/// columns the command references.
	pub fn from(&mut self, source: &impl AsSource) -> &mut Self {
		let source = source.source();
		if !self.from.contains(&source) {
			self.from.push(source);
		}
		self
	}

	pub fn join(&mut self, source: &impl AsSource, on: CompareExpr, kind: JoinType) -> &mut Self {
		let source = source.source();
		match self.joins.iter_mut().find(|j| j.source == source) {
			Some(join) => {
				join.on = on;
				join.kind = kind;
			}
			None => self.joins.push(Join { source, on, kind }),
		}
		self
	}

	/// Joins the table of `right` on `left = right`.
	pub fn join_on(&mut self, left: &TableColumn, right: &TableColumn, kind: JoinType) -> &mut Self {
		let source = Arc::clone(right.table());
		self.join(&source, left.eq(right), kind)
	}

	/// ANDs `constraint` into the WHERE clause.
	///
	/// Each AND term of `constraint` replaces an existing term that is equal
	/// to it or mutually exclusive with it; otherwise it is appended.
	pub fn and_where(&mut self, constraint: CompareExpr) -> &mut Self {
		self.where_ = fold_constraint(self.where_.take(), constraint);
		self
	}

	/// ORs `constraint` with the whole current WHERE clause.
	pub fn or_where(&mut self, constraint: CompareExpr) -> &mut Self {
		self.where_ = Some(match self.where_.take() {
			Some(current) => current.or(constraint),
			None => constraint,
		});
		self
	}

	/// Removes every WHERE term that compares `column`.
	pub fn remove_where_on(&mut self, column: &TableColumn) -> &mut Self {
		if let Some(current) = self.where_.take() {
			let terms = current
				.into_and_terms()
				.into_iter()
				.filter(|t| !t.references_column(column))
				.collect();
			self.where_ = CompareExpr::and_all(terms);
		}
		self
	}

	pub fn group_by(&mut self, expr: impl Into<ColumnExpr>) -> &mut Self {
		let expr = expr.into();
		if !self.group_by.contains(&expr) {
			self.group_by.push(expr);
		}
		self
	}

	/// ANDs `constraint` into the HAVING clause, folding like [`and_where`](Self::and_where).
	pub fn having(&mut self, constraint: CompareExpr) -> &mut Self {
		self.having = fold_constraint(self.having.take(), constraint);
		self
	}

	pub fn order_by(&mut self, expr: impl Into<ColumnExpr>, order: Order) -> &mut Self {
		self.order_by.push(OrderBy {
			expr: expr.into(),
			order,
		});
		self
	}

	/// Maximum number of rows to return.
	pub fn limit(&mut self, rows: u64) -> &mut Self {
		self.limit = Some(rows);
		self
	}

	/// Number of rows to skip.
	pub fn skip(&mut self, rows: u64) -> &mut Self {
		self.skip = Some(rows);
		self
	}

	/// Assigns `value` to `column` for INSERT and UPDATE. Assigning the same
	/// column again replaces the earlier value.
	pub fn set(&mut self, column: &TableColumn, value: impl Into<Operand>) -> &mut Self {
		let value = value.into();
		match self.set.iter_mut().find(|s| s.column == *column) {
			Some(existing) => existing.value = value,
			None => self.set.push(SetExpr {
				column: column.clone(),
				value,
			}),
		}
		self
	}

	pub fn clear_select(&mut self) -> &mut Self {
		self.select.clear();
		self.distinct = false;
		self
	}

	pub fn clear_where(&mut self) -> &mut Self {
		self.where_ = None;
		self
	}

	pub fn clear_order_by(&mut self) -> &mut Self {
		self.order_by.clear();
		self
	}

	pub fn clear_paging(&mut self) -> &mut Self {
		self.limit = None;
		self.skip = None;
		self
	}

	pub fn clear_set(&mut self) -> &mut Self {
		self.set.clear();
		self
	}

	/// Resets everything but the database binding.
	pub fn clear(&mut self) -> &mut Self {
		let attached = std::mem::take(&mut self.attached);
		*self = Self::new(self.database, Arc::clone(&self.database_name));
		self.attached = attached;
		self
	}

	pub fn is_distinct(&self) -> bool {
		self.distinct
	}

	pub fn select_list(&self) -> &[ColumnExpr] {
		&self.select
	}

	pub fn explicit_sources(&self) -> &[Arc<TableIdent>] {
		&self.from
	}

	pub fn joins(&self) -> &[Join] {
		&self.joins
	}

	pub fn where_root(&self) -> Option<&CompareExpr> {
		self.where_.as_ref()
	}

	pub fn group_by_list(&self) -> &[ColumnExpr] {
		&self.group_by
	}

	pub fn having_root(&self) -> Option<&CompareExpr> {
		self.having.as_ref()
	}

	pub fn order_by_list(&self) -> &[OrderBy] {
		&self.order_by
	}

	pub fn row_limit(&self) -> Option<u64> {
		self.limit
	}

	pub fn row_offset(&self) -> Option<u64> {
		self.skip
	}

	pub fn set_list(&self) -> &[SetExpr] {
		&self.set
	}

	/// Wraps this command as a row source named `alias`.
	///
	/// The derived table exposes one column per select-list entry, named
	/// after the entry's alias or source column.
	///
	/// # Errors
	///
	/// - [`QueryError::InvalidCommand`] if the select list is empty
	/// - [`QueryError::DuplicateAlias`] if two entries share a name
	pub fn as_derived(&self, alias: impl Into<String>) -> Result<DerivedTable> {
		let ident = Arc::new(TableIdent::new(
			self.database,
			Arc::clone(&self.database_name),
			None,
			alias,
			SourceKind::Derived(Box::new(self.clone())),
		));
		let columns = self.output_columns(&ident)?;
		Ok(DerivedTable { ident, columns })
	}

	/// Columns produced by the select list, owned by `owner`.
	pub(crate) fn output_columns(&self, owner: &Arc<TableIdent>) -> Result<Vec<TableColumn>> {
		if self.select.is_empty() {
			return Err(QueryError::invalid_command(format!(
				"`{}` has an empty select list",
				owner.name()
			)));
		}
		let mut names: IndexSet<String> = IndexSet::new();
		let mut columns = Vec::with_capacity(self.select.len());
		for expr in &self.select {
			let name = expr.output_name();
			if !names.insert(name.to_ascii_uppercase()) {
				return Err(QueryError::DuplicateAlias { alias: name });
			}
			columns.push(TableColumn::new(ColumnDef::derived(
				Arc::clone(owner),
				name,
				expr.data_type(),
			)));
		}
		Ok(columns)
	}

	/// Row sources of this command in FROM order: explicit sources first,
	/// then the sources of referenced columns in first-reference order.
	/// Joined sources are excluded; they render in their join clause.
	pub fn source_idents(&self) -> Vec<Arc<TableIdent>> {
		let mut sources: IndexSet<Arc<TableIdent>> = self.from.iter().cloned().collect();
		for column in self.referenced_columns() {
			sources.insert(Arc::clone(column.table()));
		}
		sources
			.into_iter()
			.filter(|s| !self.joins.iter().any(|j| j.source == *s))
			.collect()
	}

	/// Every column referenced by the select list, joins, constraints,
	/// grouping and ordering, in first-reference order.
	pub fn referenced_columns(&self) -> IndexSet<TableColumn> {
		let mut out = IndexSet::new();
		for expr in &self.select {
			expr.referenced_columns(&mut out);
		}
		for join in &self.joins {
			join.on.referenced_columns(&mut out);
		}
		if let Some(where_) = &self.where_ {
			where_.referenced_columns(&mut out);
		}
		for expr in &self.group_by {
			expr.referenced_columns(&mut out);
		}
		if let Some(having) = &self.having {
			having.referenced_columns(&mut out);
		}
		for order in &self.order_by {
			order.expr.referenced_columns(&mut out);
		}
		out
	}

	/// Checks that every referenced column belongs to this command's
	/// database or an attached one.
	pub(crate) fn check_bindings(&self) -> Result<()> {
		let assigned = self.set.iter().map(|s| &s.column);
		let referenced = self.referenced_columns();
		for column in referenced.iter().chain(assigned) {
			if !self.is_bound(column.table().database()) {
				return Err(self.unbound(column.to_string()));
			}
		}
		for source in self.from.iter().chain(self.joins.iter().map(|j| &j.source)) {
			if !self.is_bound(source.database()) {
				return Err(self.unbound(source.name().to_string()));
			}
		}
		Ok(())
	}

	fn is_bound(&self, database: DatabaseId) -> bool {
		database == self.database || self.attached.contains(&database)
	}

	fn unbound(&self, column: String) -> QueryError {
		QueryError::UnboundColumn {
			column,
			database: self.database_name.to_string(),
		}
	}
}

fn fold_constraint(current: Option<CompareExpr>, constraint: CompareExpr) -> Option<CompareExpr> {
	let mut terms = current.map(CompareExpr::into_and_terms).unwrap_or_default();
	for term in constraint.into_and_terms() {
		match terms
			.iter()
			.position(|t| *t == term || t.is_mutually_exclusive(&term))
		{
			Some(pos) => terms[pos] = term,
			None => terms.push(term),
		}
	}
	CompareExpr::and_all(terms)
}

//! SQL rendering.
//!
//! [`SqlBuilder`] walks a [`Command`] and its expression tree, writing SQL
//! text and bind parameters for one dialect. [`render`] and
//! [`render_statement`] are the entry points most callers need.
//!
//! Rendering either produces a complete statement or an error; partial SQL
//! text never escapes.

use std::sync::Arc;

use indexmap::IndexSet;

use crate::command::Command;
use crate::dialect::{DialectHandler, Feature, PagingStyle, Phrase, TemplatePart, parse_template};
use crate::error::{QueryError, Result};
use crate::expr::{ColumnExpr, CompareExpr, RenderContext, RenderSql};
use crate::schema::{SourceKind, TableColumn, TableIdent};
use crate::types::{DataType, Order};
use crate::value::{Value, Values, format_literal};

mod sql_writer;

pub use sql_writer::SqlWriter;

/// Kind of statement rendered from a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatementKind {
	#[default]
	Select,
	Insert,
	Update,
	Delete,
}

impl StatementKind {
	#[must_use]
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Select => "SELECT",
			Self::Insert => "INSERT",
			Self::Update => "UPDATE",
			Self::Delete => "DELETE",
		}
	}
}

/// Renders the SELECT statement of `cmd`.
///
/// # Examples
///
/// ```rust
/// use sqlmason_query::prelude::*;
///
/// let mut db = Database::new("SHOP");
/// let mut items = db.create_table("ITEMS");
/// let price = items.add_column("PRICE", DataType::Decimal, (10, 2), true).unwrap();
/// db.add_table(items).unwrap();
///
/// let mut cmd = db.command();
/// cmd.select(price.max());
///
/// let (sql, _) = render(&cmd, &SqliteDialect::new()).unwrap();
/// assert_eq!(sql, "SELECT MAX(PRICE) FROM ITEMS");
/// ```
pub fn render(cmd: &Command, dialect: &dyn DialectHandler) -> Result<(String, Values)> {
	render_statement(cmd, StatementKind::Select, dialect)
}

/// Renders `cmd` as a statement of `kind`.
///
/// # Errors
///
/// Any [`QueryError`] raised by the command's expressions or by the
/// dialect lacking a phrase, type or feature the command needs.
pub fn render_statement(
	cmd: &Command,
	kind: StatementKind,
	dialect: &dyn DialectHandler,
) -> Result<(String, Values)> {
	let mut builder = SqlBuilder::new(dialect);
	match kind {
		StatementKind::Select => builder.build_select(cmd)?,
		StatementKind::Insert => builder.build_insert(cmd)?,
		StatementKind::Update => builder.build_update(cmd)?,
		StatementKind::Delete => builder.build_delete(cmd)?,
	}
	let (sql, values) = builder.finish();
	tracing::debug!(
		dialect = %dialect.kind(),
		statement = kind.as_str(),
		params = values.len(),
		"rendered statement"
	);
	tracing::trace!(sql = %sql);
	Ok((sql, values))
}

/// Writes the SQL of commands and expressions for one dialect.
#[derive(Debug)]
pub struct SqlBuilder<'d> {
	dialect: &'d dyn DialectHandler,
	writer: SqlWriter,
	/// Whether column references carry their source name
	qualify: bool,
	/// Sub-select nesting level
	depth: usize,
	/// Never bind parameters, e.g. for view definitions in DDL
	inline_values: bool,
}

impl<'d> SqlBuilder<'d> {
	pub fn new(dialect: &'d dyn DialectHandler) -> Self {
		Self {
			dialect,
			writer: SqlWriter::new(),
			qualify: false,
			depth: 0,
			inline_values: false,
		}
	}

	/// Builder that writes every value as a literal.
	///
	/// Used where a statement cannot carry bind parameters, such as the
	/// SELECT of a view definition. Explicit parameters are rejected.
	pub fn with_inline_values(dialect: &'d dyn DialectHandler) -> Self {
		Self {
			inline_values: true,
			..Self::new(dialect)
		}
	}

	pub fn dialect(&self) -> &'d dyn DialectHandler {
		self.dialect
	}

	/// SQL written so far.
	pub fn sql(&self) -> &str {
		self.writer.sql()
	}

	pub fn push(&mut self, sql: &str) {
		self.writer.push(sql);
	}

	pub fn push_identifier(&mut self, name: &str) {
		let dialect = self.dialect;
		self.writer
			.push_identifier(name, |n| dialect.quote_identifier(n));
	}

	/// Column reference, qualified with its source name when the current
	/// statement reads from more than one source or is a sub-select.
	pub fn push_column(&mut self, column: &TableColumn, ctx: RenderContext) {
		if self.qualify && !ctx.contains(RenderContext::NAME_ONLY) {
			self.push_identifier(column.table().reference_name());
			self.push(".");
		}
		self.push_identifier(column.name());
	}

	/// Writes a constant either as a literal or as a bind parameter.
	///
	/// NULL and the current date and time are always literals; binary values
	/// are always bound. Other values are bound when the dialect settings
	/// ask for prepared statements.
	pub fn push_value(&mut self, value: &Value, hint: DataType) -> Result<()> {
		let bind = match value {
			Value::Null | Value::CurrentDate | Value::CurrentDateTime => false,
			Value::Bytes(_) => true,
			_ => self.dialect.settings().prepared_statements && !self.inline_values,
		};
		if bind {
			return self.push_param(value);
		}
		let literal = format_literal(value, hint, self.dialect)?;
		self.push(&literal);
		Ok(())
	}

	/// Writes a placeholder and binds `value`.
	pub fn push_param(&mut self, value: &Value) -> Result<()> {
		if self.inline_values {
			return Err(QueryError::malformed(
				format!("{value:?}"),
				"parameters cannot be used in this statement",
			));
		}
		let dialect = self.dialect;
		self.writer
			.push_param(value.clone(), |index| dialect.placeholder(index))?;
		Ok(())
	}

	/// Expands the template of `phrase`, rendering `operand` into `?` and
	/// `args[n]` into `{n}`.
	pub fn push_phrase(
		&mut self,
		phrase: Phrase,
		operand: Option<&dyn RenderSql>,
		args: &[&dyn RenderSql],
		ctx: RenderContext,
	) -> Result<()> {
		let dialect = self.dialect;
		let template = dialect.phrase(phrase)?;
		let missing = || QueryError::MissingPhrase {
			dialect: dialect.kind(),
			phrase,
		};
		for part in parse_template(template) {
			match part {
				TemplatePart::Text(text) => self.push(text),
				TemplatePart::Operand => operand.ok_or_else(missing)?.render_into(self, ctx)?,
				TemplatePart::Arg(index) => args
					.get(index)
					.ok_or_else(missing)?
					.render_into(self, ctx)?,
			}
		}
		Ok(())
	}

	/// Writes the SELECT of `cmd` as a sub-select, with `extra_where` ANDed
	/// to its WHERE clause.
	pub fn push_subquery(&mut self, cmd: &Command, extra_where: Option<&CompareExpr>) -> Result<()> {
		self.depth += 1;
		let saved = self.qualify;
		let result = self.write_select(cmd, extra_where);
		self.qualify = saved;
		self.depth -= 1;
		result
	}

	pub fn build_select(&mut self, cmd: &Command) -> Result<()> {
		self.write_select(cmd, None)
	}

	/// `INSERT INTO T (C1, C2) VALUES (v1, v2)`
	pub fn build_insert(&mut self, cmd: &Command) -> Result<()> {
		cmd.check_bindings()?;
		let table = assigned_table(cmd, "INSERT")?;
		self.qualify = false;
		self.push("INSERT INTO ");
		self.push_source_name(&table);
		self.push(" (");
		let set = cmd.set_list();
		for (i, assignment) in set.iter().enumerate() {
			if i > 0 {
				self.push(", ");
			}
			self.push_column(&assignment.column, RenderContext::NAME_ONLY);
		}
		self.push(") VALUES (");
		for (i, assignment) in set.iter().enumerate() {
			if i > 0 {
				self.push(", ");
			}
			assignment.value.render_with_hint(
				self,
				RenderContext::VALUE_ONLY,
				assignment.column.data_type(),
			)?;
		}
		self.push(")");
		Ok(())
	}

	/// `UPDATE T SET C = v[, ...][ WHERE ...]`
	pub fn build_update(&mut self, cmd: &Command) -> Result<()> {
		cmd.check_bindings()?;
		let table = assigned_table(cmd, "UPDATE")?;
		ensure_single_table(cmd.where_root(), &table, "UPDATE")?;
		self.qualify = false;
		self.push("UPDATE ");
		self.push_source_name(&table);
		self.push(" SET ");
		for (i, assignment) in cmd.set_list().iter().enumerate() {
			if i > 0 {
				self.push(", ");
			}
			self.push_column(&assignment.column, RenderContext::NAME_ONLY);
			self.push(" = ");
			assignment.value.render_with_hint(
				self,
				RenderContext::VALUE_ONLY,
				assignment.column.data_type(),
			)?;
		}
		self.push_where(cmd.where_root())
	}

	/// `DELETE FROM T[ WHERE ...]`
	pub fn build_delete(&mut self, cmd: &Command) -> Result<()> {
		cmd.check_bindings()?;
		let table = match cmd.explicit_sources() {
			[table] => Arc::clone(table),
			[] => {
				let mut columns = IndexSet::new();
				if let Some(where_) = cmd.where_root() {
					where_.referenced_columns(&mut columns);
				}
				let tables: IndexSet<&Arc<TableIdent>> = columns.iter().map(|c| c.table()).collect();
				match tables.into_iter().collect::<Vec<_>>().as_slice() {
					[table] => Arc::clone(table),
					_ => {
						return Err(QueryError::invalid_command(
							"DELETE needs exactly one table; add it with `from`",
						));
					}
				}
			}
			_ => {
				return Err(QueryError::invalid_command(
					"DELETE cannot read from more than one table",
				));
			}
		};
		ensure_single_table(cmd.where_root(), &table, "DELETE")?;
		self.qualify = false;
		self.push("DELETE FROM ");
		self.push_source_name(&table);
		self.push_where(cmd.where_root())
	}

	pub fn finish(self) -> (String, Values) {
		self.writer.finish()
	}

	fn write_select(&mut self, cmd: &Command, extra_where: Option<&CompareExpr>) -> Result<()> {
		cmd.check_bindings()?;
		self.check_select(cmd)?;

		let sources = cmd.source_idents();
		self.qualify = sources.len() + cmd.joins().len() > 1 || self.depth > 0;
		let style = self.dialect.config().paging_style();

		self.push("SELECT ");
		if cmd.is_distinct() {
			self.push("DISTINCT ");
		}
		if let (PagingStyle::TopOffsetFetch, Some(limit), None) =
			(style, cmd.row_limit(), cmd.row_offset())
		{
			let top = self
				.dialect
				.fill_phrase(Phrase::PagingTop, None, &[&limit.to_string()])?;
			self.push(&top);
			self.push(" ");
		}
		for (i, expr) in cmd.select_list().iter().enumerate() {
			if i > 0 {
				self.push(", ");
			}
			expr.render_into(self, RenderContext::DEFAULT)?;
		}

		if sources.is_empty() && cmd.joins().is_empty() {
			if let Some(dummy) = self.dialect.config().dummy_table() {
				self.push(" FROM ");
				self.push(dummy);
			}
		} else {
			self.push(" FROM ");
			for (i, source) in sources.iter().enumerate() {
				if i > 0 {
					self.push(", ");
				}
				self.push_source(source)?;
			}
			for join in cmd.joins() {
				if !sources.is_empty() {
					self.push(" ");
				}
				self.push(join.kind.as_str());
				self.push(" ");
				self.push_source(&join.source)?;
				self.push(" ON ");
				join.on.render_into(self, RenderContext::DEFAULT)?;
			}
		}

		let where_ = match (cmd.where_root(), extra_where) {
			(Some(own), Some(extra)) => Some(own.clone().and(extra.clone())),
			(own, extra) => own.or(extra).cloned(),
		};
		self.push_where(where_.as_ref())?;

		if !cmd.group_by_list().is_empty() {
			self.push(" GROUP BY ");
			for (i, expr) in cmd.group_by_list().iter().enumerate() {
				if i > 0 {
					self.push(", ");
				}
				expr.render_into(self, RenderContext::VALUE_ONLY)?;
			}
		}
		if let Some(having) = cmd.having_root() {
			self.push(" HAVING ");
			having.render_into(self, RenderContext::DEFAULT)?;
		}
		if !cmd.order_by_list().is_empty() {
			self.push(" ORDER BY ");
			for (i, order) in cmd.order_by_list().iter().enumerate() {
				if i > 0 {
					self.push(", ");
				}
				order.expr.render_into(self, RenderContext::VALUE_ONLY)?;
				if order.order == Order::Desc {
					self.push(" DESC");
				}
			}
		}
		self.push_paging(style, cmd.row_limit(), cmd.row_offset())
	}

	fn check_select(&self, cmd: &Command) -> Result<()> {
		if cmd.select_list().is_empty() {
			return Err(QueryError::invalid_command("the select list is empty"));
		}
		let mut aliases = IndexSet::new();
		for expr in cmd.select_list() {
			if let ColumnExpr::Alias(_, alias) = expr
				&& !aliases.insert(alias.to_ascii_uppercase())
			{
				return Err(QueryError::DuplicateAlias {
					alias: alias.clone(),
				});
			}
		}
		let dialect = self.dialect;
		if cmd.row_limit().is_some() && !dialect.supports(Feature::RowLimit) {
			return Err(QueryError::UnsupportedFeature {
				dialect: dialect.kind(),
				feature: Feature::RowLimit,
			});
		}
		if cmd.row_offset().is_some() {
			if !dialect.supports(Feature::RowOffset) {
				return Err(QueryError::UnsupportedFeature {
					dialect: dialect.kind(),
					feature: Feature::RowOffset,
				});
			}
			if dialect.supports(Feature::OffsetRequiresOrderBy) && cmd.order_by_list().is_empty() {
				return Err(QueryError::OffsetRequiresOrderBy {
					dialect: dialect.kind(),
				});
			}
		}
		Ok(())
	}

	fn push_where(&mut self, where_: Option<&CompareExpr>) -> Result<()> {
		if let Some(where_) = where_ {
			self.push(" WHERE ");
			where_.render_into(self, RenderContext::DEFAULT)?;
		}
		Ok(())
	}

	/// Paging numbers are always inlined.
	fn push_paging(&mut self, style: PagingStyle, limit: Option<u64>, skip: Option<u64>) -> Result<()> {
		let phrase = match (style, limit, skip) {
			(_, None, None) => return Ok(()),
			(PagingStyle::LimitOffset, Some(_), None) => Phrase::PagingLimit,
			(PagingStyle::LimitOffset, Some(_), Some(_)) => Phrase::PagingLimitOffset,
			(PagingStyle::TopOffsetFetch, Some(_), None) => return Ok(()),
			(PagingStyle::TopOffsetFetch | PagingStyle::OffsetFetch, Some(_), Some(_)) => {
				Phrase::PagingOffsetFetch
			}
			(PagingStyle::OffsetFetch, Some(_), None) => Phrase::PagingFetchFirst,
			(_, None, Some(_)) => Phrase::PagingOffset,
		};
		let limit = limit.unwrap_or_default().to_string();
		let skip = skip.unwrap_or_default().to_string();
		let args = match phrase {
			Phrase::PagingOffset => [skip.as_str(), limit.as_str()],
			_ => [limit.as_str(), skip.as_str()],
		};
		let sql = self.dialect.fill_phrase(phrase, None, &args)?;
		self.push(" ");
		self.push(&sql);
		Ok(())
	}

	fn push_source(&mut self, source: &Arc<TableIdent>) -> Result<()> {
		match source.kind() {
			SourceKind::Derived(cmd) => {
				self.push("(");
				self.push_subquery(cmd, None)?;
				self.push(") ");
				self.push_identifier(source.name());
			}
			SourceKind::Table | SourceKind::View => {
				self.push_source_name(source);
				if let Some(alias) = source.alias() {
					self.push(" ");
					self.push_identifier(alias);
				}
			}
		}
		Ok(())
	}

	fn push_source_name(&mut self, source: &TableIdent) {
		let name = source.qualified_name(self.dialect);
		self.push(&name);
	}
}

/// The one table every assignment of `cmd` targets.
fn assigned_table(cmd: &Command, statement: &str) -> Result<Arc<TableIdent>> {
	let Some((first, rest)) = cmd.set_list().split_first() else {
		return Err(QueryError::invalid_command(format!(
			"{statement} needs at least one column assignment"
		)));
	};
	let table = first.column.table();
	if rest.iter().any(|s| s.column.table() != table) {
		return Err(QueryError::invalid_command(format!(
			"{statement} assignments must target a single table"
		)));
	}
	if matches!(table.kind(), SourceKind::Derived(_)) {
		return Err(QueryError::invalid_command(format!(
			"{statement} cannot target the derived table `{}`",
			table.name()
		)));
	}
	Ok(Arc::clone(table))
}

fn ensure_single_table(
	where_: Option<&CompareExpr>,
	table: &Arc<TableIdent>,
	statement: &str,
) -> Result<()> {
	let Some(where_) = where_ else {
		return Ok(());
	};
	let mut columns = IndexSet::new();
	where_.referenced_columns(&mut columns);
	match columns.iter().find(|c| c.table() != table) {
		Some(foreign) => Err(QueryError::invalid_command(format!(
			"{statement} of `{}` cannot constrain column `{foreign}` of another table",
			table.name()
		))),
		None => Ok(()),
	}
}

//! Views.

use sqlmason_query::{Feature, Phrase, SqlBuilder, View};

use super::DdlGenerator;
use crate::error::Result;
use crate::script::DdlScript;

impl DdlGenerator<'_> {
	/// `CREATE VIEW V (columns) AS SELECT ..`
	///
	/// The defining query is rendered with inline literals; view
	/// definitions cannot carry bind parameters.
	pub(crate) fn create_view(&self, view: &View, replace: bool, script: &mut DdlScript) -> Result<()> {
		let mut builder = SqlBuilder::with_inline_values(self.dialect);
		builder.build_select(view.command())?;
		let (select, _) = builder.finish();

		let head = if replace {
			self.dialect.phrase(Phrase::DdlReplaceView)?
		} else {
			"CREATE VIEW"
		};
		script.push(format!(
			"{head} {} ({}) AS {select}",
			view.ident().qualified_name(self.dialect),
			self.column_list(view.columns())?
		));
		Ok(())
	}

	/// Replaces the view in place where possible, else drops and recreates it.
	pub(crate) fn alter_view(&self, view: &View, script: &mut DdlScript) -> Result<()> {
		if self.dialect.supports(Feature::ReplaceView) {
			return self.create_view(view, true, script);
		}
		self.drop_view(view, script);
		self.create_view(view, false, script)
	}

	pub(crate) fn drop_view(&self, view: &View, script: &mut DdlScript) {
		script.push(format!(
			"DROP VIEW {}",
			view.ident().qualified_name(self.dialect)
		));
	}
}

use serde::Serialize;

use crate::error::{Result, RocError};
use crate::input::{DataTable, ScoreColumns, ScoreRecord};
use crate::panels::{OverlayConfig, Panel, PanelConfig, render_overlay, render_panel};

/// What a render function learns about the group it is drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupContext<'a> {
    pub column: &'a str,
    pub key: &'a str,
    pub index: usize,
    pub title: String,
}

/// Filtered data plus group context in, one panel out.
pub trait RenderFn {
    fn render(&self, data: &DataTable, ctx: &GroupContext<'_>) -> Result<Panel>;

    /// Columns the renderer scores. When known, a group whose rows all lack a
    /// truth or score counts as absent.
    fn score_columns(&self) -> Option<&ScoreColumns> {
        None
    }
}

impl<F> RenderFn for F
where
    F: Fn(&DataTable, &GroupContext<'_>) -> Result<Panel>,
{
    fn render(&self, data: &DataTable, ctx: &GroupContext<'_>) -> Result<Panel> {
        self(data, ctx)
    }
}

/// Faceted rendering of each composed group; `config` is the shared render
/// arguments, its title replaced by the group title.
#[derive(Debug, Clone, Default)]
pub struct FacetRenderer {
    pub columns: ScoreColumns,
    pub groups: Option<Vec<String>>,
    pub config: PanelConfig,
}

impl RenderFn for FacetRenderer {
    fn render(&self, data: &DataTable, ctx: &GroupContext<'_>) -> Result<Panel> {
        let records = data.score_records(&self.columns)?;
        check_scorable(&records, ctx)?;
        let config = PanelConfig {
            title: ctx.title.clone(),
            ..self.config.clone()
        };
        render_panel(&records, self.groups.as_deref(), &config)
            .map_err(|e| name_group_column(e, &self.columns.group))
    }

    fn score_columns(&self) -> Option<&ScoreColumns> {
        Some(&self.columns)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlayRenderer {
    pub columns: ScoreColumns,
    pub groups: Option<Vec<String>>,
    pub config: OverlayConfig,
}

impl RenderFn for OverlayRenderer {
    fn render(&self, data: &DataTable, ctx: &GroupContext<'_>) -> Result<Panel> {
        let records = data.score_records(&self.columns)?;
        check_scorable(&records, ctx)?;
        let config = OverlayConfig {
            title: ctx.title.clone(),
            ..self.config.clone()
        };
        render_overlay(&records, self.groups.as_deref(), &config)
            .map_err(|e| name_group_column(e, &self.columns.group))
    }

    fn score_columns(&self) -> Option<&ScoreColumns> {
        Some(&self.columns)
    }
}

/// A composed group left with no usable rows is an empty group, not an empty panel.
fn check_scorable(records: &[ScoreRecord], ctx: &GroupContext<'_>) -> Result<()> {
    if records.is_empty() && !ctx.key.is_empty() {
        return Err(RocError::EmptyGroup {
            group: ctx.key.to_string(),
            column: ctx.column.to_string(),
        });
    }
    Ok(())
}

fn name_group_column(err: RocError, column: &str) -> RocError {
    match err {
        RocError::EmptyGroup { group, .. } => RocError::EmptyGroup {
            group,
            column: column.to_string(),
        },
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupPanel {
    pub key: String,
    pub panel: Panel,
}

/// Panels keyed by group, in group-list order, wrapped `columns` wide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeFigure {
    pub title: String,
    pub group_column: String,
    pub columns: usize,
    pub rows: usize,
    pub panels: Vec<GroupPanel>,
}

impl CompositeFigure {
    pub fn get(&self, key: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.key == key).map(|p| &p.panel)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Row-major cell of the `idx`-th panel.
    pub fn cell(&self, idx: usize) -> (usize, usize) {
        (idx / self.columns, idx % self.columns)
    }
}

pub fn compose(
    data: &DataTable,
    group_column: &str,
    group_list: Option<&[String]>,
    render_fn: &dyn RenderFn,
    layout_columns: usize,
    title: &str,
) -> Result<CompositeFigure> {
    if layout_columns == 0 {
        return Err(RocError::Configuration(
            "layout column count must be at least 1".to_string(),
        ));
    }
    let present = match render_fn.score_columns() {
        Some(score) => data.scorable_values(group_column, score)?,
        None => data.distinct_values(group_column)?,
    };
    let keys = match group_list {
        Some(list) => list.to_vec(),
        None => present.clone(),
    };
    if keys.is_empty() {
        return Err(RocError::Configuration("no groups to compose".to_string()));
    }
    for (idx, key) in keys.iter().enumerate() {
        if keys[..idx].contains(key) {
            return Err(RocError::Configuration(format!(
                "group `{key}` listed more than once"
            )));
        }
    }
    // All-or-nothing: every key must match rows before any panel is built.
    if let Some(missing) = keys.iter().find(|k| !present.contains(*k)) {
        return Err(RocError::EmptyGroup {
            group: missing.clone(),
            column: group_column.to_string(),
        });
    }

    let mut panels = Vec::with_capacity(keys.len());
    for (index, key) in keys.iter().enumerate() {
        let subset = data.filter_eq(group_column, key)?;
        let ctx = GroupContext {
            column: group_column,
            key,
            index,
            title: key.clone(),
        };
        tracing::debug!(group = key.as_str(), rows = subset.n_rows(), "composing group");
        let panel = render_fn.render(&subset, &ctx)?;
        panels.push(GroupPanel {
            key: key.clone(),
            panel,
        });
    }

    let rows = panels.len().div_ceil(layout_columns);
    tracing::info!(
        panels = panels.len(),
        rows,
        columns = layout_columns,
        column = group_column,
        "assembled composite figure"
    );

    Ok(CompositeFigure {
        title: title.to_string(),
        group_column: group_column.to_string(),
        columns: layout_columns,
        rows,
        panels,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/compose/tests.rs"]
mod tests;

//! ROC curves, AUC confidence intervals and figure composition.
//!
//! The core takes labelled scores and returns plain data: curves, intervals,
//! panels and composite figures. Writing those to disk lives in [`report`].

pub mod compose;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod panels;
pub mod report;

pub use compose::{CompositeFigure, FacetRenderer, GroupContext, OverlayRenderer, RenderFn, compose};
pub use error::{Result, RocError};
pub use input::{DataTable, ScoreColumns, ScoreRecord};
pub use model::{AucResult, CiMethod, IntervalConfig, RocCurve, compute_ci, compute_ci_with, compute_curve};
pub use panels::{OverlayConfig, Panel, PanelConfig, render_overlay, render_panel};
pub use report::{Figure, write_reports};

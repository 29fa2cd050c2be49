pub mod curve;
pub mod interval;
pub mod normal;

pub use curve::{RocCurve, RocPoint, compute_curve, rank_auc};
pub use interval::{AucResult, CiMethod, IntervalConfig, compute_ci, compute_ci_with};

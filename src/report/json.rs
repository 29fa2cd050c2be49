use crate::error::Result;
use crate::report::Figure;

/// Pretty JSON of the full figure. The leading corner's `+inf` threshold is
/// written as `null`.
pub fn render_figure_json(figure: &Figure) -> Result<String> {
    let mut out = serde_json::to_string_pretty(figure)?;
    out.push('\n');
    Ok(out)
}

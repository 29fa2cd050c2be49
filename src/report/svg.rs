use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{Result, RocError};
use crate::panels::spine::AXIS_PAD;
use crate::panels::style::{AnnotationPosition, Color as RocColor};
use crate::panels::{Facet, Panel, PanelKind, RocSpine};
use crate::report::Figure;

const DPI: f64 = 100.0;
const FONT: &str = "sans-serif";
const COMPOSITE_TITLE_PT: f64 = 28.0;
const LEGEND_SWATCH_PX: i32 = 20;
const LEGEND_PAD_PX: f64 = 10.0;
/// Average glyph advance and legend row pitch, in multiples of the font size.
const CHAR_WIDTH_EM: f64 = 0.55;
const LINE_HEIGHT_EM: f64 = 1.4;

pub fn render_figure_svg(figure: &Figure) -> Result<String> {
    let mut svg = String::new();
    match figure {
        Figure::Panel(panel) => {
            let root =
                SVGBackend::with_string(&mut svg, pixels(panel.layout.figure_size())).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;
            draw_panel(&root, panel)?;
            root.present().map_err(render_err)?;
        }
        Figure::Composite(composite) => {
            let cell = composite
                .panels
                .iter()
                .map(|gp| gp.panel.layout.figure_size())
                .fold((0.0f64, 0.0f64), |acc, s| (acc.0.max(s.0), acc.1.max(s.1)));
            let size = (
                cell.0 * composite.columns as f64,
                cell.1 * composite.rows as f64 + COMPOSITE_TITLE_PT * 2.0 / DPI,
            );
            let root = SVGBackend::with_string(&mut svg, pixels(size)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;
            let body = root
                .titled(&composite.title, (FONT, font_px(COMPOSITE_TITLE_PT)))
                .map_err(render_err)?;
            let cells = body.split_evenly((composite.rows, composite.columns));
            for (gp, area) in composite.panels.iter().zip(cells.iter()) {
                draw_panel(area, &gp.panel)?;
            }
            root.present().map_err(render_err)?;
        }
    }
    Ok(svg)
}

fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> Result<()> {
    let grid = (panel.layout.rows, panel.layout.columns);
    // Overlay panels carry their title on the single facet caption.
    let cells = match panel.kind {
        PanelKind::Faceted => area
            .titled(&panel.title, (FONT, font_px(panel.title_font_size)))
            .map_err(render_err)?
            .split_evenly(grid),
        PanelKind::Overlay => area.split_evenly(grid),
    };
    for facet in &panel.facets {
        let idx = facet.row * panel.layout.columns + facet.col;
        if let Some(cell) = cells.get(idx) {
            draw_facet(cell, &panel.spine, facet)?;
        }
    }
    Ok(())
}

fn draw_facet<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spine: &RocSpine,
    facet: &Facet,
) -> Result<()> {
    let lo = -AXIS_PAD;
    let hi = 1.0 + AXIS_PAD;
    // Plotted in (1 - specificity, sensitivity); tick labels restore specificity.
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(&facet.title, (FONT, font_px(facet.title_font_size)))
        .x_label_area_size(font_px(spine.x.label_font_size * 2.5) as u32)
        .y_label_area_size(font_px(spine.y.label_font_size * 3.0) as u32)
        .build_cartesian_2d(lo..hi, lo..hi)
        .map_err(render_err)?;

    let x_fmt = |x: &f64| format!("{:.0}", (1.0 - x) * 100.0);
    let y_fmt = |y: &f64| format!("{:.0}", y * 100.0);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(spine.x.label.as_str())
        .y_desc(spine.y.label.as_str())
        .x_labels(spine.x.major_ticks.len())
        .y_labels(spine.y.major_ticks.len())
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style((FONT, font_px(spine.x.tick_font_size)))
        .axis_desc_style((FONT, font_px(spine.x.label_font_size)))
        .draw()
        .map_err(render_err)?;

    let tick_len = 0.012;
    let minor = spine
        .x
        .minor_ticks
        .iter()
        .map(|v| vec![(1.0 - v, lo), (1.0 - v, lo + tick_len)])
        .chain(
            spine
                .y
                .minor_ticks
                .iter()
                .map(|v| vec![(lo, *v), (lo + tick_len, *v)]),
        );
    chart
        .draw_series(minor.map(|pts| PathElement::new(pts, BLACK.stroke_width(1))))
        .map_err(render_err)?;

    let reference = &spine.reference;
    chart
        .draw_series(LineSeries::new(
            [
                (1.0 - reference.from.0, reference.from.1),
                (1.0 - reference.to.0, reference.to.1),
            ],
            to_rgb(reference.color)
                .mix(reference.line.alpha)
                .stroke_width(stroke_px(reference.line.width)),
        ))
        .map_err(render_err)?;

    for trace in &facet.traces {
        let style = to_rgb(trace.color)
            .mix(trace.line.alpha)
            .stroke_width(stroke_px(trace.line.width));
        let series = chart
            .draw_series(LineSeries::new(trace.curve.fpr_tpr(), style))
            .map_err(render_err)?;
        let label = facet
            .legend
            .as_ref()
            .and_then(|l| l.entries.iter().find(|e| e.group == trace.group))
            .map(|e| e.label.clone());
        if let Some(label) = label {
            series.label(label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + LEGEND_SWATCH_PX, y)], style)
            });
        }
    }

    if let Some(legend) = &facet.legend {
        let label_px = font_px(legend.font_size);
        let position = match legend.position {
            AnnotationPosition::Anchor { x, y } => {
                let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
                let plot = chart.plotting_area().dim_in_pixel();
                let (ox, oy) = legend_origin((x, y), plot, &labels, label_px);
                SeriesLabelPosition::Coordinate(ox, oy)
            }
            corner => corner_position(corner),
        };
        chart
            .configure_series_labels()
            .position(position)
            .background_style(&WHITE.mix(0.0))
            .border_style(&TRANSPARENT)
            .label_font((FONT, label_px))
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

fn corner_position(position: AnnotationPosition) -> SeriesLabelPosition {
    match position {
        AnnotationPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        AnnotationPosition::UpperRight => SeriesLabelPosition::UpperRight,
        AnnotationPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        _ => SeriesLabelPosition::LowerRight,
    }
}

/// Top-left pixel of a legend box centred on `center` (axes fractions, y up)
/// inside a plotting area of `plot` pixels, kept inside the area.
fn legend_origin(
    center: (f64, f64),
    plot: (u32, u32),
    labels: &[&str],
    label_px: f64,
) -> (i32, i32) {
    let chars = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_w = LEGEND_SWATCH_PX as f64 + LEGEND_PAD_PX + chars as f64 * label_px * CHAR_WIDTH_EM;
    let box_h = labels.len() as f64 * label_px * LINE_HEIGHT_EM;
    let (w, h) = (plot.0 as f64, plot.1 as f64);
    let left = (center.0 * w - box_w / 2.0).clamp(0.0, (w - box_w).max(0.0));
    let top = ((1.0 - center.1) * h - box_h / 2.0).clamp(0.0, (h - box_h).max(0.0));
    (left.round() as i32, top.round() as i32)
}

fn to_rgb(c: RocColor) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn pixels(inches: (f64, f64)) -> (u32, u32) {
    (
        (inches.0 * DPI).round().max(1.0) as u32,
        (inches.1 * DPI).round().max(1.0) as u32,
    )
}

/// Points to pixels at the output DPI.
fn font_px(points: f64) -> f64 {
    points * DPI / 72.0
}

fn stroke_px(width_pt: f64) -> u32 {
    (width_pt * DPI / 72.0).round().max(1.0) as u32
}

fn render_err<E: std::fmt::Display>(err: E) -> RocError {
    RocError::Render(err.to_string())
}

use serde::Serialize;

use crate::panels::style::{Color, LineStyle, REFERENCE_GREY};

pub const AXIS_PAD: f64 = 0.05;
const MAJOR_STEPS: u32 = 5;
const MINOR_STEPS: u32 = 20;
const TICK_FONT_DELTA: f64 = -7.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// One axis in data coordinates. `start` is drawn at the origin side, so the
/// specificity axis runs from 1.05 down to -0.05.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub major_ticks: Vec<Tick>,
    pub minor_ticks: Vec<f64>,
    pub label_font_size: f64,
    pub tick_font_size: f64,
}

impl Axis {
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// Position of `value` along the axis as a fraction of its length.
    pub fn fraction(&self, value: f64) -> f64 {
        (value - self.start) / (self.end - self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: Color,
    pub line: LineStyle,
}

/// Axis conventions shared by every ROC facet: specificity on x (reversed),
/// sensitivity on y, chance diagonal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocSpine {
    pub x: Axis,
    pub y: Axis,
    pub reference: ReferenceLine,
}

pub fn roc_spine(x_label: &str, y_label: &str, base_font: f64, fixed_minor_ticks: bool) -> RocSpine {
    let tick_font_size = (base_font + TICK_FONT_DELTA).max(1.0);
    let minor_ticks = if fixed_minor_ticks {
        (0..=MINOR_STEPS)
            .map(|k| k as f64 / MINOR_STEPS as f64)
            .collect()
    } else {
        Vec::new()
    };

    let x = Axis {
        label: x_label.to_string(),
        start: 1.0 + AXIS_PAD,
        end: -AXIS_PAD,
        major_ticks: (0..=MAJOR_STEPS)
            .rev()
            .map(|k| percent_tick(k as f64 / MAJOR_STEPS as f64))
            .collect(),
        minor_ticks: minor_ticks.iter().rev().copied().collect(),
        label_font_size: base_font,
        tick_font_size,
    };
    let y = Axis {
        label: y_label.to_string(),
        start: -AXIS_PAD,
        end: 1.0 + AXIS_PAD,
        major_ticks: (0..=MAJOR_STEPS)
            .map(|k| percent_tick(k as f64 / MAJOR_STEPS as f64))
            .collect(),
        minor_ticks,
        label_font_size: base_font,
        tick_font_size,
    };

    RocSpine {
        x,
        y,
        reference: ReferenceLine {
            from: (1.0, 0.0),
            to: (0.0, 1.0),
            color: REFERENCE_GREY,
            line: LineStyle {
                width: 1.2,
                alpha: 1.0,
                dashed: true,
            },
        },
    }
}

fn percent_tick(value: f64) -> Tick {
    Tick {
        value,
        label: format!("{:.0}", value * 100.0),
    }
}

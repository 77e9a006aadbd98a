use crate::domain::model::{AttributeCounts, Bean};
use serde::Serialize;

pub fn count_attributes(beans: &[Bean]) -> AttributeCounts {
    beans.iter().fold(AttributeCounts::default(), |mut acc, bean| {
        acc.gluten_free += usize::from(bean.gluten_free);
        acc.sugar_free += usize::from(bean.sugar_free);
        acc.seasonal += usize::from(bean.seasonal);
        acc.kosher += usize::from(bean.kosher);
        acc
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: &'static str,
    pub value: usize,
    pub color: &'static str,
}

impl AttributeCounts {
    pub fn bars(&self) -> Vec<Bar> {
        vec![
            Bar {
                label: "GlutenFree",
                value: self.gluten_free,
                color: "#f9f3a8",
            },
            Bar {
                label: "SugarFree",
                value: self.sugar_free,
                color: "#b8d4b8",
            },
            Bar {
                label: "Seasonal",
                value: self.seasonal,
                color: "#b8c8d4",
            },
            Bar {
                label: "Kosher",
                value: self.kosher,
                color: "#d4b8d4",
            },
        ]
    }
}

/// Vertical axis of the attribute chart: the tallest bar rounded up to the
/// next multiple of ten, with a tick every ten.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScale {
    pub axis_max: usize,
}

impl ChartScale {
    pub fn for_bars(bars: &[Bar], max_value: Option<usize>) -> Self {
        let max = max_value
            .filter(|&m| m > 0)
            .unwrap_or_else(|| bars.iter().map(|b| b.value).max().unwrap_or(0));
        Self {
            axis_max: max.div_ceil(10) * 10,
        }
    }

    pub fn ticks(&self) -> Vec<usize> {
        (0..=self.axis_max).step_by(10).collect()
    }

    /// Height in `[0, 1]` relative to the axis.
    pub fn height(&self, value: usize) -> f64 {
        if self.axis_max == 0 {
            0.0
        } else {
            value as f64 / self.axis_max as f64
        }
    }
}

/// Horizontal text rendering of the chart, `width` cells for a full axis.
pub fn render_chart(bars: &[Bar], scale: &ChartScale, width: usize) -> String {
    let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for bar in bars {
        let cells = (scale.height(bar.value) * width as f64).round() as usize;
        out.push_str(&format!(
            "{:<lw$} | {:<w$} {}\n",
            bar.label,
            "#".repeat(cells),
            bar.value,
            lw = label_width,
            w = width
        ));
    }
    out.push_str(&format!(
        "{:<lw$} 0{:>w$}\n",
        "",
        scale.axis_max,
        lw = label_width + 2,
        w = width
    ));
    out
}

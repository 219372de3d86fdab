use maud::{html, Markup};
use std::collections::BTreeMap;

use crate::Reading;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 240.0;
const PAD: f64 = 36.0;

/// Mean max/min of every reading sharing one date
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: String,
    pub max_t: Option<f64>,
    pub min_t: Option<f64>,
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: u32,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

/// One point per distinct date, oldest first
pub fn chart_points(readings: &[Reading]) -> Vec<ChartPoint> {
    let mut by_date: BTreeMap<&str, (Mean, Mean)> = BTreeMap::new();
    for reading in readings {
        let (max, min) = by_date.entry(reading.date.as_str()).or_default();
        max.add(reading.max_t);
        min.add(reading.min_t);
    }

    by_date
        .into_iter()
        .map(|(date, (max, min))| ChartPoint {
            date: date.to_string(),
            max_t: max.value(),
            min_t: min.value(),
        })
        .collect()
}

struct Scale {
    low: f64,
    high: f64,
    steps: usize,
}

impl Scale {
    fn x(&self, index: usize) -> f64 {
        if self.steps <= 1 {
            return WIDTH / 2.0;
        }
        PAD + (WIDTH - 2.0 * PAD) * index as f64 / (self.steps - 1) as f64
    }

    fn y(&self, value: f64) -> f64 {
        let span = (self.high - self.low).max(1.0);
        HEIGHT - PAD - (HEIGHT - 2.0 * PAD) * (value - self.low) / span
    }

    fn polyline(&self, values: impl Iterator<Item = Option<f64>>) -> String {
        values
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| format!("{:.1},{:.1}", self.x(i), self.y(v))))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Inline SVG line chart of max and min temperature over time
pub fn temperature_chart(points: &[ChartPoint]) -> Markup {
    let values: Vec<f64> = points
        .iter()
        .flat_map(|p| [p.max_t, p.min_t])
        .flatten()
        .collect();

    let (Some(low), Some(high)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return html! {
            div class="box" {
                p class="has-text-grey has-text-centered" { "No temperatures to chart." }
            }
        };
    };

    let scale = Scale {
        low: low.floor() - 1.0,
        high: high.ceil() + 1.0,
        steps: points.len(),
    };
    let max_line = scale.polyline(points.iter().map(|p| p.max_t));
    let min_line = scale.polyline(points.iter().map(|p| p.min_t));
    let first = points.first().map(|p| p.date.as_str()).unwrap_or_default();
    let last = points.last().map(|p| p.date.as_str()).unwrap_or_default();

    html! {
        div class="box" {
            h2 class="title is-5" { "Temperature over time" }
            svg class="temperature-chart" viewBox=(format!("0 0 {} {}", WIDTH, HEIGHT))
                role="img" aria-label="Max and min temperature over time" {
                line class="axis" x1=(PAD) y1=(HEIGHT - PAD) x2=(WIDTH - PAD) y2=(HEIGHT - PAD) {}
                line class="axis" x1=(PAD) y1=(PAD) x2=(PAD) y2=(HEIGHT - PAD) {}
                text class="axis-label" x=(PAD) y=(PAD - 8.0) { (format!("{:.0}°C", scale.high)) }
                text class="axis-label" x=(PAD) y=(HEIGHT - 8.0) { (first) }
                text class="axis-label" x=(WIDTH - PAD) y=(HEIGHT - 8.0) text-anchor="end" { (last) }
                polyline class="series-max" fill="none" points=(max_line) {}
                polyline class="series-min" fill="none" points=(min_line) {}
            }
            div class="tags mt-2" {
                span class="tag temp-high" { "maxT" }
                span class="tag temp-low" { "minT" }
            }
        }
    }
}

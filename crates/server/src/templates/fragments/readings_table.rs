use maud::{html, Markup};
use std::cmp::Ordering;

use crate::Reading;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    Area,
    #[default]
    Date,
    MaxT,
    MinT,
}

impl SortKey {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("area") => SortKey::Area,
            Some("maxT") => SortKey::MaxT,
            Some("minT") => SortKey::MinT,
            _ => SortKey::Date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Area => "area",
            SortKey::Date => "date",
            SortKey::MaxT => "maxT",
            SortKey::MinT => "minT",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SortKey::Area => "Area",
            SortKey::Date => "Date",
            SortKey::MaxT => "Max °C",
            SortKey::MinT => "Min °C",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn flipped(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// What the dashboard table is currently showing
#[derive(Debug, Clone, Default)]
pub struct TableView {
    /// `None` shows every area
    pub area: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl TableView {
    /// Stable sort, so rows that compare equal stay in insertion order
    pub fn sort(&self, readings: &mut [Reading]) {
        readings.sort_by(|a, b| {
            let ordering = match self.sort {
                SortKey::Area => a.area.cmp(&b.area),
                SortKey::Date => a.date.cmp(&b.date),
                SortKey::MaxT => compare_temperature(a.max_t, b.max_t),
                SortKey::MinT => compare_temperature(a.min_t, b.min_t),
            };
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
    }

    /// Query string that keeps the area filter and sorts by `key`.
    /// Clicking the active column flips its order.
    pub fn sort_link(&self, key: SortKey) -> String {
        let order = if key == self.sort {
            self.order.flipped()
        } else {
            SortOrder::Desc
        };
        let mut params = vec![("sort", key.as_str()), ("order", order.as_str())];
        if let Some(area) = &self.area {
            params.insert(0, ("area", area.as_str()));
        }
        format!("/?{}", serde_urlencoded::to_string(&params).unwrap_or_default())
    }
}

/// Missing temperatures sort below every number
fn compare_temperature(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

fn temperature_cell(value: Option<f64>, class: &str) -> Markup {
    html! {
        @if let Some(temp) = value {
            span class=(format!("temperature {}", class)) { (format!("{:.1}", temp)) }
        } @else {
            span class="has-text-grey" { "-" }
        }
    }
}

/// Rows are rendered in the order given; sort them with [`TableView::sort`] first.
pub fn readings_table(readings: &[Reading], view: &TableView) -> Markup {
    html! {
        div class="table-container" {
            table class="table is-fullwidth is-striped is-hoverable" id="readings-table" {
                thead {
                    tr {
                        @for key in [SortKey::Area, SortKey::Date, SortKey::MaxT, SortKey::MinT] {
                            @let align = if matches!(key, SortKey::MaxT | SortKey::MinT) { "has-text-right" } else { "" };
                            th class=(align) {
                                a href=(view.sort_link(key)) {
                                    (key.label())
                                    @if key == view.sort {
                                        @if view.order == SortOrder::Asc { " ▲" } @else { " ▼" }
                                    }
                                }
                            }
                        }
                    }
                }
                tbody {
                    @for reading in readings {
                        tr {
                            td { (reading.area) }
                            td { (reading.date) }
                            td class="has-text-right" { (temperature_cell(reading.max_t, "temp-high")) }
                            td class="has-text-right" { (temperature_cell(reading.min_t, "temp-low")) }
                        }
                    }
                }
            }
        }
    }
}

use maud::{html, Markup};

use crate::{templates::pages::dashboard::EMPTY_STORE_WARNING, LatestReading};

fn number(value: Option<f64>, precision: usize) -> Markup {
    html! {
        @if let Some(v) = value {
            (format!("{:.*}", precision, v))
        } @else {
            span class="has-text-grey" { "-" }
        }
    }
}

pub fn locations_table(latest: &[LatestReading]) -> Markup {
    html! {
        @if latest.is_empty() {
            div class="notification is-warning" { (EMPTY_STORE_WARNING) }
        } @else {
            div class="table-container" {
                table class="table is-fullwidth is-striped is-hoverable" id="locations-table" {
                    thead {
                        tr {
                            th { "Area" }
                            th { "Latest date" }
                            th class="has-text-right" { "Max °C" }
                            th class="has-text-right" { "Min °C" }
                            th class="has-text-right" { "Lat" }
                            th class="has-text-right" { "Lon" }
                        }
                    }
                    tbody {
                        @for reading in latest {
                            tr {
                                td {
                                    a href=(format!("/?{}", serde_urlencoded::to_string([("area", reading.area.as_str())]).unwrap_or_default())) {
                                        (reading.area)
                                    }
                                }
                                td { (reading.date) }
                                td class="has-text-right" { (number(reading.max_t, 1)) }
                                td class="has-text-right" { (number(reading.min_t, 1)) }
                                td class="has-text-right" { (number(reading.lat, 4)) }
                                td class="has-text-right" { (number(reading.lon, 4)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

use maud::{html, Markup};

use crate::{
    templates::{
        fragments::locations_table,
        layouts::{base, CurrentPage, PageConfig},
    },
    LatestReading,
};

/// Latest reading of every area with its coordinates
pub fn locations_page(latest: &[LatestReading], error: Option<&str>) -> Markup {
    let config = PageConfig {
        title: "CWA Daily Temperatures - Locations",
        current_page: CurrentPage::Locations,
    };

    let content = html! {
        div class="box" {
            h2 class="title is-5" { "Latest reading per area" }
            @if let Some(error) = error {
                div class="notification is-danger" { (error) }
            } @else {
                (locations_table(latest))
            }
        }
    };

    base(&config, content)
}

use maud::{html, Markup};

use crate::templates::TableView;

/// GET form that reloads the dashboard for one area, keeping the current sort
pub fn location_selector(areas: &[String], view: &TableView) -> Markup {
    let selected = view.area.as_deref();
    html! {
        form method="get" action="/" class="location-selector mb-4" {
            input type="hidden" name="sort" value=(view.sort.as_str());
            input type="hidden" name="order" value=(view.order.as_str());
            div class="field has-addons" {
                div class="control" {
                    div class="select is-small" {
                        select name="area" aria-label="Location" {
                            option value="" selected[selected.is_none()] { "All" }
                            @for area in areas {
                                option value=(area) selected[selected == Some(area.as_str())] { (area) }
                            }
                        }
                    }
                }
                div class="control" {
                    button type="submit" class="button is-small is-link" { "Show" }
                }
            }
        }
    }
}

use maud::{html, Markup};

use crate::templates::layouts::CurrentPage;

pub fn navbar(current_page: CurrentPage) -> Markup {
    html! {
        nav class="navbar mb-4" role="navigation" aria-label="main navigation" {
            div class="navbar-menu is-active" {
                div class="navbar-start" {
                    a href="/" class=(nav_item_class(current_page, CurrentPage::Dashboard)) {
                        span class="icon-text" {
                            span class="icon" { (chart_icon()) }
                            span { "Dashboard" }
                        }
                    }
                    a href="/locations" class=(nav_item_class(current_page, CurrentPage::Locations)) {
                        span class="icon-text" {
                            span class="icon" { (pin_icon()) }
                            span { "Locations" }
                        }
                    }
                }
            }
        }
    }
}

fn nav_item_class(current: CurrentPage, page: CurrentPage) -> &'static str {
    if current == page {
        "navbar-item is-active"
    } else {
        "navbar-item"
    }
}

fn chart_icon() -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            polyline points="3 17 9 11 13 15 21 7" {}
            polyline points="3 21 21 21" {}
        }
    }
}

fn pin_icon() -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24"
            fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" {
            path d="M21 10c0 7-9 13-9 13s-9-6-9-13a9 9 0 0 1 18 0z" {}
            circle cx="12" cy="10" r="3" {}
        }
    }
}

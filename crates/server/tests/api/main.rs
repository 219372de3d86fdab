mod api_routes;
mod helpers;
mod ui_pages;

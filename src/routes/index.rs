use axum::response::Html;

use crate::bridge::{ProductForm, ProductModal, view};

pub const TITLE: &str = "Product Demo REST API Service";

/// Landing page with an empty product form and a closed detail modal.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Product admin page", body = String, content_type = "text/html")
    ),
    tag = "Health"
)]
pub async fn index() -> Html<String> {
    Html(render_index())
}

pub fn render_index() -> String {
    format!(
        concat!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>",
            "<body><div class=\"container\"><h1>{title}</h1>",
            "<div id=\"flash_message\"></div>{form}<div id=\"search_results\"></div>{modal}",
            "</div></body></html>"
        ),
        title = TITLE,
        form = view::render_form(&ProductForm::default()),
        modal = ProductModal::default().render(),
    )
}

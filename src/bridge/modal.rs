use std::fmt::Write as _;

use crate::bridge::view::{ProductCells, escape_html};

const CELL_IDS: [&str; 9] = [
    "modal_id",
    "modal_sku",
    "modal_name",
    "modal_description",
    "modal_price",
    "modal_image_url",
    "modal_created",
    "modal_updated",
    "modal_likes",
];

/// Detail overlay for a single search result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductModal {
    cells: ProductCells,
    open: bool,
}

impl ProductModal {
    pub fn show(&mut self, cells: ProductCells) {
        self.cells = cells;
        self.open = true;
    }

    /// Hides the overlay. The last shown values stay in place.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cells(&self) -> &ProductCells {
        &self.cells
    }

    pub fn product_id(&self) -> &str {
        &self.cells.id
    }

    pub fn image_src(&self) -> &str {
        &self.cells.image_url
    }

    pub fn render(&self) -> String {
        let display = if self.open { "flex" } else { "none" };
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<div id="overlay" style="display: {display}"><div class="well col-md-8">"#
        );
        html.push_str(
            r#"<span id="modal_close-btn" class="glyphicon glyphicon-remove"></span><button class="btn btn-primary" id="modal_retrieve-btn">Retrieve</button>"#,
        );
        let _ = write!(
            html,
            r#"<div class="row"><div class="col-md-4"><img id="modal_img" alt="Product Image" src="{}"></div>"#,
            escape_html(self.image_src())
        );
        html.push_str(r#"<table class="col-md-8 modal-table"><tbody>"#);
        for ((label, value), id) in self.cells.labelled().into_iter().zip(CELL_IDS) {
            let _ = write!(
                html,
                r#"<tr><td><b>{label}</b></td><td id="{id}">{}</td></tr>"#,
                escape_html(value)
            );
        }
        html.push_str("</tbody></table></div></div></div>");
        html
    }
}

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{bridge::form::ProductForm, models::Product};

/// Same rendering serde uses on the wire, so form text matches the response.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Display text of one product, one value per table column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCells {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub created: String,
    pub updated: String,
    pub likes: String,
}

impl ProductCells {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            created: product
                .created_time
                .map(format_timestamp)
                .unwrap_or_default(),
            updated: product
                .updated_time
                .map(format_timestamp)
                .unwrap_or_default(),
            likes: product.likes.to_string(),
        }
    }

    /// Label and value pairs in column order.
    pub fn labelled(&self) -> [(&'static str, &str); 9] {
        [
            ("ID", self.id.as_str()),
            ("SKU", self.sku.as_str()),
            ("Name", self.name.as_str()),
            ("Description", self.description.as_str()),
            ("Price", self.price.as_str()),
            ("Image URL", self.image_url.as_str()),
            ("Created", self.created.as_str()),
            ("Updated", self.updated.as_str()),
            ("Likes", self.likes.as_str()),
        ]
    }
}

const HEADERS: [(&str, &str); 9] = [
    ("col-md-1", "ID"),
    ("col-md-2", "SKU"),
    ("col-md-2", "Name"),
    ("col-md-3", "Description"),
    ("col-md-1", "Price"),
    ("col-md-2", "Image URL"),
    ("col-md-2", "Created"),
    ("col-md-2", "Updated"),
    ("col-md-1", "Likes"),
];

/// Search results as a striped table, one clickable row per product.
pub fn render_results_table(products: &[Product]) -> String {
    let mut html = String::from(r#"<table class="table table-striped" cellpadding="10">"#);
    html.push_str("<thead><tr>");
    for (class, label) in HEADERS {
        let _ = write!(html, r#"<th class="{class}">{label}</th>"#);
    }
    html.push_str("</tr></thead><tbody>");

    for (i, product) in products.iter().enumerate() {
        let cells = ProductCells::from_product(product);
        let _ = write!(html, r#"<tr id="row_{i}" onclick="openProduct()">"#);
        for (_, value) in cells.labelled() {
            let _ = write!(html, "<td>{}</td>", escape_html(value));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
    html
}

/// The product form as HTML inputs, using the field ids the page scripts expect.
pub fn render_form(form: &ProductForm) -> String {
    let fields = [
        ("product_id", "ID", &form.id),
        ("product_sku", "SKU", &form.sku),
        ("product_name", "Name", &form.name),
        ("product_description", "Description", &form.description),
        ("product_price", "Price", &form.price),
        ("product_image_url", "Image URL", &form.image_url),
        ("product_created_time", "Created", &form.created_time),
        ("product_updated_time", "Updated", &form.updated_time),
        ("product_likes", "Likes", &form.likes),
        ("product_min_price", "Min Price", &form.min_price),
        ("product_max_price", "Max Price", &form.max_price),
    ];

    let mut html = String::from(r#"<form class="form-horizontal">"#);
    for (id, label, value) in fields {
        let _ = write!(
            html,
            r#"<div class="form-group"><label class="control-label col-sm-2" for="{id}">{label}:</label><div class="col-sm-10"><input type="text" class="form-control" id="{id}" value="{}"></div></div>"#,
            escape_html(value)
        );
    }
    for (id, label) in [
        ("retrieve-btn", "Retrieve"),
        ("delete-btn", "Delete"),
        ("search-btn", "Search"),
        ("clear-btn", "Clear"),
        ("create-btn", "Create"),
        ("update-btn", "Update"),
    ] {
        let _ = write!(
            html,
            r#"<button type="button" class="btn btn-default" id="{id}">{label}</button>"#
        );
    }
    html.push_str("</form>");
    html
}

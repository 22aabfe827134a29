use crate::bridge::form::ProductForm;

/// The optional filters of a product search, in query-string order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl SearchFilters {
    /// Picks the filters out of the form. Empty fields are not filters.
    pub fn from_form(form: &ProductForm) -> Self {
        let present = |value: &str| (!value.is_empty()).then(|| value.to_string());
        Self {
            sku: present(&form.sku),
            name: present(&form.name),
            min_price: present(&form.min_price),
            max_price: present(&form.max_price),
        }
    }

    /// `key=value` pairs for the present filters joined with `&`, in the order
    /// sku, name, min_price, max_price. No filters gives an empty string.
    pub fn query_string(&self) -> String {
        [
            ("sku", &self.sku),
            ("name", &self.name),
            ("min_price", &self.min_price),
            ("max_price", &self.max_price),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|value| format!("{key}={}", encode_value(value)))
        })
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Escapes only the bytes that would change how the query string splits.
fn encode_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' | '=' | '#' | '+' | '%' | '?' => out.push_str(&format!("%{:02X}", ch as u32)),
            ' ' => out.push_str("%20"),
            _ => out.push(ch),
        }
    }
    out
}

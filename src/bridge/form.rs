use serde::{Deserialize, Serialize};

use crate::{bridge::view::format_timestamp, models::Product};

/// Text contents of the product form, exactly as a user would see them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub created_time: String,
    pub updated_time: String,
    pub likes: String,
    /// Search-only lower price bound.
    pub min_price: String,
    /// Search-only upper price bound.
    pub max_price: String,
}

impl ProductForm {
    /// Overwrite every product field, including `id`, from a server response.
    pub fn fill_from(&mut self, product: &Product) {
        self.id = product.id.to_string();
        self.sku = product.sku.clone();
        self.name = product.name.clone();
        self.description = product.description.clone().unwrap_or_default();
        self.price = product.price.to_string();
        self.image_url = product.image_url.clone().unwrap_or_default();
        self.created_time = product
            .created_time
            .map(format_timestamp)
            .unwrap_or_default();
        self.updated_time = product
            .updated_time
            .map(format_timestamp)
            .unwrap_or_default();
        self.likes = product.likes.to_string();
    }

    /// Empty the product fields. `id` and the search bounds are left alone.
    pub fn clear_product_fields(&mut self) {
        self.sku.clear();
        self.name.clear();
        self.description.clear();
        self.price.clear();
        self.image_url.clear();
        self.created_time.clear();
        self.updated_time.clear();
        self.likes.clear();
    }

    pub fn clear(&mut self) {
        self.id.clear();
        self.clear_product_fields();
    }

    pub fn product_fields_empty(&self) -> bool {
        [
            &self.sku,
            &self.name,
            &self.description,
            &self.price,
            &self.image_url,
            &self.created_time,
            &self.updated_time,
            &self.likes,
        ]
        .iter()
        .all(|field| field.is_empty())
    }

    /// Request body for create and update, with the numeric fields coerced.
    pub fn payload(&self) -> ProductPayload {
        ProductPayload {
            sku: self.sku.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: parse_float(&self.price),
            image_url: self.image_url.clone(),
            likes: parse_int(&self.likes),
        }
    }
}

/// Body sent by create and update.
///
/// A numeric field that failed to coerce is `None` and goes out as `null`,
/// leaving the verdict to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub image_url: String,
    pub likes: Option<i64>,
}

/// Longest leading decimal literal of `input`, after leading whitespace.
///
/// `"12.5kg"` is 12.5, `".5"` is 0.5, `"1e3"` is 1000; anything without a
/// leading digit is `None`, as is a value too large to be finite.
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Leading integer of `input`, after leading whitespace.
///
/// A `0x` prefix switches to hexadecimal. `"3.7"` is 3; anything without a
/// leading digit is `None`. A value outside `i64` is also `None` and is sent
/// as null, where a browser would send an approximate float. The service
/// rejects both, since likes is a 32-bit column.
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits: &str = {
        let len = rest
            .char_indices()
            .find(|(_, c)| !c.is_digit(radix))
            .map_or(rest.len(), |(i, _)| i);
        &rest[..len]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

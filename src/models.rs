use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::error::AppError;

const MAX_SKU_LEN: usize = 63;
const MAX_NAME_LEN: usize = 63;
const MAX_TEXT_LEN: usize = 256;
/// Largest magnitude `NUMERIC(10, 2)` holds: 99999999.99.
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// A catalogue entry as it travels over the wire in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    /// Serialised as a decimal string; numbers are accepted on input.
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub likes: i32,
    pub created_time: Option<DateTime<Utc>>,
    pub updated_time: Option<DateTime<Utc>>,
}

/// Client-writable product attributes, validated out of a raw JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    /// `None` keeps the stored value (or the column default on insert).
    pub likes: Option<i32>,
}

impl ProductDraft {
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let object = body.as_object().ok_or_else(|| {
            AppError::DataValidation(
                "Invalid product: body of request contained bad or no data".to_string(),
            )
        })?;

        let sku = required_string(object, "sku")?;
        check_len("sku", &sku, MAX_SKU_LEN)?;
        let name = required_string(object, "name")?;
        check_len("name", &name, MAX_NAME_LEN)?;
        let description = optional_string(object, "description")?;
        if let Some(text) = &description {
            check_len("description", text, MAX_TEXT_LEN)?;
        }
        let image_url = optional_string(object, "image_url")?;
        if let Some(text) = &image_url {
            check_len("image_url", text, MAX_TEXT_LEN)?;
        }
        let price = match object.get("price") {
            Some(value) => parse_price(value)?,
            None => return Err(missing("price")),
        };
        let likes = match object.get("likes") {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| invalid_attribute("likes"))?,
            ),
        };

        Ok(Self {
            sku,
            name,
            description,
            price,
            image_url,
            likes,
        })
    }
}

fn required_string(object: &Map<String, Value>, key: &str) -> Result<String, AppError> {
    match object.get(key) {
        None => Err(missing(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid_attribute(key)),
    }
}

fn optional_string(object: &Map<String, Value>, key: &str) -> Result<Option<String>, AppError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid_attribute(key)),
    }
}

fn check_len(key: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::DataValidation(format!(
            "Invalid attribute: {key} is longer than {max} characters"
        )));
    }
    Ok(())
}

fn parse_price(value: &Value) -> Result<Decimal, AppError> {
    let parsed = match value {
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64_retain)),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    let price = parsed.map(|p| p.round_dp(2)).ok_or_else(|| {
        AppError::DataValidation(format!(
            "Invalid type for decimal [price]: {}",
            json_type_name(value)
        ))
    })?;
    if price.abs() > MAX_PRICE {
        return Err(AppError::DataValidation(format!(
            "Invalid value for [price]: {price} is out of range"
        )));
    }
    Ok(price)
}

fn missing(key: &str) -> AppError {
    AppError::DataValidation(format!("Invalid product: missing {key}"))
}

fn invalid_attribute(key: &str) -> AppError {
    AppError::DataValidation(format!("Invalid attribute: {key}"))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

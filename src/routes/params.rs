use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Search filters accepted by `GET /products`.
///
/// Values are kept as raw strings; empty values count as absent.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Exact SKU match.
    pub sku: Option<String>,
    /// Exact name match.
    pub name: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    pub max_price: Option<String>,
}

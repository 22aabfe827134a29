use utoipa::OpenApi;
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    models::Product,
    response::{ErrorBody, HealthData},
    routes::{health, index, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        index::index,
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::like_product,
        products::delete_product,
        products::delete_all_products
    ),
    components(
        schemas(
            Product,
            ErrorBody,
            HealthData,
            params::ProductQuery
        )
    ),
    tags(
        (name = "Health", description = "Service status endpoints"),
        (name = "Products", description = "Product catalogue endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

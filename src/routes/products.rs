use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, put},
};

use crate::{
    error::AppResult,
    middleware::json_body::JsonBody,
    models::{Product, ProductDraft},
    response::ErrorBody,
    routes::params::ProductQuery,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .delete(delete_all_products),
        )
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/like", put(like_product))
}

#[utoipa::path(
    get,
    path = "/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products", body = Vec<Product>),
        (status = 400, description = "Malformed price filter", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    tracing::info!("request for product list");
    let products = product_service::list_products(&state, query).await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 404, description = "Product not found", body = ErrorBody),
    ),
    tag = "Products"
)]
pub async fn get_product(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<Product>> {
    let product = product_service::get_product(&state, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/products",
    request_body = Product,
    responses(
        (status = 201, description = "Create product", body = Product),
        (status = 400, description = "Invalid product", body = ErrorBody),
        (status = 415, description = "Body is not JSON", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<impl IntoResponse> {
    let draft = ProductDraft::from_json(&body)?;
    let product = product_service::create_product(&state, draft).await?;
    let location = format!("/products/{}", product.id);
    tracing::info!(id = product.id, "product created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    ))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = Product,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid product", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 415, description = "Body is not JSON", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Product>> {
    let draft = ProductDraft::from_json(&body)?;
    let product = product_service::update_product(&state, id, draft).await?;
    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/products/{id}/like",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Liked product", body = Product),
        (status = 404, description = "Product not found", body = ErrorBody)
    ),
    tag = "Products"
)]
pub async fn like_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = product_service::like_product(&state, id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Deleted product, or it never existed")
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    product_service::delete_product(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/products",
    responses(
        (status = 204, description = "Catalogue cleared when running under test")
    ),
    tag = "Products"
)]
pub async fn delete_all_products(State(state): State<AppState>) -> AppResult<StatusCode> {
    if state.testing {
        product_service::remove_all(&state).await?;
    } else {
        tracing::warn!("Request to clear database while system not under test");
    }
    Ok(StatusCode::NO_CONTENT)
}

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::{
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::{Product, ProductDraft},
    routes::params::ProductQuery,
    state::AppState,
};

/// Which single filter a listing request resolves to.
///
/// Only one filter is ever applied; the first present one wins, in the order
/// the variants are declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductFilter {
    Sku(String),
    Name(String),
    PriceRange { min: Decimal, max: Decimal },
    MinPrice(Decimal),
    MaxPrice(Decimal),
    All,
}

impl ProductFilter {
    pub fn from_query(query: &ProductQuery) -> AppResult<Self> {
        if let Some(sku) = present(&query.sku) {
            return Ok(ProductFilter::Sku(sku.to_string()));
        }
        if let Some(name) = present(&query.name) {
            return Ok(ProductFilter::Name(name.to_string()));
        }
        let min = present(&query.min_price)
            .map(|v| parse_bound("min_price", v))
            .transpose()?;
        let max = present(&query.max_price)
            .map(|v| parse_bound("max_price", v))
            .transpose()?;
        Ok(match (min, max) {
            (Some(min), Some(max)) => ProductFilter::PriceRange { min, max },
            (Some(min), None) => ProductFilter::MinPrice(min),
            (None, Some(max)) => ProductFilter::MaxPrice(max),
            (None, None) => ProductFilter::All,
        })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_bound(key: &str, value: &str) -> AppResult<Decimal> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_| AppError::BadRequest(format!("Invalid value for [{key}]: {value}")))
}

pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<Vec<Product>> {
    let filter = ProductFilter::from_query(&query)?;
    let finder = match &filter {
        ProductFilter::Sku(sku) => {
            tracing::info!(%sku, "find by sku");
            Products::find().filter(Column::Sku.eq(sku.as_str()))
        }
        ProductFilter::Name(name) => {
            tracing::info!(%name, "find by name");
            Products::find().filter(Column::Name.eq(name.as_str()))
        }
        ProductFilter::PriceRange { min, max } => {
            tracing::info!(%min, %max, "find by price range");
            Products::find()
                .filter(Column::Price.gte(*min))
                .filter(Column::Price.lte(*max))
        }
        ProductFilter::MinPrice(min) => {
            tracing::info!(%min, "find by min price");
            Products::find().filter(Column::Price.gte(*min))
        }
        ProductFilter::MaxPrice(max) => {
            tracing::info!(%max, "find by max price");
            Products::find().filter(Column::Price.lte(*max))
        }
        ProductFilter::All => {
            tracing::info!("find all");
            Products::find()
        }
    };

    let items: Vec<Product> = finder
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    tracing::info!(count = items.len(), "returning products");
    Ok(items)
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<Product> {
    tracing::info!(id, "lookup product");
    Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity)
        .ok_or_else(|| AppError::product_not_found(id))
}

pub async fn create_product(state: &AppState, draft: ProductDraft) -> AppResult<Product> {
    tracing::info!(sku = %draft.sku, name = %draft.name, "creating product");
    let active = ActiveModel {
        id: NotSet,
        sku: Set(draft.sku),
        name: Set(draft.name),
        description: Set(draft.description),
        price: Set(draft.price),
        image_url: Set(draft.image_url),
        created_time: NotSet,
        updated_time: NotSet,
        likes: draft.likes.map(Set).unwrap_or(NotSet),
    };
    let product = active
        .insert(&state.orm)
        .await
        .map_err(AppError::save_failed)?;
    Ok(product_from_entity(product))
}

pub async fn update_product(state: &AppState, id: i32, draft: ProductDraft) -> AppResult<Product> {
    tracing::info!(id, "updating product");
    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::product_not_found(id))?;

    let mut active: ActiveModel = existing.into();
    active.sku = Set(draft.sku);
    active.name = Set(draft.name);
    active.description = Set(draft.description);
    active.price = Set(draft.price);
    active.image_url = Set(draft.image_url);
    if let Some(likes) = draft.likes {
        active.likes = Set(likes);
    }
    active.updated_time = Set(Utc::now().into());

    let product = active
        .update(&state.orm)
        .await
        .map_err(AppError::save_failed)?;
    Ok(product_from_entity(product))
}

pub async fn like_product(state: &AppState, id: i32) -> AppResult<Product> {
    tracing::info!(id, "liking product");
    let result = Products::update_many()
        .col_expr(Column::Likes, Expr::col(Column::Likes).add(1))
        .col_expr(Column::UpdatedTime, Expr::current_timestamp().into())
        .filter(Column::Id.eq(id))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::product_not_found(id));
    }
    get_product(state, id).await
}

/// Removes the product if it exists. Deleting an unknown id is not an error.
pub async fn delete_product(state: &AppState, id: i32) -> AppResult<()> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        tracing::info!(id, "delete requested for missing product");
    } else {
        tracing::info!(id, "deleted product");
    }
    Ok(())
}

pub async fn remove_all(state: &AppState) -> AppResult<u64> {
    let result = Products::delete_many().exec(&state.orm).await?;
    tracing::warn!(removed = result.rows_affected, "removed all products");
    Ok(result.rows_affected)
}

pub fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        sku: model.sku,
        name: model.name,
        description: model.description,
        price: model.price,
        image_url: model.image_url,
        likes: model.likes,
        created_time: Some(model.created_time.with_timezone(&Utc)),
        updated_time: Some(model.updated_time.with_timezone(&Utc)),
    }
}

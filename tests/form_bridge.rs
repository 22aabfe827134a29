use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use chrono::{TimeZone, Utc};
use product_catalog::{
    bridge::{DELETE_FAILED, DELETED, FormBridge, ProductForm, ProductPayload, SUCCESS},
    client::{ClientError, ProductApi},
    models::Product,
};
use rust_decimal::Decimal;

/// In-memory stand-in for the product service.
#[derive(Clone, Default)]
struct FakeApi {
    inner: Arc<Mutex<FakeState>>,
}

#[derive(Default)]
struct FakeState {
    products: BTreeMap<i32, Product>,
    next_id: i32,
    queries: Vec<String>,
    payloads: Vec<ProductPayload>,
    fail_deletes: bool,
}

fn not_found(id: &str) -> ClientError {
    ClientError::Api {
        status: 404,
        message: Some(format!("Product with id '{id}' was not found.")),
    }
}

impl FakeApi {
    fn seed(&self, product: Product) {
        let mut state = self.inner.lock().unwrap();
        state.next_id = state.next_id.max(product.id);
        state.products.insert(product.id, product);
    }

    fn queries(&self) -> Vec<String> {
        self.inner.lock().unwrap().queries.clone()
    }

    fn last_payload(&self) -> Option<ProductPayload> {
        self.inner.lock().unwrap().payloads.last().cloned()
    }

    fn fail_deletes(&self) {
        self.inner.lock().unwrap().fail_deletes = true;
    }

    fn to_product(id: i32, payload: &ProductPayload) -> Result<Product, ClientError> {
        let price = payload
            .price
            .and_then(|p| Decimal::try_from(p).ok())
            .ok_or_else(|| ClientError::Api {
                status: 400,
                message: Some("Invalid type for decimal [price]: null".into()),
            })?;
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        Ok(Product {
            id,
            sku: payload.sku.clone(),
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            price: price.round_dp(2),
            image_url: Some(payload.image_url.clone()),
            likes: payload.likes.unwrap_or(0) as i32,
            created_time: Some(ts),
            updated_time: Some(ts),
        })
    }
}

impl ProductApi for FakeApi {
    async fn create_product(&self, payload: &ProductPayload) -> Result<Product, ClientError> {
        let mut state = self.inner.lock().unwrap();
        state.payloads.push(payload.clone());
        if state.products.values().any(|p| p.sku == payload.sku) {
            return Err(ClientError::Api {
                status: 400,
                message: Some("Error creating record: duplicate sku".into()),
            });
        }
        let id = state.next_id + 1;
        let product = Self::to_product(id, payload)?;
        state.next_id = id;
        state.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: &str,
        payload: &ProductPayload,
    ) -> Result<Product, ClientError> {
        let mut state = self.inner.lock().unwrap();
        state.payloads.push(payload.clone());
        let key: i32 = id.parse().map_err(|_| not_found(id))?;
        if !state.products.contains_key(&key) {
            return Err(not_found(id));
        }
        let product = Self::to_product(key, payload)?;
        state.products.insert(key, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let state = self.inner.lock().unwrap();
        id.parse::<i32>()
            .ok()
            .and_then(|key| state.products.get(&key).cloned())
            .ok_or_else(|| not_found(id))
    }

    async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let mut state = self.inner.lock().unwrap();
        if state.fail_deletes {
            return Err(ClientError::Api {
                status: 500,
                message: Some("database unavailable".into()),
            });
        }
        if let Ok(key) = id.parse::<i32>() {
            state.products.remove(&key);
        }
        Ok(())
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let mut state = self.inner.lock().unwrap();
        state.queries.push(query.to_string());
        // Decoded the way the service's query extractor decodes it.
        let url = reqwest::Url::parse(&format!("http://products.test/products?{query}"))
            .map_err(|err| ClientError::Parse(err.to_string()))?;
        let mut sku = None;
        let mut name = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "sku" => sku = Some(value.into_owned()),
                "name" => name = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(state
            .products
            .values()
            .filter(|p| sku.as_ref().is_none_or(|s| &p.sku == s))
            .filter(|p| name.as_ref().is_none_or(|n| &p.name == n))
            .cloned()
            .collect())
    }
}

fn mug(id: i32) -> Product {
    Product {
        id,
        sku: format!("MUG-{id}"),
        name: "Ferris Mug".into(),
        description: Some("Coffee tastes better with Ferris".into()),
        price: Decimal::new(1299, 2),
        image_url: Some(format!("https://example.com/mug-{id}.png")),
        likes: 4,
        created_time: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
        updated_time: Some(Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap()),
    }
}

fn assert_form_matches(form: &ProductForm, product: &Product) {
    assert_eq!(form.id, product.id.to_string());
    assert_eq!(form.sku, product.sku);
    assert_eq!(form.name, product.name);
    assert_eq!(form.description, product.description.clone().unwrap_or_default());
    assert_eq!(form.price, product.price.to_string());
    assert_eq!(form.image_url, product.image_url.clone().unwrap_or_default());
    assert_eq!(form.likes, product.likes.to_string());

    // Timestamps must read exactly as they do in the JSON response.
    let wire = serde_json::to_value(product).unwrap();
    assert_eq!(form.created_time, wire["created_time"].as_str().unwrap());
    assert_eq!(form.updated_time, wire["updated_time"].as_str().unwrap());
}

fn fill_new_product(form: &mut ProductForm) {
    form.sku = "HAT-1".into();
    form.name = "Rust Hat".into();
    form.description = "Keeps the rain off".into();
    form.price = "19.99".into();
    form.image_url = "https://example.com/hat.png".into();
    form.likes = "2".into();
}

#[tokio::test]
async fn retrieve_fills_every_field_from_the_response() {
    let api = FakeApi::default();
    api.seed(mug(7));
    let mut bridge = FormBridge::new(api);

    bridge.form_mut().id = "7".into();
    bridge.retrieve().await;

    assert_eq!(bridge.flash(), SUCCESS);
    assert_form_matches(bridge.form(), &mug(7));
}

#[tokio::test]
async fn failed_retrieve_clears_product_fields_and_shows_server_message() {
    let api = FakeApi::default();
    api.seed(mug(7));
    let mut bridge = FormBridge::new(api);

    bridge.form_mut().id = "7".into();
    bridge.retrieve().await;
    assert!(!bridge.form().product_fields_empty());

    bridge.form_mut().id = "99".into();
    bridge.retrieve().await;

    assert!(bridge.form().product_fields_empty());
    assert_eq!(bridge.form().id, "99");
    assert_eq!(bridge.flash(), "Product with id '99' was not found.");
}

#[tokio::test]
async fn create_sends_coerced_numbers_and_adopts_the_response() {
    let api = FakeApi::default();
    let mut bridge = FormBridge::new(api.clone());

    fill_new_product(bridge.form_mut());
    bridge.form_mut().likes = "2.9".into();
    bridge.create().await;

    let sent = api.last_payload().unwrap();
    assert_eq!(sent.price, Some(19.99));
    assert_eq!(sent.likes, Some(2));

    assert_eq!(bridge.flash(), SUCCESS);
    let stored = api.get_product("1").await.unwrap();
    assert_form_matches(bridge.form(), &stored);
}

#[tokio::test]
async fn create_failure_shows_the_server_message_and_keeps_input() {
    let api = FakeApi::default();
    let mut bridge = FormBridge::new(api.clone());

    fill_new_product(bridge.form_mut());
    bridge.form_mut().price = "free".into();
    bridge.create().await;

    assert_eq!(api.last_payload().unwrap().price, None);
    assert_eq!(bridge.flash(), "Invalid type for decimal [price]: null");
    assert_eq!(bridge.form().sku, "HAT-1");
    assert!(bridge.form().id.is_empty());
}

#[tokio::test]
async fn duplicate_create_is_reported_not_retried() {
    let api = FakeApi::default();
    let mut bridge = FormBridge::new(api.clone());

    fill_new_product(bridge.form_mut());
    bridge.create().await;
    assert_eq!(bridge.flash(), SUCCESS);

    bridge.create().await;
    assert_eq!(bridge.flash(), "Error creating record: duplicate sku");
    assert_eq!(api.inner.lock().unwrap().payloads.len(), 2);
}

#[tokio::test]
async fn update_targets_the_form_id() {
    let api = FakeApi::default();
    api.seed(mug(3));
    let mut bridge = FormBridge::new(api.clone());

    bridge.form_mut().id = "3".into();
    bridge.retrieve().await;
    bridge.form_mut().description = "unknown".into();
    bridge.update().await;

    assert_eq!(bridge.flash(), SUCCESS);
    assert_eq!(bridge.form().description, "unknown");
    let stored = api.get_product("3").await.unwrap();
    assert_eq!(stored.description.as_deref(), Some("unknown"));
    assert_form_matches(bridge.form(), &stored);
}

#[tokio::test]
async fn update_of_missing_product_shows_not_found() {
    let mut bridge = FormBridge::new(FakeApi::default());
    fill_new_product(bridge.form_mut());
    bridge.form_mut().id = "0".into();
    bridge.update().await;
    assert_eq!(bridge.flash(), "Product with id '0' was not found.");
}

#[tokio::test]
async fn successful_delete_clears_product_fields() {
    let api = FakeApi::default();
    api.seed(mug(5));
    let mut bridge = FormBridge::new(api.clone());

    bridge.form_mut().id = "5".into();
    bridge.retrieve().await;
    bridge.delete().await;

    assert_eq!(bridge.flash(), DELETED);
    assert!(bridge.form().product_fields_empty());
    assert!(api.get_product("5").await.is_err());
}

#[tokio::test]
async fn failed_delete_shows_a_fixed_message() {
    let api = FakeApi::default();
    api.seed(mug(5));
    api.fail_deletes();
    let mut bridge = FormBridge::new(api);

    bridge.form_mut().id = "5".into();
    bridge.retrieve().await;
    bridge.delete().await;

    assert_eq!(bridge.flash(), DELETE_FAILED);
    assert!(!bridge.form().product_fields_empty());
}

#[tokio::test]
async fn search_without_filters_sends_an_empty_query() {
    let api = FakeApi::default();
    api.seed(mug(1));
    api.seed(mug(2));
    let mut bridge = FormBridge::new(api.clone());

    bridge.search().await;

    assert_eq!(api.queries(), vec![String::new()]);
    assert_eq!(bridge.results().len(), 2);
    assert_eq!(bridge.flash(), SUCCESS);
}

#[tokio::test]
async fn search_query_joins_only_present_filters() {
    let api = FakeApi::default();
    let mut bridge = FormBridge::new(api.clone());

    bridge.form_mut().sku = "A".into();
    bridge.form_mut().max_price = "10".into();
    bridge.search().await;

    assert_eq!(api.queries(), vec!["sku=A&max_price=10".to_string()]);
}

#[tokio::test]
async fn search_renders_all_hits_and_fills_form_with_the_first() {
    let api = FakeApi::default();
    api.seed(mug(1));
    api.seed(mug(2));
    let mut bridge = FormBridge::new(api);

    bridge.form_mut().name = "Ferris Mug".into();
    bridge.search().await;

    assert_eq!(bridge.flash(), SUCCESS);
    assert_eq!(bridge.results().len(), 2);
    let table = bridge.results_table().expect("results table");
    assert!(table.contains(r#"<tr id="row_0""#));
    assert!(table.contains(r#"<tr id="row_1""#));
    assert!(table.contains("<td>MUG-2</td>"));
    assert_form_matches(bridge.form(), &mug(1));
}

#[tokio::test]
async fn search_values_with_reserved_characters_still_match() {
    let api = FakeApi::default();
    let mut odd = mug(1);
    odd.sku = "A&B=C".into();
    api.seed(odd.clone());
    api.seed(mug(2));
    let mut bridge = FormBridge::new(api.clone());

    bridge.form_mut().sku = "A&B=C".into();
    bridge.search().await;

    assert_eq!(api.queries(), vec!["sku=A%26B%3DC".to_string()]);
    assert_eq!(bridge.results().len(), 1);
    assert_form_matches(bridge.form(), &odd);
}

#[tokio::test]
async fn empty_search_leaves_the_form_alone() {
    let mut bridge = FormBridge::new(FakeApi::default());
    bridge.form_mut().sku = "NOPE".into();
    bridge.form_mut().description = "typed by hand".into();
    bridge.search().await;

    assert_eq!(bridge.flash(), SUCCESS);
    assert!(bridge.results().is_empty());
    assert_eq!(bridge.form().description, "typed by hand");
    assert!(!bridge.results_table().unwrap().contains("row_0"));
}

#[tokio::test]
async fn clear_empties_id_fields_and_flash() {
    let api = FakeApi::default();
    api.seed(mug(1));
    let mut bridge = FormBridge::new(api);

    bridge.form_mut().id = "1".into();
    bridge.retrieve().await;
    bridge.clear();

    assert!(bridge.form().id.is_empty());
    assert!(bridge.form().product_fields_empty());
    assert!(bridge.flash().is_empty());
}

#[tokio::test]
async fn row_modal_shows_the_row_and_retrieves_into_the_form() {
    let api = FakeApi::default();
    api.seed(mug(1));
    api.seed(mug(2));
    let mut bridge = FormBridge::new(api);

    bridge.search().await;
    assert!(!bridge.open_row(5));
    assert!(bridge.open_row(1));

    let modal = bridge.modal();
    assert!(modal.is_open());
    assert_eq!(modal.product_id(), "2");
    assert_eq!(modal.image_src(), "https://example.com/mug-2.png");
    assert_eq!(modal.cells().sku, "MUG-2");

    bridge.modal_retrieve().await;
    assert!(!bridge.modal().is_open());
    assert_eq!(bridge.flash(), SUCCESS);
    assert_form_matches(bridge.form(), &mug(2));
}

//! Product form controller.
//!
//! [`FormBridge`] owns the text of the product form, the flash message, the
//! last search results and the detail modal. Each public operation mirrors one
//! button: it reads the form, issues exactly one request through a
//! [`ProductApi`], and writes the outcome back. Failures end at the flash
//! message; nothing is retried.

pub mod form;
pub mod modal;
pub mod query;
pub mod view;

pub use form::{ProductForm, ProductPayload};
pub use modal::ProductModal;
pub use query::SearchFilters;
pub use view::ProductCells;

use crate::{
    client::{ClientError, ProductApi},
    models::Product,
};

pub const SUCCESS: &str = "Success";
pub const DELETED: &str = "Product has been Deleted!";
/// Shown for every delete failure; the error body is not consulted.
pub const DELETE_FAILED: &str = "Server error!";

pub struct FormBridge<A> {
    api: A,
    form: ProductForm,
    flash: String,
    results: Vec<Product>,
    results_html: Option<String>,
    modal: ProductModal,
}

impl<A: ProductApi> FormBridge<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: ProductForm::default(),
            flash: String::new(),
            results: Vec::new(),
            results_html: None,
            modal: ProductModal::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Editable form, standing in for user input.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn flash(&self) -> &str {
        &self.flash
    }

    /// Products returned by the last successful search.
    pub fn results(&self) -> &[Product] {
        &self.results
    }

    /// HTML table of the last successful search, if any search has succeeded.
    pub fn results_table(&self) -> Option<&str> {
        self.results_html.as_deref()
    }

    pub fn modal(&self) -> &ProductModal {
        &self.modal
    }

    pub async fn create(&mut self) {
        self.flash.clear();
        let payload = self.form.payload();
        match self.api.create_product(&payload).await {
            Ok(product) => self.show_product(&product),
            Err(err) => self.show_error("create", &err),
        }
    }

    pub async fn update(&mut self) {
        self.flash.clear();
        let payload = self.form.payload();
        let id = self.form.id.clone();
        match self.api.update_product(&id, &payload).await {
            Ok(product) => self.show_product(&product),
            Err(err) => self.show_error("update", &err),
        }
    }

    pub async fn retrieve(&mut self) {
        self.flash.clear();
        let id = self.form.id.clone();
        self.retrieve_id(&id).await;
    }

    pub async fn delete(&mut self) {
        self.flash.clear();
        let id = self.form.id.clone();
        match self.api.delete_product(&id).await {
            Ok(()) => {
                self.form.clear_product_fields();
                self.flash = DELETED.to_string();
            }
            Err(err) => {
                tracing::warn!(error = %err, id = %id, "delete failed");
                self.flash = DELETE_FAILED.to_string();
            }
        }
    }

    /// Runs the search described by the form's sku, name and price bounds.
    ///
    /// All hits go to the results table; only the first is copied into the
    /// form.
    pub async fn search(&mut self) {
        let query = SearchFilters::from_form(&self.form).query_string();
        self.flash.clear();
        match self.api.search_products(&query).await {
            Ok(products) => {
                tracing::debug!(query = %query, hits = products.len(), "search finished");
                self.results_html = Some(view::render_results_table(&products));
                if let Some(first) = products.first() {
                    self.form.fill_from(first);
                }
                self.results = products;
                self.flash = SUCCESS.to_string();
            }
            Err(err) => self.show_error("search", &err),
        }
    }

    /// Empties the id, every product field and the flash message.
    pub fn clear(&mut self) {
        self.form.clear();
        self.flash.clear();
    }

    /// Opens the detail modal on row `index` of the last search.
    ///
    /// Returns `false` when there is no such row.
    pub fn open_row(&mut self, index: usize) -> bool {
        match self.results.get(index) {
            Some(product) => {
                self.modal.show(ProductCells::from_product(product));
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Retrieves the product shown in the modal into the form, then closes the
    /// modal whatever the outcome.
    pub async fn modal_retrieve(&mut self) {
        let id = self.modal.product_id().to_string();
        self.retrieve_id(&id).await;
        self.modal.close();
    }

    async fn retrieve_id(&mut self, id: &str) {
        match self.api.get_product(id).await {
            Ok(product) => self.show_product(&product),
            Err(err) => {
                self.form.clear_product_fields();
                self.show_error("retrieve", &err);
            }
        }
    }

    fn show_product(&mut self, product: &Product) {
        self.form.fill_from(product);
        self.flash = SUCCESS.to_string();
    }

    fn show_error(&mut self, operation: &str, err: &ClientError) {
        tracing::warn!(error = %err, operation, "product request failed");
        self.flash = err.flash_text();
    }
}

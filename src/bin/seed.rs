use product_catalog::{
    bridge::ProductPayload,
    client::{ProductApi, ProductClient},
    config::ClientConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = ProductClient::from_config(&ClientConfig::from_env());
    println!("Seeding {}", client.base_url());

    // Clear the catalogue through the public API so this works against any
    // deployment, testing mode or not.
    let existing = client.search_products("").await?;
    for product in &existing {
        client.delete_product(&product.id.to_string()).await?;
    }
    println!("Removed {} products", existing.len());

    let products = [
        ("FH-001", "Ferris Hoodie", "Warm hoodie for Rustaceans", 55.0, "https://example.com/hoodie.png", 3),
        ("FM-002", "Ferris Mug", "Coffee tastes better with Ferris", 12.0, "https://example.com/mug.png", 10),
        ("RS-003", "Rust Sticker Pack", "Decorate your laptop", 5.0, "https://example.com/stickers.png", 0),
        ("AB-004", "Async Rust E-book", "Learn async Rust patterns", 25.0, "https://example.com/ebook.png", 7),
    ];

    for (sku, name, description, price, image_url, likes) in products {
        let payload = ProductPayload {
            sku: sku.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: Some(price),
            image_url: image_url.to_string(),
            likes: Some(likes),
        };
        let created = client.create_product(&payload).await?;
        println!("Created {} (id={})", created.name, created.id);
    }

    println!("Seed completed");
    Ok(())
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::net::SocketAddr;

use product_catalog::{build_app, config::AppConfig, db::create_orm_conn, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,product_catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url, config.retry).await?;

    tracing::info!("{}", "*".repeat(70));
    tracing::info!("{:*^70}", "  P R O D U C T   S E R V I C E  ");
    tracing::info!("{}", "*".repeat(70));
    if config.testing {
        tracing::warn!("running in testing mode; DELETE /products clears the catalogue");
    }

    let app = build_app(AppState {
        orm,
        testing: config.testing,
    });

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!("listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}

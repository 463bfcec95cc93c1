use auth_backend::{config::AppConfig, db, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init(config.server.debug);

    let pool = db::connect(&config.database).await?;
    db::migrate(&pool).await?;
    tracing::info!("migrations applied");
    Ok(())
}

use auth_backend::{app, config::AppConfig, logging, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init(config.server.debug);
    tracing::info!(name = %config.server.name, debug = config.server.debug, "starting");

    let addr = config.bind_addr();
    let app_state = AppState::init(config).await?;

    app::serve(app::build_app(app_state), &addr).await
}

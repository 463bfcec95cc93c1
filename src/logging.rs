/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the default filter is raised to `trace`
/// for this crate in debug mode. `LOG_FORMAT=json` switches to JSON lines.
pub fn init(debug: bool) {
    let default_filter = if debug {
        "auth_backend=trace,axum=debug,tower_http=debug"
    } else {
        "auth_backend=debug,axum=info,tower_http=info"
    };
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

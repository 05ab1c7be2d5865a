#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = review_portal::config::ServerConfig::from_env();
    let client = review_portal::config::client();
    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        events_api = %client.events_base_url,
        auth_api = %client.auth_base_url,
        "starting review-portal"
    );

    match review_portal::server::serve(&config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "review-portal stopped");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "ssr"))]
fn main() {}

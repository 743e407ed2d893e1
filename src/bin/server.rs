use tuneseek::api::TokenBroker;
use tuneseek::config::ServerConfig;
use tuneseek::server::{self, ServerContext};
use tuneseek::services::{AuthService, SessionRegistry};
use tuneseek::storage::CredentialStore;
use tuneseek::utils::http;

const SERVER_NAME: &str = "TuneSeek backend";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Set RUST_LOG=debug for verbose output, RUST_LOG=info for normal logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .filter_module("rustls", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{}", SERVER_NAME, SERVER_VERSION);

    let config = ServerConfig::from_env()?;
    let store = CredentialStore::open(&config.database_path)?;
    log::info!(
        "[Main] Credential store {} ({} users)",
        config.database_path.display(),
        store.count()?
    );
    let auth = AuthService::new(store, SessionRegistry::new(config.session_ttl));
    let broker = TokenBroker::new(
        http::client(),
        config.token_url.clone(),
        config.client_id.clone(),
        config.client_secret.clone(),
    );
    let ctx = ServerContext::new(auth, broker, http::client(), config.api_url.clone())?;

    // Searches stay blocked until a later POST /token succeeds
    if !ctx.refresh_token() {
        log::warn!("[Main] Catalog token unavailable at startup");
    }

    let listener = server::bind(&config.listen_addr())?;
    server::serve(&ctx, &listener);
    Ok(())
}

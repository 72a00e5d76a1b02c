use client_core::observability::init_tracing;
use dotenvy::dotenv;
use lending_client::config::get_configuration;
use lending_client::navigation::Screen;
use lending_client::services::{AuthClient, MemoryCredentialStore, TracingErrorReporter};
use lending_client::shell::{ConsoleNavigator, ConsoleNotifier, Shell, HELP};
use lending_client::AppState;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "lending-client",
        &configuration.logging.level,
        configuration.logging.otlp_endpoint.as_deref(),
    )?;

    let auth_client = Arc::new(AuthClient::new(configuration.backend.clone())?);
    let navigator = Arc::new(ConsoleNavigator::new(Screen::Login));

    let state = AppState::new(
        &configuration.session,
        auth_client,
        navigator.clone(),
        navigator.clone(),
        Arc::new(ConsoleNotifier),
        Arc::new(TracingErrorReporter),
        Arc::new(MemoryCredentialStore::new()),
    );

    info!(
        backend = %configuration.backend.url,
        inactivity_timeout_ms = configuration.session.inactivity_timeout_ms,
        "Starting lending-client shell"
    );
    println!("{}", HELP);

    let mut shell = Shell::new(
        state,
        navigator,
        configuration.verification.resend_cooldown(),
    );
    shell.run(BufReader::new(tokio::io::stdin())).await?;

    info!("Shell closed");
    Ok(())
}

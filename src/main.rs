use tasksync::commands::{needs_report, Cli};
use tasksync::libs::messages::macros::is_debug_mode;
use tasksync::msg_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before the debug flag is read and cached.
    let _ = dotenv::dotenv();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tasksync=debug")))
            .init();
    }

    if let Err(e) = Cli::menu().await {
        if needs_report(&e) {
            msg_error!(format!("{:#}", e));
        }
        std::process::exit(1);
    }
}

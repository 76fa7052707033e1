use tracing_subscriber::{fmt, EnvFilter};

pub fn initialize_logger() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ctxpack=info"));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .finish();

    // A subscriber may already be installed (tests, embedding callers).
    let _ = tracing::subscriber::set_global_default(subscriber);
}

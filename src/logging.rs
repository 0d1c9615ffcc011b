use env_logger::Env;

/// Initializes the log facade with an env_logger backend, defaulting
/// to info level unless overridden through RUST_LOG
pub fn setup() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

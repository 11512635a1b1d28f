/// Install the default `tracing` subscriber. Safe to call more than once.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}

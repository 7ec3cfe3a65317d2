// Logger setup
//
// Defaults to info level, override with RUST_LOG.

use env_logger::Env;

pub fn init_logging() {
    // Ignore the error when a logger is already installed
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init_logging();
        init_logging();
        log::info!("Logging initialised");
    }
}

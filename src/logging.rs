//! Logger setup for the `gesturectl` binary.

use env_logger::{Builder, Env};

pub const LOG_ENV: &str = "GESTURECTL_LOG";

/// `GESTURECTL_LOG` takes precedence over `RUST_LOG`; default level is `info`.
pub fn init() {
    let env = if std::env::var_os(LOG_ENV).is_some() {
        Env::new().filter(LOG_ENV)
    } else {
        Env::default().default_filter_or("info")
    };
    // stdout carries frame output, so logs go to stderr
    let _ = Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .format_timestamp_millis()
        .try_init();
}

//! Logging setup
//!
//! clembed logs through the `log` facade; `env_logger` is the backend.
//!
//! - `warn!` - declared includes whose directive was not found (strict mode)
//! - `info!` - one line per generated header
//! - `debug!` - each substitution and splice
//!
//! `RUST_LOG` takes precedence over the `--verbose` flag.

use std::io::Write;
use std::sync::Once;

use env_logger::{Builder, Env};

static INIT: Once = Once::new();

/// Initialize logging once. Later calls are no-ops.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    INIT.call_once(|| {
        let _ = Builder::from_env(Env::default().default_filter_or(default_level))
            .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
            .try_init();
    });
}

/// Initialize logging for tests, ignoring double initialization.
#[cfg(test)]
pub fn init_test() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(false);
        init(true);
        assert!(INIT.is_completed());
    }
}

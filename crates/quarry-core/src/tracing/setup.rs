//! Process-wide log output for the `quarry` binary and test harnesses.
//!
//! Events go to stderr so stdout stays free for `quarry config` TOML and
//! the run summary line.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "QUARRY_LOG";

/// Round-level progress from the loop and the pipeline; the storage,
/// data and model crates log at `warn` unless asked for more.
pub const DEFAULT_FILTER: &str =
    "warn,quarry_learning=info,quarry_cli=info,quarry_storage=warn,quarry_data=warn,quarry_model=warn";

static INIT: Once = Once::new();

/// Install the stderr subscriber once per process.
///
/// `QUARRY_LOG=quarry_learning=debug,quarry_storage=debug` shows every
/// sampling draw and snapshot write. An unset or unparsable value falls
/// back to [`DEFAULT_FILTER`].
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .compact(),
            )
            .with(filter)
            .init();
    });
}

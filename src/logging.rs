//! Log output for test runs.
//!
//! The fixtures log through `tracing`: built requests and decoded responses at `debug`,
//! ignored status writes at `warn`, swallowed serialization failures at `error`, and one
//! `test_case` span per [`TestCase`](crate::TestCase) run. [`init_logging`] is the subscriber
//! a server binary would install at startup, tuned for `cargo test`:
//!
//! - output goes to the libtest writer, so it only shows up for failing tests (or with
//!   `--nocapture`);
//! - it never panics, even on a malformed `RUST_LOG`, which falls back to `info`;
//! - a subscriber installed earlier, by another test helper or the test itself, wins.

use std::sync::Once;

use tracing_log::log::LevelFilter as LogLevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a compact `tracing` subscriber and `color-eyre` reports for the current test binary.
///
/// The filter is read from `RUST_LOG` and falls back to `info`. Events go through the test
/// writer, so `cargo test` captures them per test. Records emitted through the `log` crate are
/// forwarded too. Safe to call from every test: only the first call does anything, and an
/// already installed subscriber is left alone.
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if let Err(error) = color_eyre::install() {
            eprintln!("failed to install color-eyre: {error}");
        }

        let _ = tracing_log::LogTracer::builder()
            .with_max_level(LogLevelFilter::Trace)
            .init();

        if tracing::dispatcher::has_been_set() {
            return;
        }

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        if let Err(error) = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .event_format(
                tracing_subscriber::fmt::format()
                    .with_level(true)
                    .with_target(true)
                    .compact(),
            )
            .try_init()
        {
            tracing::debug!("tracing subscriber already initialized: {error:?}");
        }
    });
}

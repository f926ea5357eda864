//! Process-level setup.

/// Installs the `env_logger` backend and logs startup.
///
/// Safe to call more than once; only the first call installs a logger. Log
/// verbosity follows `RUST_LOG`.
///
/// # Example
///
/// ```no_run
/// cumulus::init();
/// ```
pub fn init() {
    let _ = env_logger::try_init();
    log::info!("cumulus {} initialized", env!("CARGO_PKG_VERSION"));
}

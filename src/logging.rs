use tracing_subscriber::{fmt, EnvFilter};

/// Call **once** near the start of `main`.
///
/// Level comes from `RUST_LOG` (e.g. `RUST_LOG=read_me=debug`), `info` otherwise.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so a second call (tests, embedding) is harmless
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

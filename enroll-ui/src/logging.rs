use tracing_subscriber::EnvFilter;

/// Initializes logging. Call once at startup.
///
/// Level comes from `RUST_LOG` when set, otherwise from the CLI's
/// `--log-level` flag. Output goes to stderr so it never interleaves
/// with the wizard's prompts on stdout.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

//! Logger setup for binaries and tests that use the crate.
//!
//! The library itself only emits through the `log` facade; nothing is printed
//! unless the application installs a logger.

use log::LevelFilter;

/// Dependencies that drown the pipeline logs at `debug`.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
];

/// Installs an `env_logger` with `level` as the default.
///
/// HTTP and HTML parsing dependencies are capped so that `debug` shows this
/// crate's pipeline without their internals. Directives from `RUST_LOG` are
/// applied last and override both the default and the caps. Fails if a logger
/// is already set.
///
/// ```bash
/// RUST_LOG=httpkit=trace,reqwest=debug my-tool
/// ```
pub fn init_logger(level: LevelFilter) -> anyhow::Result<()> {
    let env = std::env::var("RUST_LOG").ok();

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&filter_directives(level, env.as_deref()));

    builder
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logger: {}", e))
}

/// Filter string for `env_logger`: default level, then the caps, then `env`.
///
/// A later directive for the same module replaces an earlier one.
fn filter_directives(level: LevelFilter, env: Option<&str>) -> String {
    let mut directives = vec![level.to_string().to_ascii_lowercase()];
    for (module, cap) in QUIET_MODULES {
        directives.push(format!("{}={}", module, cap.to_string().to_ascii_lowercase()));
    }
    if let Some(env) = env.map(str::trim).filter(|env| !env.is_empty()) {
        directives.push(env.to_string());
    }
    directives.join(",")
}

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. An explicit `level` (from `-v`/`-q`) wins
/// over `RUST_LOG`; otherwise `RUST_LOG` is used and falls back to `info`.
/// `RUST_LOG` is read when this runs, so a `.env` file must already be loaded.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = filter_for(level, std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

fn filter_for(level: Option<&str>, rust_log: Option<&str>) -> Result<EnvFilter> {
    Ok(match (level, rust_log) {
        (Some(level), _) => EnvFilter::try_new(level)?,
        (None, Some(directives)) => EnvFilter::try_new(directives).unwrap_or_else(|_| "info".into()),
        (None, None) => "info".into(),
    })
}

/// Maps `-v` / `-q` counts to a filter directive.
pub fn level_from_flags(verbose: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("error");
    }
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(level_from_flags(2, true), Some("error"));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_from_flags(0, false), None);
        assert_eq!(level_from_flags(1, false), Some("debug"));
        assert_eq!(level_from_flags(5, false), Some("trace"));
    }

    #[test]
    fn rust_log_applies_without_flags() {
        let filter = filter_for(None, Some("debug")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::DEBUG));

        let filter = filter_for(Some("error"), Some("debug")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::ERROR));

        let filter = filter_for(None, None).unwrap();
        assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::INFO));
    }
}

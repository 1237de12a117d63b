//! Log output setup.
//!
//! Logs go to stderr so stdout stays free for command output. `RUST_LOG`
//! takes precedence over the verbosity flag.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "landing_crew=info";
const VERBOSE_FILTER: &str = "landing_crew=debug";

/// Filter used when `RUST_LOG` is not set.
fn default_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}

/// Install the global tracing subscriber. Call once, before any logging.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose).into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_selects_filter() {
        assert_eq!(default_filter(false), "landing_crew=info");
        assert_eq!(default_filter(true), "landing_crew=debug");
    }

    #[test]
    fn filters_parse() {
        for filter in [DEFAULT_FILTER, VERBOSE_FILTER] {
            assert!(EnvFilter::try_new(filter).is_ok());
        }
    }
}

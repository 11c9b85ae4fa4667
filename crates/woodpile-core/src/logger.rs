//! Stderr logging for the woodpile crates.
//!
//! Records from the woodpile crates are printed at the requested level as
//! `[elapsed LEVEL target] message`, with the `woodpile_` crate prefix
//! shortened. Records from other crates are capped at `Warn`.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Crate names whose records follow the requested level.
pub const WOODPILE_TARGETS: [&str; 4] = [
    "woodpile",
    "woodpile_core",
    "woodpile_grid",
    "woodpile_penalty",
];

const DEPENDENCY_LEVEL: LevelFilter = LevelFilter::Warn;

fn is_woodpile_target(target: &str) -> bool {
    let krate = target.split("::").next().unwrap_or(target);
    WOODPILE_TARGETS.contains(&krate)
}

/// `woodpile_grid::resolver` -> `grid::resolver`
fn short_target(target: &str) -> &str {
    target.strip_prefix("woodpile_").unwrap_or(target)
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl StderrLogger {
    fn limit_for(&self, target: &str) -> LevelFilter {
        if is_woodpile_target(target) {
            self.level
        } else {
            self.level.min(DEPENDENCY_LEVEL)
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.limit_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{elapsed:7.3}s {:>5} {}] {}",
            record.level(),
            short_target(record.target()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Parse a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`),
/// falling back to `Info` for anything unrecognized.
pub fn parse_level(name: &str) -> LevelFilter {
    name.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Default `tracing` directives: woodpile crates at `info`, others at `warn`.
pub fn default_directives() -> String {
    let mut out = DEPENDENCY_LEVEL.to_string().to_ascii_lowercase();
    for target in WOODPILE_TARGETS {
        out.push_str(&format!(",{target}=info"));
    }
    out
}

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`default_directives`].
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives()));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn parse_level_is_case_insensitive_with_info_fallback() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level(" warn "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    fn meta(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn dependency_records_are_capped_at_warn() {
        let logger = StderrLogger {
            level: LevelFilter::Debug,
            started: Instant::now(),
        };
        assert!(logger.enabled(&meta(Level::Debug, "woodpile_grid::resolver")));
        assert!(logger.enabled(&meta(Level::Info, "woodpile")));
        assert!(!logger.enabled(&meta(Level::Trace, "woodpile_penalty")));
        assert!(!logger.enabled(&meta(Level::Info, "serde_json")));
        assert!(logger.enabled(&meta(Level::Warn, "serde_json::de")));
        // prefix match is per crate name, not per string
        assert!(!logger.enabled(&meta(Level::Debug, "woodpile_extra::x")));
    }

    #[test]
    fn quiet_level_also_applies_to_dependencies() {
        let logger = StderrLogger {
            level: LevelFilter::Error,
            started: Instant::now(),
        };
        assert!(!logger.enabled(&meta(Level::Warn, "serde_json")));
        assert!(logger.enabled(&meta(Level::Error, "serde_json")));
    }

    #[test]
    fn targets_are_shortened_and_directives_list_every_crate() {
        assert_eq!(short_target("woodpile_grid::resolver"), "grid::resolver");
        assert_eq!(short_target("woodpile"), "woodpile");
        assert_eq!(
            default_directives(),
            "warn,woodpile=info,woodpile_core=info,woodpile_grid=info,woodpile_penalty=info"
        );
    }
}

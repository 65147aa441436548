//! Run settings.
//!
//! Every setting is a long flag with an environment variable fallback, so a
//! run can be driven from a shell script or a container environment alike.

use std::path::{Path, PathBuf};

use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use crate::protocol::{load_table, Tables};
use crate::render::{default_output_path, FillStrategy};

/// Where the three input tables live.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Topology table: regions and their provinces
    #[arg(long, env = "DATAFILE", default_value = "sample_data/image.json")]
    pub datafile: PathBuf,

    /// Ownership table: players and their territory
    #[arg(long, env = "PLAYERFILE", default_value = "sample_data/players.json")]
    pub playerfile: PathBuf,

    /// Level table, in tier order
    #[arg(long, env = "LEVELFILE", default_value = "sample_data/levels.json")]
    pub levelfile: PathBuf,

    /// Log level (debug, info, warning, error, critical) used when RUST_LOG is unset
    #[arg(long, env = "LOGLEVEL", default_value = "error")]
    pub loglevel: String,
}

impl DataArgs {
    /// Loads all three tables. Unreadable tables come back empty.
    pub fn tables(&self) -> Tables {
        Tables {
            levels: load_table(&self.levelfile),
            topology: load_table(&self.datafile),
            ownership: load_table(&self.playerfile),
        }
    }

    /// Installs the stderr log subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        init_logging(&self.loglevel);
    }
}

/// Settings for a paint run.
#[derive(Parser, Debug, Clone)]
#[command(name = "provincemap")]
#[command(about = "Paint province ownership onto a map raster")]
pub struct Config {
    #[command(flatten)]
    pub data: DataArgs,

    /// Input map raster
    #[arg(long, env = "IMAGEFILE", default_value = "sample_data/image.png")]
    pub imagefile: PathBuf,

    /// Output raster (default: out_<name> next to the input)
    #[arg(long, env = "OUTFILE")]
    pub outfile: Option<PathBuf>,

    /// Skip drawing the player legend
    #[arg(long)]
    pub no_legend: bool,

    /// Region fill algorithm
    #[arg(long, default_value_t = FillStrategy::Labeling)]
    pub strategy: FillStrategy,

    /// Claim a province before painting, as PLAYER=PROVINCE (repeatable)
    #[arg(long = "claim", value_name = "PLAYER=PROVINCE")]
    pub claims: Vec<String>,
}

impl Config {
    /// The raster path the run writes to.
    pub fn output_path(&self) -> PathBuf {
        self.outfile.clone().unwrap_or_else(|| default_output_path(&self.imagefile))
    }

    pub fn image_path(&self) -> &Path {
        &self.imagefile
    }

    /// Claim requests split into `(player, province)` pairs.
    ///
    /// Requests without a `=` are dropped with a warning.
    pub fn claim_requests(&self) -> Vec<(String, String)> {
        self.claims
            .iter()
            .filter_map(|c| match c.split_once('=') {
                Some((player, province)) => {
                    Some((player.trim().to_string(), province.trim().to_string()))
                }
                None => {
                    tracing::warn!(request = %c, "ignoring malformed claim request");
                    None
                }
            })
            .collect()
    }
}

/// Maps a log level name to an `EnvFilter` directive.
///
/// Accepts `debug`, `info`, `warning`, `error`, and `critical` (plus `trace`
/// and `warn`), ignoring case. Returns `None` for anything else.
pub fn level_directive(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warning" | "warn" => Some("warn"),
        "error" | "critical" => Some("error"),
        _ => None,
    }
}

/// Installs a `fmt` subscriber writing to stderr.
///
/// `RUST_LOG` wins over `level` when set. An unknown `level` falls back to
/// `info`.
pub fn init_logging(level: &str) {
    let directive = level_directive(level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive.unwrap_or("info")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    if directive.is_none() {
        tracing::warn!(level, "unknown log level, using info");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["provincemap"]).unwrap();
        assert_eq!(config.data.levelfile, PathBuf::from("sample_data/levels.json"));
        assert_eq!(config.strategy, FillStrategy::Labeling);
        assert!(!config.no_legend);
        assert_eq!(config.output_path(), PathBuf::from("sample_data/out_image.png"));
    }

    #[test]
    fn flags() {
        let config = Config::try_parse_from([
            "provincemap",
            "--imagefile",
            "maps/europe.bmp",
            "--outfile",
            "painted.png",
            "--strategy",
            "propagation",
            "--no-legend",
            "--claim",
            "player1=QUE",
            "--claim",
            "broken",
        ])
        .unwrap();
        assert_eq!(config.image_path(), Path::new("maps/europe.bmp"));
        assert_eq!(config.output_path(), PathBuf::from("painted.png"));
        assert_eq!(config.strategy, FillStrategy::Propagation);
        assert!(config.no_legend);
        assert_eq!(config.claim_requests(), vec![("player1".to_string(), "QUE".to_string())]);
    }

    #[test]
    fn level_names_map_to_filters() {
        use tracing_subscriber::filter::LevelFilter;

        let hint = |level: &str| level_directive(level).map(|d| EnvFilter::new(d).max_level_hint());
        assert_eq!(hint("warning"), Some(Some(LevelFilter::WARN)));
        assert_eq!(hint("WARNING"), Some(Some(LevelFilter::WARN)));
        assert_eq!(hint("critical"), Some(Some(LevelFilter::ERROR)));
        assert_eq!(hint("error"), Some(Some(LevelFilter::ERROR)));
        assert_eq!(hint("debug"), Some(Some(LevelFilter::DEBUG)));
        assert_eq!(hint("info"), Some(Some(LevelFilter::INFO)));
        assert_eq!(hint("bogus"), None);
    }

    #[test]
    fn warning_level_keeps_warn_and_error_events() {
        use tracing::Level;

        let filter = EnvFilter::new(level_directive("warning").unwrap_or("info"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::ERROR));
            assert!(tracing::enabled!(Level::WARN));
            assert!(!tracing::enabled!(Level::INFO));
        });
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        assert!(Config::try_parse_from(["provincemap", "--strategy", "magic"]).is_err());
    }
}

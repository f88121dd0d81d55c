use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use crate::games::Suite;

/// Classic and cosmic mini-game suites for the terminal.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Which game collection to play
    #[arg(value_enum, short, long, default_value_t = Suite::Classic)]
    pub suite: Suite,

    /// Seed for the random generator, for reproducible boards
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where log messages go (the terminal is busy drawing the games)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("minicade.log"))
    }
}

/// Send log records to the log file. `RUST_LOG` picks the level unless
/// `--debug` is given.
pub fn init_logging(args: &Args) -> anyhow::Result<()> {
    let path = args.log_path();
    let file = File::create(&path).with_context(|| format!("cannot create log file {}", path.display()))?;

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.try_init().context("logger already initialized")?;
    log::debug!("logging to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_classic_without_seed() {
        let args = Args::try_parse_from(["minicade"]).unwrap();
        assert_eq!(args.suite, Suite::Classic);
        assert_eq!(args.seed, None);
        assert!(!args.debug);
        assert!(args.log_path().ends_with("minicade.log"));
    }

    #[test]
    fn parses_every_flag() {
        let args = Args::try_parse_from([
            "minicade",
            "--suite",
            "cosmic",
            "--seed",
            "42",
            "--log-file",
            "/tmp/games.log",
            "--debug",
        ])
        .unwrap();
        assert_eq!(args.suite, Suite::Cosmic);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.log_path(), PathBuf::from("/tmp/games.log"));
        assert!(args.debug);
    }

    #[test]
    fn rejects_unknown_suite() {
        assert!(Args::try_parse_from(["minicade", "--suite", "arcade"]).is_err());
    }
}

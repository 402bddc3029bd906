use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use texhyph::{Hyphenator, LoadError, SOFT_HYPHEN_ENTITY, read_pattern_source};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, Result};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "TEXHYPH_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "texhyph",
    about = "Insert TeX-pattern hyphenation points into text",
    version
)]
pub struct Cli {
    /// Pattern file with `patterns` and `exceptions` sections.
    #[arg(short, long, value_name = "FILE")]
    pub patterns: PathBuf,

    /// Language identifier recorded for the loaded table.
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Marker inserted at every break.
    #[arg(short, long, default_value = "-", conflicts_with = "soft")]
    pub marker: String,

    /// Use the HTML soft-hyphen entity `&shy;` as the marker.
    #[arg(long)]
    pub soft: bool,

    /// Log at debug level (overrides TEXHYPH_LOG).
    #[arg(short, long)]
    pub verbose: bool,

    /// Files to hyphenate. Reads stdin when none are given.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn marker(&self) -> &str {
        if self.soft {
            SOFT_HYPHEN_ENTITY
        } else {
            &self.marker
        }
    }
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let stdout = io::stdout();
    run(&cli, io::stdin().lock(), &mut stdout.lock())
}

/// Load the pattern file, then hyphenate each input (or `stdin`) into `out`.
pub fn run<R: Read, W: Write>(cli: &Cli, mut stdin: R, out: &mut W) -> Result<()> {
    let hyphenator = load(cli)?;
    let marker = cli.marker();

    if cli.inputs.is_empty() {
        let mut text = String::new();
        stdin.read_to_string(&mut text).map_err(CliError::Stdin)?;
        return emit(&hyphenator, &text, marker, out);
    }

    for path in &cli.inputs {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "hyphenating input");
        emit(&hyphenator, &text, marker, out)?;
    }
    Ok(())
}

fn load(cli: &Cli) -> Result<Hyphenator> {
    let load_err = |source: LoadError| CliError::Load {
        path: cli.patterns.clone(),
        source,
    };
    let file = File::open(&cli.patterns).map_err(|e| load_err(LoadError::from(e)))?;
    let source = read_pattern_source(BufReader::new(file)).map_err(load_err)?;
    let hyphenator = Hyphenator::from_source(&cli.language, &source).map_err(load_err)?;
    info!(
        language = %cli.language,
        patterns = hyphenator.store().pattern_count(),
        exceptions = hyphenator.store().exception_count(),
        "pattern file loaded"
    );
    Ok(hyphenator)
}

fn emit<W: Write>(hyphenator: &Hyphenator, text: &str, marker: &str, out: &mut W) -> Result<()> {
    let (hyphenated, _) = hyphenator.hyphenate(text, marker);
    out.write_all(hyphenated.as_bytes())
        .and_then(|()| out.flush())
        .map_err(CliError::Output)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const PATTERNS: &str = "patterns \"hy3ph\" \"he2n\" \"hena4\" \"hen5at\" \"1na\" \"n2at\" \
                            \"1tio\" \"2io\" \"o2n\"\nexceptions \"ta-ble\"\n";

    fn pattern_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("texhyph").chain(args.iter().copied())).unwrap()
    }

    fn run_to_string(cli: &Cli, stdin: &str) -> Result<String> {
        let mut out = Vec::new();
        run(cli, stdin.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn hyphenates_stdin() {
        let patterns = pattern_file(PATTERNS);
        let cli = cli(&["--patterns", patterns.path().to_str().unwrap()]);
        let out = run_to_string(&cli, "hyphenation table\n").unwrap();
        assert_eq!(out, "hy-phen-ation ta-ble\n");
    }

    #[test]
    fn soft_flag_uses_entity() {
        let patterns = pattern_file(PATTERNS);
        let cli = cli(&["-p", patterns.path().to_str().unwrap(), "--soft"]);
        assert_eq!(cli.marker(), SOFT_HYPHEN_ENTITY);
        let out = run_to_string(&cli, "table").unwrap();
        assert_eq!(out, "ta&shy;ble");
    }

    #[test]
    fn custom_marker() {
        let patterns = pattern_file(PATTERNS);
        let cli = cli(&["-p", patterns.path().to_str().unwrap(), "-m", "|"]);
        assert_eq!(run_to_string(&cli, "hyphenation").unwrap(), "hy|phen|ation");
    }

    #[test]
    fn soft_conflicts_with_marker() {
        let parsed = Cli::try_parse_from(["texhyph", "-p", "x", "-m", "|", "--soft"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn reads_input_files_in_order() {
        let patterns = pattern_file(PATTERNS);
        let first = pattern_file("hyphenation, ");
        let second = pattern_file("table.");
        let cli = cli(&[
            "-p",
            patterns.path().to_str().unwrap(),
            first.path().to_str().unwrap(),
            second.path().to_str().unwrap(),
        ]);
        assert_eq!(
            run_to_string(&cli, "ignored").unwrap(),
            "hy-phen-ation, ta-ble."
        );
    }

    #[test]
    fn missing_pattern_file_is_load_error() {
        let cli = cli(&["-p", "/nonexistent/texhyph/patterns"]);
        let err = run_to_string(&cli, "").unwrap_err();
        assert!(matches!(err, CliError::Load { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn malformed_pattern_file_is_load_error() {
        let patterns = pattern_file("patterns \"a1b\"\nhyphenmins \"2\"\n");
        let cli = cli(&["-p", patterns.path().to_str().unwrap()]);
        let err = run_to_string(&cli, "").unwrap_err();
        assert!(err.to_string().contains("unrecognized section \"hyphenmins\" at line 2"));
    }

    #[test]
    fn missing_input_file_is_read_error() {
        let patterns = pattern_file(PATTERNS);
        let cli = cli(&[
            "-p",
            patterns.path().to_str().unwrap(),
            "/nonexistent/texhyph/input",
        ]);
        let err = run_to_string(&cli, "").unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}

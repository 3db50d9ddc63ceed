use clap::{Parser, ValueEnum};
use pgn_game::chess::{
    input::{CompressionMode, expand_pattern, open_input_stream},
    logging,
    moves::{game_json, game_summary},
};
use pgn_game::PgnReader;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One tab-separated line per game
    Summary,
    /// One JSON object per game, with every ply
    Json,
}

/// Parse PGN games and print their moves and results.
///
/// Set PGN_LOG=info|debug|... to see parser diagnostics on stderr.
#[derive(Parser)]
#[command(name = "pgn-game")]
#[command(version)]
struct Args {
    /// PGN file, or a glob pattern such as 'games/*.pgn'
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// Decompress inputs ('zstd'); '.zst' files are always decompressed
    #[arg(long, value_parser = CompressionMode::parse)]
    compression: Option<CompressionMode>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
}

/// Outcome of walking one input file.
enum FileOutcome {
    Finished,
    Failed,
}

fn process_file(
    path: &Path,
    compression: CompressionMode,
    format: OutputFormat,
    out: &mut impl Write,
) -> io::Result<FileOutcome> {
    let input = match open_input_stream(path, compression) {
        Ok(input) => input,
        Err(err_msg) => {
            log::error!("{err_msg}");
            return Ok(FileOutcome::Failed);
        }
    };

    let source = path.display().to_string();
    let mut reader = PgnReader::new(input);

    loop {
        let game_index = reader.games_read() + 1;
        match reader.read_game() {
            Ok(Some(game)) => match format {
                OutputFormat::Summary => {
                    writeln!(out, "{}", game_summary(&game, &source, game_index))?
                }
                OutputFormat::Json => {
                    writeln!(out, "{}", game_json(&game, &source, game_index))?
                }
            },
            Ok(None) => return Ok(FileOutcome::Finished),
            Err(error) => {
                let token = error.token().unwrap_or("");
                log::error!(
                    "file='{source}'; game_index={game_index}; token='{token}'; error={error}"
                );
                return Ok(FileOutcome::Failed);
            }
        }
    }
}

fn main() {
    logging::init();
    let args = Args::parse();
    let compression = args.compression.unwrap_or_default();

    let paths = match expand_pattern(&args.pattern) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: invalid pattern '{}': {}", args.pattern, e);
            process::exit(1);
        }
    };
    if paths.is_empty() {
        log::warn!("no files match '{}'", args.pattern);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = false;

    for path in &paths {
        match process_file(path, compression, args.format, &mut out) {
            Ok(FileOutcome::Finished) => {}
            Ok(FileOutcome::Failed) => failed = true,
            Err(e) => {
                eprintln!("Error writing output: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = out.flush() {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
    if failed {
        process::exit(1);
    }
}

//! CLI entry point for ricecake

use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use ricecake::{
    BuilderConfig, ChannelBuilder, ConfigFile, OutputConfig, ParserOptions, TreeFormatter,
    print_config_json, print_json, read_config,
};
use tracing_subscriber::EnvFilter;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ricecake")]
#[command(about = "Turn a folder of media and metadata.ini files into a content channel")]
#[command(version)]
struct Args {
    /// Log traversal details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the channel tree from a folder and print it
    Build {
        /// Channel folder holding channelmetadata.ini and one content folder
        path: PathBuf,

        /// Output the tree as JSON for an uploader
        #[arg(long = "json")]
        json: bool,

        /// List attached files beneath each content node
        #[arg(short = 'f', long = "files")]
        files: bool,

        /// Ignore entries matching pattern (can be used multiple times)
        #[arg(short = 'I', long = "ignore")]
        ignore: Vec<String>,

        /// Visit entries in filesystem order instead of sorting by name
        #[arg(long = "no-sort")]
        no_sort: bool,

        /// Descend into symlinked entries
        #[arg(long = "follow-symlinks")]
        follow_symlinks: bool,

        /// Accept option lines without a value
        #[arg(long = "allow-no-value")]
        allow_no_value: bool,

        /// Control color output: auto, always, never
        #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
        color: ColorMode,
    },

    /// Print a configuration file as JSON (reads stdin when no file is given)
    Ini2json {
        file: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let result = match args.command {
        Command::Build {
            path,
            json,
            files,
            ignore,
            no_sort,
            follow_symlinks,
            allow_no_value,
            color,
        } => {
            let config = BuilderConfig {
                ignore_patterns: ignore,
                sort_entries: !no_sort,
                follow_symlinks,
                parser: ParserOptions { allow_no_value },
                ..Default::default()
            };

            let root = if path.is_absolute() {
                path.clone()
            } else {
                std::env::current_dir()
                    .unwrap_or_else(|_| PathBuf::from("."))
                    .join(&path)
            };

            let output = match ChannelBuilder::new(config).construct_collecting(&root) {
                Ok(output) => output,
                Err(e) => {
                    eprintln!("ricecake: {}", e);
                    process::exit(1);
                }
            };

            for warning in &output.warnings {
                eprintln!("ricecake: warning: {}", warning);
            }

            if json {
                print_json(&output.channel)
            } else {
                let formatter = TreeFormatter::new(OutputConfig {
                    use_color: should_use_color(color),
                    show_files: files,
                });
                formatter.print(&output.channel)
            }
        }
        Command::Ini2json { file } => {
            let config = match file {
                Some(path) => read_config(&path).map_err(|e| e.to_string()),
                None => read_stdin_config(),
            };
            match config {
                Ok(config) => print_config_json(&config),
                Err(e) => {
                    eprintln!("ricecake: {}", e);
                    process::exit(1);
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("ricecake: error writing output: {}", e);
        process::exit(1);
    }
}

fn read_stdin_config() -> Result<ConfigFile, String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("cannot read stdin: {}", e))?;
    ConfigFile::parse(&text).map_err(|e| format!("cannot parse stdin: {}", e))
}

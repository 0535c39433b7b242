use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use specmodel::ast::CompilationUnit;
use specmodel::diagnostics::{format_error, render_error, ParseError};
use specmodel::{config, grammar, pretty, ParserConfig, Specification};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specmodel", version, about = "Build specification models from front-end syntax trees")]
struct Cli {
    /// Path to specmodel.toml (defaults to the nearest one above the input)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log build decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every class in a syntax-tree file and print the models
    Parse {
        /// Front-end JSON file
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Original source file, used to render diagnostics
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Build all classes of one or more files, reporting every failure
    Check {
        /// Front-end JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the block label grammar
    Grammar,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "specmodel=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SPECMODEL_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_config(explicit: Option<&Path>, input: &Path) -> Result<ParserConfig, ParseError> {
    match explicit {
        Some(path) => config::load_config(path),
        None => config::discover(input.parent().unwrap_or(Path::new("."))),
    }
}

/// Source text for diagnostics: `--source`, or the unit's `source_path`
/// relative to the input file.
fn load_source(explicit: Option<&Path>, unit: &CompilationUnit, input: &Path) -> Option<(String, String)> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let rel = unit.source_path.as_ref()?;
            input.parent().unwrap_or(Path::new(".")).join(rel)
        }
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => Some((path.display().to_string(), text)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read source for diagnostics");
            None
        }
    }
}

fn report(err: &ParseError, source: Option<&(String, String)>, fallback_name: &str) {
    match source {
        Some((name, text)) => eprint!("{}", render_error(text, name, err, std::io::stderr().is_terminal())),
        None => eprintln!("{}", format_error(fallback_name, err)),
    }
}

fn run_parse(file: &Path, format: Format, source: Option<&Path>, config_path: Option<&Path>) -> Result<(), ()> {
    let file_name = file.display().to_string();
    let fail = |err: ParseError| report(&err, None, &file_name);

    let config = resolve_config(config_path, file).map_err(fail)?;
    let unit = specmodel::load_unit(file).map_err(fail)?;
    let source = load_source(source, &unit, file);

    let mut specs: Vec<Specification> = Vec::new();
    for class in unit.classes {
        let name = class.name.clone();
        match specmodel::build(class, &config) {
            Ok(spec) => specs.push(spec),
            Err(err) => {
                report(&err, source.as_ref(), &file_name);
                eprintln!("error: could not build specification '{name}'");
                return Err(());
            }
        }
    }

    match format {
        Format::Text => {
            for spec in &specs {
                print!("{}", pretty::pretty_print(spec));
            }
        }
        Format::Json => match serde_json::to_string_pretty(&specs) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: cannot serialize model: {e}");
                return Err(());
            }
        },
    }
    Ok(())
}

fn run_check(files: &[PathBuf], config_path: Option<&Path>) -> Result<(), ()> {
    let mut total = 0usize;
    let mut failed = 0usize;

    for file in files {
        let file_name = file.display().to_string();
        let loaded = resolve_config(config_path, file)
            .and_then(|config| specmodel::load_unit(file).map(|unit| (config, unit)));
        let (config, unit) = match loaded {
            Ok(pair) => pair,
            Err(err) => {
                report(&err, None, &file_name);
                failed += 1;
                continue;
            }
        };
        let source = load_source(None, &unit, file);

        for (name, result) in specmodel::build_all(unit.classes, &config) {
            total += 1;
            match result {
                Ok(spec) => {
                    eprintln!("  ok {name} ({} features)", spec.features().count());
                }
                Err(err) => {
                    failed += 1;
                    report(&err, source.as_ref(), &file_name);
                }
            }
        }
    }

    eprintln!("checked {total} class(es): {failed} failed");
    if failed > 0 { Err(()) } else { Ok(()) }
}

fn print_grammar() {
    for d in grammar::descriptors() {
        let successors: Vec<&str> = d.successors.iter().map(|s| s.token()).collect();
        println!("{:<10} -> {}", d.kind.token(), successors.join(", "));
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Parse { file, format, source } => run_parse(&file, format, source.as_deref(), config_path),
        Commands::Check { files } => run_check(&files, config_path),
        Commands::Grammar => {
            print_grammar();
            Ok(())
        }
    };

    if result.is_err() {
        std::process::exit(1);
    }
}

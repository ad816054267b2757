//! CLI tool for tagsync.
//!
//! Usage:
//!   tagsync --offset 1 --old "<div" --new "<span" page.html
//!   tagsync --offset 8 --old "</div" --new "</span" --code "<div></div>"
//!   tagsync --help

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tagsync::{LinkedRename, Location, RenameRequest};

/// Compute the linked rename for an edited markup tag
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Document to read (the text after the edit)
    file: Option<PathBuf>,

    /// Inline document text instead of a file
    #[arg(short, long, conflicts_with = "file")]
    code: Option<String>,

    /// Byte offset of the edited tag
    #[arg(long)]
    offset: usize,

    /// Token before the edit, e.g. "<div" or "</div"
    #[arg(long, allow_hyphen_values = true)]
    old: String,

    /// Token after the edit, e.g. "<span" or "</span"
    #[arg(long, allow_hyphen_values = true)]
    new: String,

    /// Editor language id
    #[arg(short, long, default_value = "html")]
    language: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    output: OutputFormat,

    /// Print the document with the linked rename applied
    #[arg(long)]
    apply: bool,

    /// Trace every decision (same as RUST_LOG=tagsync=trace)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = match (&cli.code, &cli.file) {
        (Some(code), _) => code.clone(),
        (None, Some(file)) => match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", file.display(), e);
                process::exit(1);
            }
        },
        (None, None) => {
            eprintln!("Error: no input provided (pass a FILE or --code)");
            process::exit(1);
        }
    };

    let request = RenameRequest::new(source, cli.offset, cli.new, cli.old).language(cli.language);
    let rename = match request.resolve() {
        Ok(rename) => rename,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    };

    if cli.apply {
        match &rename {
            Some(rename) => print!("{}", rename.apply(&request.text)),
            None => print!("{}", request.text),
        }
        return;
    }

    match cli.output {
        OutputFormat::Pretty => print_pretty(rename.as_ref(), &request.text),
        OutputFormat::Json => print_json(rename.as_ref()),
    }
}

/// Install a stderr subscriber when `-v` or `RUST_LOG` asks for one.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("tagsync=trace")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn print_pretty(rename: Option<&LinkedRename>, source: &str) {
    let Some(rename) = rename else {
        println!("no linked rename");
        return;
    };

    let old_name = rename.span().text(source).unwrap_or("");
    println!(
        "rename `{}` -> `{}` at {} ({})",
        old_name,
        rename.tag_name,
        Location::of_offset(source, rename.start_offset),
        rename.span(),
    );
}

fn print_json(rename: Option<&LinkedRename>) {
    match serde_json::to_string_pretty(&rename) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

use std::fs::File;
use std::io::stdin;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use docview::{DirSource, DocumentSource, DocumentView, MemorySource, Options, RenderDescriptor};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Indented outline, one line per field
    Text,
    /// Render descriptors as JSON
    Json,
    /// The normalized document as JSON
    Normalized,
}

#[derive(Parser, Debug)]
#[command(
    name = "docview",
    about = "Browse and render document-database exports",
    version
)]
struct Args {
    /// Export directory laid out as <root>/<collection>/<id>.json
    #[arg(long, env = "DOCVIEW_ROOT", global = true)]
    root: Option<PathBuf>,

    /// Single-file export of the form {collection: {id: document}} (takes precedence over --root)
    #[arg(long, global = true)]
    export: Option<PathBuf>,

    /// Deepest nesting level rendered before cutting off
    #[arg(long, default_value_t = docview::DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,

    /// Spaces per nesting level in text output
    #[arg(long, default_value_t = 2, global = true)]
    indent: usize,

    /// Log more (-v debug, -vv trace); otherwise DOCVIEW_LOG or warn
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List top-level collections
    Collections,
    /// List the documents of a collection
    Documents { collection: String },
    /// Render one stored document
    Show {
        collection: String,
        id: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Render a JSON document from a file (defaults to stdin)
    Render {
        input: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("DOCVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_source(args: &Args) -> Result<Box<dyn DocumentSource>> {
    if let Some(path) = &args.export {
        debug!(path = %path.display(), "loading single-file export");
        let source = MemorySource::from_file(path)
            .with_context(|| format!("loading export {}", path.display()))?;
        return Ok(Box::new(source));
    }
    match &args.root {
        Some(root) => {
            debug!(root = %root.display(), "reading export directory");
            Ok(Box::new(DirSource::new(root)))
        }
        None => bail!("no export given: pass --root DIR (or set DOCVIEW_ROOT) or --export FILE"),
    }
}

fn print_fields(fields: &[RenderDescriptor], normalized: &serde_json::Value, format: Format, options: &Options) -> Result<()> {
    match format {
        Format::Text if fields.is_empty() => println!("This document has no fields."),
        Format::Text => print!("{}", docview::render::text::to_text(fields, options)),
        Format::Json => println!("{}", serde_json::to_string_pretty(fields)?),
        Format::Normalized => println!("{}", serde_json::to_string_pretty(normalized)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = Options {
        max_depth: args.max_depth,
        indent: args.indent,
    };

    match &args.command {
        Command::Collections => {
            let source = open_source(&args)?;
            for name in source.list_collections()? {
                println!("{}", name);
            }
        }
        Command::Documents { collection } => {
            let source = open_source(&args)?;
            for id in source.list_documents(collection)? {
                println!("{}", id);
            }
        }
        Command::Show { collection, id, format } => {
            let source = open_source(&args)?;
            match DocumentView::load(source.as_ref(), collection, id, &options) {
                DocumentView::Loaded { fields, normalized, .. } => {
                    print_fields(&fields, &normalized, *format, &options)?;
                }
                DocumentView::NotFound { collection, id } => {
                    bail!("document {} does not exist in collection {}", id, collection)
                }
                DocumentView::Failed { collection, id, message } => {
                    bail!("failed to load document {} from {}: {}", id, collection, message)
                }
            }
        }
        Command::Render { input, format } => {
            let doc = match input {
                Some(path) => {
                    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
                    docview::from_reader(f)?
                }
                None => docview::from_reader(stdin().lock())?,
            };
            let fields = docview::render_document(&doc, &options);
            print_fields(&fields, &docview::normalize(&doc), *format, &options)?;
        }
    }

    Ok(())
}

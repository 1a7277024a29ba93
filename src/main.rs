//! cell-titles - annotate markdown tables with column header titles

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cell_titles::export::write_html;
use cell_titles::import::parse_markdown;
use cell_titles::{Config, HeaderStyle, Pipeline, TableCellTitles};

#[derive(Parser)]
#[command(name = "cell-titles")]
#[command(version, about = "Render markdown to HTML with column titles on table cells", long_about = None)]
#[command(after_help = "EXAMPLES:
    cell-titles README.md                     Print HTML to stdout
    cell-titles doc.md -o doc.html            Write HTML to a file
    cat doc.md | cell-titles --slug-headers   Use slugged header titles")]
struct Cli {
    /// Markdown input file (stdin when omitted)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// HTML output file (stdout when omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// JSON config file; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Attribute written on each body cell
    #[arg(long, value_name = "NAME")]
    attribute_name: Option<String>,

    /// Leave cells unannotated when their column header is empty
    #[arg(long)]
    skip_empty_headers: bool,

    /// Use slugged header text (e.g. "unit-price")
    #[arg(long)]
    slug_headers: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> cell_titles::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(name) = &cli.attribute_name {
        config.attribute_name = name.clone();
    }
    if cli.skip_empty_headers {
        config.skip_empty_headers = true;
    }
    if cli.slug_headers {
        config.header_style = HeaderStyle::Slug;
    }

    let pipeline = Pipeline::new().with(TableCellTitles::new(config.into_options()?));

    let markdown = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut doc = parse_markdown(&markdown);
    pipeline.run(&mut doc);

    match &cli.output {
        Some(path) => {
            write_html(&doc, std::fs::File::create(path)?)?;
            tracing::info!(output = %path, "wrote html");
        }
        None => write_html(&doc, std::io::stdout().lock())?,
    }
    Ok(())
}

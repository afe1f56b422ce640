use clap::{Parser, Subcommand, ValueEnum};
use site_content::content::{self, SiteContent};
use site_content::loader::ChunkedLoader;
use site_content::orchestrate::{FnObserver, LoadUpdate, load_content_with_progress};
use site_content::progress::ProgressChannel;
use site_content::{analyze, config, output, render, sanitize};
use std::io::Read;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "site-content")]
#[command(about = "Site copy and content utilities for a small marketing site")]
#[command(long_about = "\
Site copy and content utilities for a small marketing site

Content commands print the site copy: navigation, endorsements, and
certificates. Pass --content to overlay a TOML file on the stock copy
(run 'site-content gen-content' for the full stock file).

Utility commands read a file, or stdin when no file is given:
  sanitize-html   strip script blocks, javascript: schemes, on*= handlers
  sanitize-text   escape & < > \" '
  analyze-svg     viewBox, element counts, title (JSON)
  analyze-html    headings, paragraph and image counts (JSON)
  load            chunked load of the input's lines, with progress

Run 'site-content gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// TOML file overlaid on the stock site content
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List navigation links
    Nav,
    /// List all endorsements
    Endorsements,
    /// Show one endorsement as JSON
    Endorsement {
        /// Endorsement id, e.g. "parliamentary"
        id: String,
    },
    /// List all certificates
    Certificates,
    /// Render a content section as an HTML fragment
    Render {
        #[arg(value_enum)]
        section: Section,
    },
    /// Strip dangerous patterns from HTML
    SanitizeHtml { file: Option<PathBuf> },
    /// Entity-escape plain text
    SanitizeText { file: Option<PathBuf> },
    /// Summarize an SVG document
    AnalyzeSvg { file: Option<PathBuf> },
    /// Summarize an HTML document
    AnalyzeHtml { file: Option<PathBuf> },
    /// Load the input's lines in chunks, printing progress
    Load {
        file: Option<PathBuf>,
        /// Lines per chunk (overrides config), at least 1
        #[arg(long)]
        chunk_size: Option<NonZeroUsize>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the stock site content as TOML
    GenContent,
}

#[derive(Clone, Copy, ValueEnum)]
enum Section {
    Nav,
    Endorsements,
    Certificates,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(cli).await
}

/// Dispatch one command. Config and content files are only read by the
/// commands that use them, so `gen-config` and `gen-content` work even when
/// the files on disk are broken.
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let content_path = cli.content.as_deref();

    match cli.command {
        Command::Nav => output::print_nav(resolve_content(content_path)?.nav_links()),
        Command::Endorsements => {
            output::print_endorsements(resolve_content(content_path)?.all_endorsements())
        }
        Command::Endorsement { id } => {
            let site = resolve_content(content_path)?;
            let endorsement = site
                .endorsement_by_id(&id)
                .ok_or_else(|| format!("no endorsement with id '{id}'"))?;
            println!("{}", serde_json::to_string_pretty(endorsement)?);
        }
        Command::Certificates => {
            output::print_certificates(resolve_content(content_path)?.all_certificates())
        }
        Command::Render { section } => {
            let site = resolve_content(content_path)?;
            let markup = match section {
                Section::Nav => render::nav(site.nav_links(), ""),
                Section::Endorsements => render::endorsements(site.all_endorsements()),
                Section::Certificates => render::certificates(&site.certificates),
            };
            println!("{}", markup.into_string());
        }
        Command::SanitizeHtml { file } => {
            print!("{}", sanitize::sanitize_html(&read_input(file.as_deref())?));
        }
        Command::SanitizeText { file } => {
            print!("{}", sanitize::sanitize_text(&read_input(file.as_deref())?));
        }
        Command::AnalyzeSvg { file } => {
            let analysis = analyze::analyze_svg(&read_input(file.as_deref())?);
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::AnalyzeHtml { file } => {
            let tool_config = config::load_config(&cli.config_dir)?;
            let analysis = analyze::analyze_html_with(
                &read_input(file.as_deref())?,
                tool_config.analyzer.heading_order,
            );
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Command::Load { file, chunk_size } => {
            let input = read_input(file.as_deref())?;
            let lines: Vec<String> = input.lines().map(str::to_string).collect();
            let tool_config = config::load_config(&cli.config_dir)?;
            let chunk_size = chunk_size.map_or(tool_config.loader.chunk_size, NonZeroUsize::get);

            let channel = ProgressChannel::new();
            let loader = ChunkedLoader::with_labels(
                lines,
                chunk_size,
                |chunk: &[String]| Ok(chunk.to_vec()),
                &channel,
                tool_config.loader.labels(),
            );
            let mut observer = FnObserver::new(
                |update: LoadUpdate<'_, String>| {
                    println!(
                        "{}",
                        output::format_load_progress(&update.progress, update.items.len())
                    );
                },
                |_: &[String]| {},
            );
            let loaded = load_content_with_progress(loader, &mut observer).await?;

            let snapshot = channel.latest();
            println!(
                "{}",
                output::format_load_summary(loaded.len(), snapshot.total as usize)
            );
            if !snapshot.message.is_empty() {
                println!("{}", snapshot.message);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenContent => {
            print!("{}", SiteContent::stock().to_toml()?);
        }
    }

    Ok(())
}

/// Stock content, or the stock content with an overlay file merged on top.
fn resolve_content(path: Option<&Path>) -> Result<SiteContent, content::ContentError> {
    match path {
        Some(path) => content::load_content(path),
        None => Ok(content::site_content().clone()),
    }
}

/// Read a file, or all of stdin when no path is given.
fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wml_ooxml::{BlockKind, ChoiceItem, ChoiceKind, Comments, OoxmlArchive, XmlConfig};

/// Output format for inspection reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "wml")]
#[command(author, version, about = "Inspect and rewrite WordprocessingML comments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize every comment: author, content kinds and text
    Inspect {
        /// Input comments.xml or DOCX file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Parse and re-serialize the comments part
    Normalize {
        /// Input comments.xml or DOCX file
        input: PathBuf,

        /// Output file (defaults to the comments XML on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Serialization settings (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Remove every element of one kind from all comments
    Strip {
        /// Input comments.xml or DOCX file
        input: PathBuf,

        /// Element name to remove, e.g. w:bookmarkStart
        #[arg(short, long)]
        kind: String,

        /// Output file (defaults to the comments XML on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { input, format } => {
            inspect_command(&input, format)?;
        }
        Commands::Normalize {
            input,
            output,
            config,
        } => {
            normalize_command(&input, output.as_deref(), config.as_deref())?;
        }
        Commands::Strip {
            input,
            kind,
            output,
        } => {
            strip_command(&input, &kind, output.as_deref())?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (warnings only by default)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded in another tool
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// A loaded input: a bare comments part or a whole package
pub enum Input {
    /// A standalone comments.xml
    Part,
    /// A DOCX package; the comments part is replaced on write
    Package(OoxmlArchive),
}

/// ZIP local file header signature
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Load the comments of `path`, detecting packages by their ZIP signature
///
/// A package must have a main document part. A package without a comments
/// part yields an empty [`Comments`].
pub fn load_input(path: &Path, config: &XmlConfig) -> Result<(Input, Comments)> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let bytes =
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?;

    if bytes.starts_with(ZIP_MAGIC) {
        debug!("Reading {} as a package", path.display());
        let archive = OoxmlArchive::from_reader(std::io::Cursor::new(bytes))
            .with_context(|| format!("Failed to open DOCX file: {}", path.display()))?;
        archive.document_xml().with_context(|| {
            format!("{} is not a WordprocessingML package", path.display())
        })?;
        let comments = match archive.comments_xml() {
            Some(xml) => Comments::parse_with(xml, config)
                .with_context(|| format!("Failed to parse comments in {}", path.display()))?,
            None => {
                info!("{} has no comments part", path.display());
                Comments::new()
            }
        };
        Ok((Input::Package(archive), comments))
    } else {
        debug!("Reading {} as a comments part", path.display());
        let comments = Comments::parse_with(&bytes, config)
            .with_context(|| format!("Failed to parse comments: {}", path.display()))?;
        Ok((Input::Part, comments))
    }
}

/// Write `comments` back in the form of the input
///
/// Without an output path the comments XML goes to stdout, even for packages.
fn write_output(
    input: Input,
    comments: &Comments,
    output: Option<&Path>,
    config: &XmlConfig,
) -> Result<()> {
    let xml = comments
        .to_xml_with(config)
        .context("Failed to serialize comments")?;

    match (input, output) {
        (_, None) => {
            println!("{}", xml);
        }
        (Input::Part, Some(path)) => {
            fs::write(path, xml)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        (Input::Package(mut archive), Some(path)) => {
            archive.set_comments_xml(xml);
            archive
                .write_to_file(path)
                .with_context(|| format!("Failed to write DOCX file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

/// Summary of one comment
#[derive(Debug, Clone, Serialize)]
pub struct CommentReport {
    pub id: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    /// Element counts keyed by element name
    pub counts: BTreeMap<String, usize>,
    pub text: String,
}

/// Build the per-comment summary for `input`
pub fn inspect_report(input: &Path) -> Result<Vec<CommentReport>> {
    let (_, comments) = load_input(input, &XmlConfig::default())?;

    Ok(comments
        .iter()
        .map(|comment| {
            let mut counts = BTreeMap::new();
            for item in comment.content() {
                *counts.entry(item.kind().to_string()).or_insert(0) += 1;
            }
            CommentReport {
                id: comment.id.clone(),
                author: comment.author.clone(),
                date: comment.date.clone(),
                initials: comment.initials.clone(),
                counts,
                text: comment.text(),
            }
        })
        .collect())
}

/// Execute the inspect command
pub fn inspect_command(input: &Path, format: OutputFormat) -> Result<()> {
    let report = inspect_report(input)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if report.is_empty() {
                println!("No comments in {}", input.display());
            }
            for comment in &report {
                match &comment.date {
                    Some(date) => println!("#{} {} ({})", comment.id, comment.author, date),
                    None => println!("#{} {}", comment.id, comment.author),
                }
                let counts: Vec<String> = comment
                    .counts
                    .iter()
                    .map(|(name, count)| format!("{} x{}", name, count))
                    .collect();
                println!("  content: {}", counts.join(", "));
                for line in comment.text.lines() {
                    println!("  > {}", line);
                }
                println!();
            }
            println!("{} comment(s)", report.len());
        }
    }

    Ok(())
}

/// Execute the normalize command
pub fn normalize_command(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => XmlConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => XmlConfig::default(),
    };

    let (input, comments) = load_input(input, &config)?;
    info!("Normalizing {} comment(s)", comments.len());
    write_output(input, &comments, output, &config)
}

/// Execute the strip command
pub fn strip_command(input: &Path, kind_name: &str, output: Option<&Path>) -> Result<()> {
    let kind = BlockKind::from_element_name(kind_name).with_context(|| {
        format!(
            "Unknown block-level element '{}' (expected one of: {})",
            kind_name,
            BlockKind::ALL
                .iter()
                .map(|k| k.element_name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    let config = XmlConfig::default();
    let (input, mut comments) = load_input(input, &config)?;

    let removed: usize = comments
        .iter_mut()
        .map(|comment| comment.content_mut().remove_all(kind))
        .sum();
    info!("Removed {} <{}> element(s)", removed, kind);

    write_output(input, &comments, output, &config)
}

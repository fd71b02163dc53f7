//! Analyze command - extract metadata from a single text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::{debug, info};

use docstamp_core::{DocumentExtractor, DocumentMetadata};

use super::{build_analyzer, load_config};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input text file, or `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reference date for validating and defaulting dates (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let text = read_input(&args.input)?;

    info!("Analyzing {} ({} chars)", args.input.display(), text.chars().count());

    let analyzer = build_analyzer(config, args.today);
    let metadata = analyzer.analyze(&text);

    let output = format_metadata(&metadata, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read a text file, or stdin when the path is `-`.
pub fn read_input(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(fs::read_to_string(path)?)
}

pub fn format_metadata(metadata: &DocumentMetadata, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(metadata)?),
        OutputFormat::Csv => format_csv(metadata),
        OutputFormat::Text => Ok(format_text(metadata)),
    }
}

fn format_csv(metadata: &DocumentMetadata) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "document_type",
        "subject",
        "counterparty",
        "amount",
        "has_seal",
        "suggested_name",
    ])?;

    wtr.write_record([
        metadata.date.as_str(),
        metadata.document_type.as_str(),
        metadata.subject.as_str(),
        metadata.counterparty.as_str(),
        metadata.amount.as_deref().unwrap_or(""),
        if metadata.has_seal { "true" } else { "false" },
        metadata.suggested_name.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(metadata: &DocumentMetadata) -> String {
    let mut output = String::new();

    output.push_str(&format!("Date: {}\n", metadata.date));
    output.push_str(&format!("Type: {}\n", metadata.document_type));
    output.push_str(&format!("Issuer: {}\n", metadata.subject));
    output.push_str(&format!("Recipient: {}\n", metadata.counterparty));
    if let Some(amount) = &metadata.amount {
        output.push_str(&format!("Amount: ¥{}\n", amount));
    }
    output.push_str(&format!("Seal: {}\n", if metadata.has_seal { "yes" } else { "no" }));
    output.push_str(&format!("Suggested name: {}\n", metadata.suggested_name));

    output
}

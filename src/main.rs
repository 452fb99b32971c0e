use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use std::env;
use std::process;
use tracing::{error, info};

use pdf_structify::{ExtractionRequest, ExtractorConfig, StructuredExtractor};

#[tokio::main]
async fn main() {
    let matches = Command::new("pdf-structify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract structured JSON from a PDF using an OpenAI-compatible model")
        .long_about(
            "Extracts structured data from a PDF document.\n\
            Text-bearing documents are sent to a text model; scan-like documents\n\
            are rasterized and sent to a vision model. The result is JSON that\n\
            conforms to the supplied schema, printed to stdout.",
        )
        .arg(
            Arg::new("pdf")
                .value_name("PDF")
                .help("Path to the PDF document")
                .required(true),
        )
        .arg(
            Arg::new("schema")
                .long("schema")
                .value_name("FILE")
                .help("Path to the JSON schema the result must conform to")
                .required(true),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("API key (defaults to the OPENAI_API_KEY environment variable)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("OpenAI-compatible endpoint base URL")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("model")
                .long("model")
                .value_name("MODEL")
                .help("Default model for both text and vision calls")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("text-model")
                .long("text-model")
                .value_name("MODEL")
                .help("Model override for text-bearing documents")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("vision-model")
                .long("vision-model")
                .value_name("MODEL")
                .help("Model override for scan-like documents")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("no-vision")
                .long("no-vision")
                .help("Fail on scan-like documents instead of calling a vision model")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("text-threshold")
                .long("text-threshold")
                .value_name("CHARS")
                .help("Minimum extractable characters to treat a document as text-bearing (default: 100)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("temperature")
                .long("temperature")
                .value_name("T")
                .help("Sampling temperature for this extraction (default: 0)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("max-output-tokens")
                .long("max-output-tokens")
                .value_name("N")
                .help("Cap on model output tokens")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("system-prompt")
                .long("system-prompt")
                .value_name("PROMPT")
                .help("System prompt override; pass an empty string to send no system message")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .help("Only log errors")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Logs go to stderr; stdout is reserved for the extraction result.
    let log_level = if std::env::var("RUST_LOG").is_ok() {
        None
    } else if matches.get_flag("quiet") {
        Some("error")
    } else {
        Some("info")
    };

    if let Some(level) = log_level {
        std::env::set_var("RUST_LOG", level);
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&matches).await {
        error!("extraction failed: {e:#}");
        process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let pdf_path = matches.get_one::<String>("pdf").expect("required arg");
    let schema_path = matches.get_one::<String>("schema").expect("required arg");

    let schema_text = std::fs::read_to_string(schema_path)
        .with_context(|| format!("failed to read schema file {schema_path}"))?;
    let schema: serde_json::Value = serde_json::from_str(&schema_text)
        .with_context(|| format!("schema file {schema_path} is not valid JSON"))?;

    let api_key = matches
        .get_one::<String>("api-key")
        .cloned()
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .unwrap_or_default();

    let mut config = ExtractorConfig::new(api_key);
    config.base_url = matches.get_one::<String>("base-url").cloned();
    if let Some(model) = matches.get_one::<String>("model") {
        config.default_model = model.clone();
    }
    config.text_model = matches.get_one::<String>("text-model").cloned();
    config.vision_model = matches.get_one::<String>("vision-model").cloned();
    config.vision_enabled = !matches.get_flag("no-vision");
    if let Some(threshold) = matches.get_one::<String>("text-threshold") {
        config.text_threshold = threshold
            .parse()
            .context("--text-threshold must be a non-negative integer")?;
    }
    config.system_prompt = matches.get_one::<String>("system-prompt").cloned();

    let extractor = StructuredExtractor::new(config)?;

    let mut request = ExtractionRequest::from_path(schema, pdf_path.clone());
    if let Some(temperature) = matches.get_one::<String>("temperature") {
        request.temperature = Some(temperature.parse().context("--temperature must be a number")?);
    }
    if let Some(max_tokens) = matches.get_one::<String>("max-output-tokens") {
        request.max_output_tokens = Some(
            max_tokens
                .parse()
                .context("--max-output-tokens must be a positive integer")?,
        );
    }

    info!("extracting structured data from {pdf_path}");

    let result = extractor.extract::<serde_json::Value>(request).await?;

    match result.tokens_used {
        Some(tokens) => info!(model = %result.model_used, tokens, "extraction complete"),
        None => info!(model = %result.model_used, "extraction complete"),
    }

    println!("{}", serde_json::to_string_pretty(&result.data)?);
    Ok(())
}

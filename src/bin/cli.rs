//! mindmap-extract CLI
//!
//! Reads an extracted mindmap (a bare `{text, children}` node or an extraction
//! envelope `{data, ...metadata}`) and prints it in the requested format.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use mindmap_extract::Mindmap;
use mindmap_extract::analysis::{AnalysisConfig, AnalysisType, ChatRequest, PromptBuilder};
use mindmap_extract::export::OutlineFormatter;
use mindmap_extract::tools::{ToolContext, ToolRegistry};
use mindmap_extract::transport::{
    Alphabet, DEFAULT_VIEWER_URL, TransportCodec, fits_in_url, viewer_url,
};
use serde_json::Value;
use std::io::Read;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    /// Short summary of the main themes
    Summary,
    /// Key insights and connections
    Insights,
    /// Comprehension questions
    Questions,
    /// Ideas for new nodes
    Expand,
    /// General analysis
    General,
}

impl From<Kind> for AnalysisType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Summary => AnalysisType::Summary,
            Kind::Insights => AnalysisType::Insights,
            Kind::Questions => AnalysisType::Questions,
            Kind::Expand => AnalysisType::Expand,
            Kind::General => AnalysisType::General,
        }
    }
}

#[derive(Parser)]
#[command(name = "mindmap-extract")]
#[command(version)]
#[command(
    about = "Export scraped mindmaps as JSON, CSV, outlines and viewer links",
    long_about = None
)]
struct Cli {
    /// Mindmap JSON file, or "-" for stdin
    #[arg(long, short = 'i', value_name = "FILE", default_value = "-", global = true)]
    input: String,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized mindmap as JSON
    Json {
        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Print the mindmap as CSV for spreadsheet import
    Csv,
    /// Print the mindmap as an indented outline
    Outline {
        /// Indentation per level
        #[arg(long, default_value = "  ")]
        indent: String,

        /// Bullet marker
        #[arg(long, default_value = "•")]
        bullet: String,

        /// Word used in child count annotations
        #[arg(long, default_value = "subnodes")]
        children_label: String,
    },
    /// Encode the mindmap into a transport string
    Encode {
        /// Use the URL-safe base64 alphabet
        #[arg(long)]
        url_safe: bool,

        /// Encode only the node tree, without extraction metadata
        #[arg(long)]
        tree_only: bool,
    },
    /// Decode a transport string and print the JSON it carries
    Decode {
        /// Encoded transport string
        payload: String,

        /// The payload uses the URL-safe base64 alphabet
        #[arg(long)]
        url_safe: bool,
    },
    /// Print a viewer URL carrying the mindmap
    ViewerUrl {
        /// Viewer page
        #[arg(long, value_name = "URL", default_value = DEFAULT_VIEWER_URL)]
        base: String,
    },
    /// Print the analysis prompt, or the full chat-completions request body
    Prompt {
        /// Kind of analysis
        #[arg(long, short = 'k', value_enum, default_value = "summary")]
        kind: Kind,

        /// Print the request body instead of the bare prompt
        #[arg(long)]
        request: bool,

        /// Model name (default: $MINDMAP_MODEL or gpt-5-mini)
        #[arg(long)]
        model: Option<String>,

        /// Language the model should answer in
        #[arg(long, default_value = "English")]
        language: String,
    },
    /// Print node count, depth and leaf count
    Stats,
    /// Run a named tool with JSON parameters
    Tool {
        /// Tool name (see `tools`)
        name: String,

        /// JSON parameters
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available tools
    Tools,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Json { compact } => {
            let mindmap = load_mindmap(&cli.input)?;
            if compact {
                println!("{}", mindmap.to_compact_json()?);
            } else {
                println!("{}", mindmap.to_json()?);
            }
        }
        Command::Csv => {
            let mindmap = load_mindmap(&cli.input)?;
            let table = mindmap.to_table().context("Failed to export CSV")?;
            println!("{}", table.to_csv());
        }
        Command::Outline {
            indent,
            bullet,
            children_label,
        } => {
            let mindmap = load_mindmap(&cli.input)?;
            let formatter = OutlineFormatter::new()
                .indent(indent)
                .bullet(bullet)
                .children_label(children_label);
            println!("{}", formatter.format(&mindmap.flatten()));
        }
        Command::Encode { url_safe, tree_only } => {
            let mindmap = load_mindmap(&cli.input)?;
            let codec = codec_for(url_safe);
            let encoded = if tree_only {
                codec.encode(mindmap.root())?
            } else {
                codec.encode(&mindmap)?
            };
            if !fits_in_url(&encoded) {
                eprintln!(
                    "Warning: encoded payload is {} bytes and may not fit in a URL",
                    encoded.len()
                );
            }
            println!("{}", encoded);
        }
        Command::Decode { payload, url_safe } => {
            let decoded: Value = codec_for(url_safe)
                .decode(&payload)
                .context("Failed to decode payload")?;
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
        Command::ViewerUrl { base } => {
            let mindmap = load_mindmap(&cli.input)?;
            let url = viewer_url(&base, &mindmap, &TransportCodec::default())?;
            println!("{}", url);
        }
        Command::Prompt {
            kind,
            request,
            model,
            language,
        } => {
            let mindmap = load_mindmap(&cli.input)?;
            let mut config = AnalysisConfig::from_env().language(language);
            if let Some(model) = model {
                config = config.model(model);
            }

            let prompt = PromptBuilder::new().build(Some(mindmap.root()), kind.into());
            if request {
                eprintln!("Endpoint: {}", config.chat_completions_url());
                let body = ChatRequest::for_analysis(&config, prompt);
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", prompt);
            }
        }
        Command::Stats => {
            let mindmap = load_mindmap(&cli.input)?;
            println!("{}", serde_json::to_string_pretty(&mindmap.stats())?);
        }
        Command::Tool { name, params } => {
            let params: Value =
                serde_json::from_str(&params).context("--params is not valid JSON")?;
            let mindmap = load_mindmap(&cli.input)?;
            let registry = ToolRegistry::with_defaults();
            let mut context = ToolContext::new(&mindmap).with_config(AnalysisConfig::from_env());

            let result = registry.dispatch(&name, params, &mut context);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                bail!("Tool '{}' failed", name);
            }
        }
        Command::Tools => {
            let registry = ToolRegistry::with_defaults();
            for name in registry.names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

fn codec_for(url_safe: bool) -> TransportCodec {
    let alphabet = if url_safe { Alphabet::UrlSafe } else { Alphabet::Standard };
    TransportCodec::new().with_alphabet(alphabet)
}

fn load_mindmap(input: &str) -> anyhow::Result<Mindmap> {
    let json = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read mindmap from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
    };

    let mindmap = Mindmap::from_json(&json).context("Input is not valid JSON")?;
    log::info!("Loaded mindmap with {} nodes", mindmap.stats().node_count);
    Ok(mindmap)
}

//! unnotion CLI - Notion page conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;

use unnotion::model::{Block, Page};
use unnotion::render::{render_blocks_with_stats, to_json, to_text};
use unnotion::{parse_blocks, parse_page, slugify, DocumentBuilder, JsonFormat, RenderOptions};

#[derive(Parser)]
#[command(name = "unnotion")]
#[command(version)]
#[command(about = "Convert Notion pages and blocks to Markdown, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a page to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Page object JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Block array or list response JSON file
        #[arg(value_name = "BLOCKS")]
        blocks: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long, env = "UNNOTION_FRONTMATTER")]
        frontmatter: bool,

        /// Number list items with a running counter
        #[arg(long, env = "UNNOTION_NUMBERED_LISTS")]
        numbered_lists: bool,
    },

    /// Convert a page to plain text
    Text {
        /// Page object JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Block array or list response JSON file
        #[arg(value_name = "BLOCKS")]
        blocks: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a page to a JSON document
    Json {
        /// Page object JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Block array or list response JSON file
        #[arg(value_name = "BLOCKS")]
        blocks: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show page information
    Info {
        /// Page object JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Block array or list response JSON file
        #[arg(value_name = "BLOCKS")]
        blocks: PathBuf,
    },

    /// Print the slug for a title
    Slug {
        /// Title words
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Markdown {
            page,
            blocks,
            output,
            frontmatter,
            numbered_lists,
        } => cmd_markdown(&page, &blocks, output.as_deref(), frontmatter, numbered_lists),
        Commands::Text {
            page,
            blocks,
            output,
        } => cmd_text(&page, &blocks, output.as_deref()),
        Commands::Json {
            page,
            blocks,
            output,
            compact,
        } => cmd_json(&page, &blocks, output.as_deref(), compact),
        Commands::Info { page, blocks } => cmd_info(&page, &blocks),
        Commands::Slug { text } => {
            println!("{}", slugify(&text.join(" ")));
            Ok(())
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_json(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;
    Ok(value)
}

fn load(page: &Path, blocks: &Path) -> Result<(Page, Vec<Block>), Box<dyn std::error::Error>> {
    let page = parse_page(&read_json(page)?)?;
    let blocks = parse_blocks(&read_json(blocks)?)?;
    log::debug!("Loaded page `{}` with {} top-level blocks", page.id, blocks.len());
    Ok((page, blocks))
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_markdown(
    page: &Path,
    blocks: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    numbered_lists: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (page, blocks) = load(page, blocks)?;

    let options = RenderOptions::new().with_numbered_lists(numbered_lists);
    let doc = DocumentBuilder::with_options(options).build(&page, &blocks);

    write_output(output, &doc.to_markdown(frontmatter))
}

fn cmd_text(
    page: &Path,
    blocks: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, blocks) = load(page, blocks)?;
    let text = to_text(&blocks, &RenderOptions::default());

    write_output(output, &text)
}

fn cmd_json(
    page: &Path,
    blocks: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (page, blocks) = load(page, blocks)?;
    let doc = DocumentBuilder::new().build(&page, &blocks);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_output(output, &to_json(&doc, format)?)
}

fn cmd_info(page_path: &Path, blocks_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (page, blocks) = load(page_path, blocks_path)?;
    let doc = DocumentBuilder::new().build(&page, &blocks);
    let metadata = doc.metadata();

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), page_path.display());
    println!("{}: {}", "ID".bold(), doc.id());
    println!("{}: {}", "Title".bold(), doc.title());
    println!("{}: {}", "Slug".bold(), doc.slug());

    if !metadata.url.is_empty() {
        println!("{}: {}", "URL".bold(), metadata.url);
    }
    if let Some(created) = metadata.created_at() {
        println!("{}: {}", "Created".bold(), created.format("%Y-%m-%d %H:%M"));
    }
    if let Some(edited) = metadata.last_edited_at() {
        println!("{}: {}", "Edited".bold(), edited.format("%Y-%m-%d %H:%M"));
    }

    for (key, value) in metadata.properties.iter() {
        let rendered = match value.as_list() {
            Some(items) => items.join(", "),
            None => value.as_str().unwrap_or_default().to_string(),
        };
        println!("{}: {}", key.bold(), rendered);
    }

    let result = render_blocks_with_stats(&blocks, &RenderOptions::default());
    let stats = &result.stats;

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "To-dos".bold(), stats.todo_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Skipped".bold(), stats.skipped_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unnotion".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Notion page conversion tool");
    println!();
    println!("License: MIT");
}

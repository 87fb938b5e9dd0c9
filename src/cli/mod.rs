//! Command-line interface for shelf.
//!
//! Provides commands for painting a channel into a page, dumping the
//! normalized items, writing a starter page, and showing configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::{load_config, ConfigOverrides, LayoutHints, ShelfConfig, TextHtml, TextWrap};
use crate::core::{HtmlDocument, RunOutcome, ShelfPipeline};

pub mod page;

/// shelf - paint an Are.na channel into an HTML page
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings that override the config file and environment
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Are.na channel slug
    #[arg(short, long, global = true)]
    pub channel: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Blocks requested per page
    #[arg(long, global = true)]
    pub per_page: Option<u32>,

    /// Id of the element the shelf is painted into
    #[arg(long, global = true)]
    pub target_id: Option<String>,

    /// Layout hint scheme
    #[arg(long, value_enum, global = true)]
    pub layout_hints: Option<LayoutHints>,

    /// How text HTML is placed in its block
    #[arg(long, value_enum, global = true)]
    pub text_wrap: Option<TextWrap>,

    /// Sanitization policy for text HTML
    #[arg(long, value_enum, global = true)]
    pub text_html: Option<TextHtml>,
}

impl From<ConfigArgs> for ConfigOverrides {
    fn from(args: ConfigArgs) -> Self {
        Self {
            channel: args.channel,
            api_base: args.api_base,
            per_page: args.per_page,
            target_id: args.target_id,
            layout_hints: args.layout_hints,
            text_wrap: args.text_wrap,
            text_html: args.text_html,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the channel and paint it into a page
    Render {
        /// HTML page containing the target element
        #[arg(short, long, env = "SHELF_PAGE", default_value = "index.html")]
        page: PathBuf,
    },

    /// Print the normalized items as JSON
    Fetch,

    /// Write a starter page with an empty shelf
    Init {
        /// Where to write the page
        #[arg(short, long, default_value = "index.html")]
        page: PathBuf,

        /// Page title
        #[arg(long, default_value = "Shelf")]
        title: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let overrides = ConfigOverrides::from(self.options);
        match self.command {
            Commands::Render { page } => {
                render_page(&page, load_config(overrides)?).await
            }
            Commands::Fetch => {
                fetch_items(load_config(overrides)?).await
            }
            Commands::Init { page, title, force } => {
                init_page(&page, &title, overrides.target_id.as_deref(), force)
            }
            Commands::Config => {
                show_config(load_config(overrides)?)
            }
        }
    }
}

/// Paint the channel into the page and write it back
async fn render_page(page: &Path, config: ShelfConfig) -> Result<()> {
    let mut document = HtmlDocument::load(page)?;
    let pipeline = ShelfPipeline::new(config)?;

    match pipeline.run(&mut document).await {
        RunOutcome::Rendered { items } => {
            document.save(page)?;
            eprintln!("[Rendered {} blocks into {}]", items, page.display());
        }
        RunOutcome::NoSurface => {
            eprintln!(
                "[No #{} element in {}; page left unchanged]",
                pipeline.config().target_id,
                page.display()
            );
        }
        RunOutcome::ChannelUnavailable | RunOutcome::NoBlocks => {
            eprintln!("[Page left unchanged]");
        }
    }

    Ok(())
}

/// Dump normalized items
async fn fetch_items(config: ShelfConfig) -> Result<()> {
    let pipeline = ShelfPipeline::new(config)?;
    let items = pipeline.collect().await.unwrap_or_default();

    let json = serde_json::to_string_pretty(&items).context("Failed to serialize items")?;
    println!("{}", json);
    Ok(())
}

/// Write the starter page
fn init_page(page: &Path, title: &str, target_id: Option<&str>, force: bool) -> Result<()> {
    if page.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite",
            page.display()
        );
    }

    let target_id = target_id.unwrap_or(crate::config::DEFAULT_TARGET_ID);
    std::fs::write(page, self::page::starter_page(title, target_id))
        .with_context(|| format!("Failed to write page: {}", page.display()))?;

    println!("Wrote {}", page.display());
    Ok(())
}

/// Show resolved configuration
fn show_config(config: ShelfConfig) -> Result<()> {
    println!("shelf configuration:");
    println!();
    match &config.config_file {
        Some(path) => println!("  Config file: {}", path.display()),
        None => println!("  Config file: (none found)"),
    }
    println!("  Channel:     {}", config.channel);
    println!("  API base:    {}", config.api_base);
    println!("  Per page:    {}", config.per_page);
    println!("  Target id:   #{}", config.target_id);
    println!();
    println!("Render:");
    println!("  layout_hints: {:?}", config.render.layout_hints);
    println!("  text_wrap:    {:?}", config.render.text_wrap);
    println!("  text_html:    {:?}", config.render.text_html);

    Ok(())
}

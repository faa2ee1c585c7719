//! Chart commands
//!
//! Builds the repository front page and browses the published charts
//! from the terminal.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::{debug, info};

use chartdeck_core::catalog::{ChartRecord, FetchError, IndexFetcher};
use chartdeck_core::config::{IndexSource, SiteConfig};
use chartdeck_core::site::{
    load_charts, render_page, ClipboardService, HtmlPresenter, InstallCommand, Presenter,
    EMPTY_MESSAGE,
};

#[derive(Subcommand, Debug)]
pub enum ChartCommand {
    /// Fetch the index and write the static front page
    Build {
        /// Repository base URL or local site directory (overrides config)
        #[clap(long)]
        source: Option<String>,

        /// Output file (overrides config)
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// List published charts
    List {
        /// Repository base URL or local site directory (overrides config)
        #[clap(long)]
        source: Option<String>,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show the install command for a chart
    Install {
        /// Chart name
        name: String,

        /// Repository base URL or local site directory (overrides config)
        #[clap(long)]
        source: Option<String>,

        /// Copy the command to the clipboard
        #[clap(long)]
        copy: bool,
    },
}

impl ChartCommand {
    pub async fn execute(
        self,
        config: &SiteConfig,
        clipboard: &dyn ClipboardService,
    ) -> Result<()> {
        match self {
            ChartCommand::Build { source, output } => {
                execute_build(config, source.as_deref(), output.as_deref()).await
            }
            ChartCommand::List { source, json } => {
                execute_list(config, source.as_deref(), json).await
            }
            ChartCommand::Install { name, source, copy } => {
                let clipboard = if copy { Some(clipboard) } else { None };
                execute_install(config, &name, source.as_deref(), clipboard).await
            }
        }
    }
}

fn fetcher_for(config: &SiteConfig, source: Option<&str>) -> Result<Box<dyn IndexFetcher>> {
    let location = source.unwrap_or(&config.repository.url);
    IndexSource::from_location(location)
        .fetcher(config.timeout())
        .with_context(|| format!("Invalid repository location: {location}"))
}

/// Presenter for terminal commands: records are consumed by the caller
struct Silent;

impl Presenter for Silent {
    fn render_loading(&mut self) {
        debug!("Loading charts...");
    }
    fn render_records(&mut self, _records: &[ChartRecord]) {}
    fn render_empty(&mut self) {}
    fn render_error(&mut self, _error: &FetchError) {}
}

async fn fetch_records(config: &SiteConfig, source: Option<&str>) -> Result<Vec<ChartRecord>> {
    let fetcher = fetcher_for(config, source)?;
    load_charts(fetcher.as_ref(), &mut Silent)
        .await
        .with_context(|| format!("Failed to load charts from {}", fetcher.location()))
}

async fn execute_build(
    config: &SiteConfig,
    source: Option<&str>,
    output: Option<&Path>,
) -> Result<()> {
    let fetcher = fetcher_for(config, source)?;
    let output = output.unwrap_or(&config.output);

    let mut presenter = HtmlPresenter::new(&config.repository.name);
    let result = load_charts(fetcher.as_ref(), &mut presenter).await;

    let page = render_page(config, presenter.grid());
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(output, page)
        .with_context(|| format!("Failed to write page: {}", output.display()))?;

    let records = result.with_context(|| {
        format!(
            "Failed to load charts from {} (error page written to {})",
            fetcher.location(),
            output.display()
        )
    })?;

    info!("Wrote {} chart(s) to {}", records.len(), output.display());
    if records.is_empty() {
        println!("{EMPTY_MESSAGE}. Wrote {}", output.display());
    } else {
        println!("Wrote {} chart(s) to {}", records.len(), output.display());
    }

    Ok(())
}

/// Table row for chart listings
#[derive(Tabled)]
struct ChartRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "App Version")]
    app_version: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&ChartRecord> for ChartRow {
    fn from(chart: &ChartRecord) -> Self {
        ChartRow {
            name: chart.name.clone(),
            version: chart.version.clone(),
            app_version: chart.app_version.clone(),
            description: truncate(chart.short_description(), 50),
            created: chart
                .created_date()
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Truncate to `max` characters, ending with "..." when shortened
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

async fn execute_list(config: &SiteConfig, source: Option<&str>, json_output: bool) -> Result<()> {
    let records = fetch_records(config, source).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{EMPTY_MESSAGE}");
        return Ok(());
    }

    println!("Found {} chart(s):\n", records.len());

    let rows: Vec<ChartRow> = records.iter().map(ChartRow::from).collect();
    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
    Ok(())
}

async fn execute_install(
    config: &SiteConfig,
    name: &str,
    source: Option<&str>,
    clipboard: Option<&dyn ClipboardService>,
) -> Result<()> {
    let records = fetch_records(config, source).await?;

    if !records.iter().any(|r| r.name == name) {
        anyhow::bail!("Chart '{}' not found in repository", name);
    }

    let install = InstallCommand::new(&config.repository.name, name);

    println!("{}", install.title());
    println!();
    println!("Run this command to install the chart:");
    println!("  {}", install.command);
    println!();
    println!(
        "Make sure you have the {} repository added first.",
        config.repository.name
    );

    if let Some(clipboard) = clipboard {
        install
            .copy_to(clipboard)
            .context("Failed to copy install command")?;
        println!("Copied to clipboard!");
    }

    Ok(())
}

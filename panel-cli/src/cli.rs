use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Select, Text};
use weather_panel_core::{
    Config, ErrorReporter, LogReporter, Outcome, SlotBoard, SlotName, SourceKind, TerminalSink,
    WeatherPresenter, WeatherSource, labels, refresh, source,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-panel", version, about = "Weather panel CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the current weather and print the display slots.
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the slots as a JSON object instead of labeled lines.
        #[arg(long)]
        json: bool,

        /// Print only this slot's text, e.g. "temp" or "uv".
        #[arg(long, conflicts_with = "json")]
        slot: Option<String>,

        /// Text shown in place of missing values.
        #[arg(long)]
        placeholder: Option<String>,
    },

    /// Print every field of the current conditions with its label.
    Table {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Search weatherapi.com for locations matching a query.
    Search {
        /// Partial location name, e.g. "melb".
        query: String,
    },

    /// Interactively set API key, location and default source.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

/// Flags that pick and tune the weather source, overriding the config.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Source short name: "endpoint", "weatherapi" or "file".
    #[arg(long)]
    source: Option<String>,

    /// Endpoint URL serving a weather document.
    #[arg(long)]
    url: Option<String>,

    /// Location query for weatherapi.com.
    #[arg(long)]
    location: Option<String>,

    /// JSON file holding a saved weather document.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl SourceArgs {
    /// Fold the flags into `config` and build the selected source.
    fn build(self, config: &mut Config) -> Result<Box<dyn WeatherSource>> {
        if let Some(url) = self.url {
            config.endpoint.url = url;
        }
        if let Some(location) = self.location {
            config.weatherapi.location = location;
        }

        let kind = match (self.source.as_deref(), &self.file) {
            (Some(name), _) => SourceKind::try_from(name)?,
            (None, Some(_)) => SourceKind::File,
            (None, None) => config.default_source_kind()?,
        };
        if let Some(path) = self.file {
            config.file.path = Some(path);
        }

        tracing::debug!(source = %kind, "using weather source");
        source::source_from_config(kind, config)
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { source, json, slot, placeholder } => {
                let mut config = Config::load()?;
                let slot = slot.as_deref().map(SlotName::try_from).transpose()?;
                let source = source.build(&mut config)?;
                let presenter = WeatherPresenter::with_placeholder(
                    placeholder.unwrap_or_else(|| config.placeholder().to_string()),
                );
                show(source.as_ref(), &presenter, json, slot, &mut io::stdout().lock()).await?;
            }
            Command::Table { source } => {
                let mut config = Config::load()?;
                let source = source.build(&mut config)?;
                table(source.as_ref(), config.placeholder(), &mut io::stdout().lock()).await?;
            }
            Command::Search { query } => {
                let config = Config::load()?;
                search(&config, &query, &mut io::stdout().lock()).await?;
            }
            Command::Configure => configure()?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
        }

        Ok(())
    }
}

async fn show(
    source: &dyn WeatherSource,
    presenter: &WeatherPresenter,
    json: bool,
    slot: Option<SlotName>,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(slot) = slot {
        let mut board = SlotBoard::new();
        refresh(source, presenter, &mut board, &LogReporter).await;
        if let Some(text) = board.get(slot) {
            writeln!(out, "{text}")?;
        }
        return Ok(());
    }

    if json {
        let mut board = SlotBoard::new();
        if let Outcome::Displayed(presentation) =
            refresh(source, presenter, &mut board, &LogReporter).await
        {
            let text = serde_json::to_string_pretty(&presentation)
                .context("Failed to serialize slots to JSON")?;
            writeln!(out, "{text}")?;
        }
        return Ok(());
    }

    let mut sink = TerminalSink::new(out);
    refresh(source, presenter, &mut sink, &LogReporter).await;
    Ok(())
}

async fn table(source: &dyn WeatherSource, placeholder: &str, out: &mut dyn Write) -> Result<()> {
    let doc = match source.fetch().await {
        Ok(doc) => doc,
        Err(err) => {
            LogReporter.report(&err);
            return Ok(());
        }
    };

    if let Some(at) = doc.current.last_updated_at() {
        writeln!(out, "Observed at {}", at.to_rfc3339())?;
    }

    let rows = labels::extended_rows(&doc, placeholder);
    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in rows {
        writeln!(out, "{:<width$}  {}", row.label, row.value)?;
    }
    Ok(())
}

async fn search(config: &Config, query: &str, out: &mut dyn Write) -> Result<()> {
    let api = source::weatherapi_from_config(config)?;

    let hits = api.search(query).await.context("Location search failed")?;
    if hits.is_empty() {
        writeln!(out, "No locations match '{query}'.")?;
    }
    for hit in hits {
        writeln!(out, "{hit}")?;
    }
    Ok(())
}

fn configure() -> Result<()> {
    // Read the file directly so an env override is not persisted.
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let keep = config.weatherapi_key().is_some()
        && Confirm::new("Keep the stored weatherapi.com API key?")
            .with_default(true)
            .prompt()?;
    if !keep {
        let key = Text::new("weatherapi.com API key (leave empty to skip):").prompt()?;
        if !key.trim().is_empty() {
            config.upsert_weatherapi_key(key.trim().to_string());
        }
    }

    let location = config.weatherapi.location.clone();
    config.weatherapi.location =
        Text::new("Default location:").with_default(&location).prompt()?;

    let url = config.endpoint.url.clone();
    config.endpoint.url = Text::new("Weather endpoint URL:").with_default(&url).prompt()?;

    let current = config.default_source_kind().unwrap_or(SourceKind::Endpoint);
    let start = SourceKind::all().iter().position(|k| *k == current).unwrap_or(0);
    let kind = Select::new("Default source:", SourceKind::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;
    config.set_default_source(kind);

    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use meteo_core::{
    Config, DetailView, LocationCandidate, OpenMeteoClient, PanelKind, Workflow,
    client_from_config,
};

use crate::{
    app::{App, prompt},
    render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Open-Meteo dashboard in the terminal")]
pub struct Cli {
    /// Log debug output to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for a location and list every match.
    Search {
        /// Place name, e.g. "London" or "Bergen".
        query: String,
    },

    /// Show one panel's data for a location.
    Show {
        /// Panel name: geocoding, marine, weather, air-quality, radiation,
        /// elevation, flood or climate.
        panel: String,

        /// Place name to search for.
        query: String,

        /// Take the Nth match (1-based) instead of prompting.
        #[arg(long)]
        pick: Option<usize>,

        /// Also print an OpenStreetMap link for the location.
        #[arg(long)]
        map: bool,

        /// First day of the climate projection (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last day of the climate projection (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Interactive dashboard across all panels.
    Browse,

    /// Edit search language, result count and default panel.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load().context("Failed to load configuration")?;

        match self.command {
            Command::Configure => configure(config),
            Command::Search { query } => {
                let client = client_from_config(&config)?;
                search(&client, &query).await
            }
            Command::Show { panel, query, pick, map, start, end } => {
                let panel = PanelKind::try_from(panel.as_str())?;
                if let Some(start) = start {
                    config.climate.start_date = start;
                }
                if let Some(end) = end {
                    config.climate.end_date = end;
                }
                let client = client_from_config(&config)?;
                show(&client, panel, &query, pick, map).await
            }
            Command::Browse => {
                let panel = config.default_panel_kind()?.unwrap_or_default();
                let client = client_from_config(&config)?;
                let climate = client.config().climate.clone();
                App::new(client, climate, panel).run().await
            }
        }
    }
}

async fn search(client: &OpenMeteoClient, query: &str) -> Result<()> {
    let mut workflow: Workflow<LocationCandidate> = Workflow::new();
    if !workflow.submit(client, query).await {
        bail!("Please enter a location to search for");
    }
    if let Some(error) = workflow.error() {
        bail!("{error}");
    }

    let candidates = workflow.candidates();
    println!("{}", render::candidates(candidates));
    for candidate in candidates {
        println!("\n{}", render::detail(&DetailView::for_location(candidate), true));
    }
    Ok(())
}

async fn show(
    client: &OpenMeteoClient,
    panel: PanelKind,
    query: &str,
    pick: Option<usize>,
    map: bool,
) -> Result<()> {
    let mut app = App::new(client.clone(), client.config().climate.clone(), panel);

    if !app.search(query).await {
        bail!("Please enter a location to search for");
    }
    if let Some(error) = app.error() {
        bail!("{error}");
    }

    let candidate = choose(app.candidates(), pick)?;
    app.select(candidate).await;

    let view = app
        .detail_view()
        .ok_or_else(|| anyhow!("No detail was loaded for '{query}'"))?;
    println!("{}", render::detail(&view, map));
    Ok(())
}

/// Pick the Nth candidate, the only one, or ask.
fn choose(candidates: &[LocationCandidate], pick: Option<usize>) -> Result<LocationCandidate> {
    match (pick, candidates) {
        (_, []) => bail!("No locations found. Try a different spelling or a nearby larger place."),
        (Some(n), _) => candidates.get(n.wrapping_sub(1)).cloned().with_context(|| {
            format!("--pick {n} is out of range; there are {} matches", candidates.len())
        }),
        (None, [only]) => Ok(only.clone()),
        (None, _) => prompt(Select::new("Pick a location:", candidates.to_vec()).prompt())?
            .ok_or_else(|| anyhow!("No location picked")),
    }
}

fn configure(mut config: Config) -> Result<()> {
    let Some(language) = prompt(
        Text::new("Language for place names:")
            .with_default(&config.search.language)
            .prompt(),
    )?
    else {
        return Ok(());
    };

    let Some(count) = prompt(
        CustomType::<u8>::new("Number of search results (1-100):")
            .with_default(config.search.count)
            .prompt(),
    )?
    else {
        return Ok(());
    };

    let panels = PanelKind::all();
    let current = config.default_panel_kind()?.unwrap_or_default();
    let cursor = panels.iter().position(|p| *p == current).unwrap_or(0);
    let Some(panel) = prompt(
        Select::new("Default panel:", panels)
            .with_starting_cursor(cursor)
            .prompt(),
    )?
    else {
        return Ok(());
    };

    config.search.language = language.trim().to_string();
    config.search.count = count;
    config.set_default_panel(panel);
    config.validate().context("Configuration not saved")?;
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

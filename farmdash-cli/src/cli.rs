use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use farmdash_core::{
    BuyerDashboard, Config, GeoCoordinate, Identity, IpLocator, Mount, Section, WeatherWidget,
    provider_from_config, store_from_config,
};
use inquire::{Password, Text};
use tracing::{info, warn};

use crate::render::{DashboardScreen, WeatherScreen};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "farmdash", version, about = "Buyer dashboard and weather forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weather API key, the order store credentials and the signed-in buyer.
    Configure,

    /// Show current weather and the 5-day forecast.
    Weather {
        /// Latitude; defaults to the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; defaults to the configured location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Look up the position of this machine instead.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        locate: bool,
    },

    /// Show order statistics for the signed-in buyer.
    Dashboard {
        /// Section to show: "products" or "orders".
        #[arg(default_value = "")]
        section: String,

        /// Buyer id; overrides the configured account.
        #[arg(long)]
        buyer_id: Option<String>,

        /// Display name used with --buyer-id.
        #[arg(long, requires = "buyer_id")]
        name: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Weather { lat, lon, locate } => {
                let coordinate = lat.zip(lon).map(|(lat, lon)| GeoCoordinate::new(lat, lon));
                weather(coordinate, locate).await
            }
            Command::Dashboard {
                section,
                buyer_id,
                name,
            } => {
                let identity = buyer_id.map(|id| Identity {
                    name: name.unwrap_or_else(|| id.clone()),
                    id,
                    email: None,
                });
                dashboard(&section, identity).await
            }
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    Ok(Config::load()?.with_env_overrides())
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key (blank to keep):")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        cfg.weather.api_key = Some(api_key.trim().to_string());
    }

    let current_url = cfg.store.url.clone().unwrap_or_default();
    let url = Text::new("Order store URL:")
        .with_default(&current_url)
        .prompt()
        .context("Failed to read store URL")?;
    cfg.store.url = Some(url.trim().to_string()).filter(|u| !u.is_empty());

    let store_key = Password::new("Order store API key (blank to keep):")
        .without_confirmation()
        .prompt()
        .context("Failed to read store key")?;
    if !store_key.trim().is_empty() {
        cfg.store.api_key = Some(store_key.trim().to_string());
    }

    let current_id = cfg.account.as_ref().map(|a| a.id.clone()).unwrap_or_default();
    let buyer_id = Text::new("Buyer id (blank to sign out):")
        .with_default(&current_id)
        .prompt()
        .context("Failed to read buyer id")?;

    cfg.account = if buyer_id.trim().is_empty() {
        None
    } else {
        let current_name = cfg.account.as_ref().map(|a| a.name.clone()).unwrap_or_default();
        let name = Text::new("Display name:")
            .with_default(&current_name)
            .prompt()
            .context("Failed to read display name")?;
        Some(Identity {
            id: buyer_id.trim().to_string(),
            name: name.trim().to_string(),
            email: None,
        })
    };

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn weather(coordinate: Option<GeoCoordinate>, locate: bool) -> anyhow::Result<()> {
    let cfg = load_config()?;
    if cfg.weather_api_key().is_none() {
        warn!("no OpenWeather API key configured");
    }
    let provider = provider_from_config(&cfg);
    let mut widget = WeatherWidget::new(coordinate.unwrap_or_else(|| cfg.default_coordinate()));

    let granted = if locate {
        widget.use_device_location(&IpLocator::new()).await
    } else {
        None
    };
    let ticket = match granted {
        Some(ticket) => ticket,
        None => widget.mount(),
    };

    let outcome = ticket.run(provider.as_ref()).await;
    widget.apply(outcome);

    print!("{}", WeatherScreen(&widget.view(&Local)));
    Ok(())
}

async fn dashboard(section: &str, identity: Option<Identity>) -> anyhow::Result<()> {
    let cfg = load_config()?;
    let identity = identity.or_else(|| cfg.account.clone());
    if !cfg.is_store_configured() {
        warn!("order store is not configured, orders will be empty");
    }
    let store = store_from_config(&cfg);

    let mut dashboard = BuyerDashboard::new();
    if let Mount::Redirect(to) = dashboard.mount(store.as_ref(), identity.as_ref()).await {
        warn!(to, "no signed-in buyer");
        println!("Not signed in (redirect to {to}). Run `farmdash configure` or pass --buyer-id.");
        return Ok(());
    }

    let Some(identity) = identity.as_ref() else {
        return Ok(());
    };

    let mut view = dashboard.view(identity, section);
    if let Section::Redirect(to) = view.section {
        info!(to, "following default dashboard section");
        view = dashboard.view(identity, to);
    }
    if matches!(view.section, Section::Nothing) {
        warn!(section, "unknown dashboard section");
    }

    print!("{}", DashboardScreen(&view));
    Ok(())
}

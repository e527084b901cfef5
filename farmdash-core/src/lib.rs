//! Core library for the `farmdash` buyer dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client, the order store and position lookup
//! - View state for the weather widget and the buyer dashboard
//!
//! It is used by `farmdash-cli`, but the state containers carry no terminal
//! specifics and can back other front-ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod location;
pub mod model;
pub mod provider;
pub mod resource;
pub mod store;
pub mod weather;

pub use config::{Config, StoreConfig, WeatherConfig};
pub use dashboard::{BuyerDashboard, DashboardView, DerivedStats, Mount, Section};
pub use error::{FetchError, LocationError, StoreError};
pub use location::{FixedLocator, IpLocator, Locator, UnsupportedLocator};
pub use model::{
    CurrentWeather, Forecast, ForecastEntry, GeoCoordinate, Identity, OrderRecord, OrderStatus,
};
pub use provider::{WeatherProvider, provider_from_config};
pub use resource::{LoadState, RemoteResource};
pub use store::{OrderStore, RestOrderStore, store_from_config};
pub use weather::{FetchOutcome, FetchTicket, WeatherPanel, WeatherView, WeatherWidget};

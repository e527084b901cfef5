//! Weather widget: current conditions plus a five-day outlook for one coordinate.
//!
//! Fetching is split into two halves so that results can be matched against
//! the request that produced them:
//!
//! 1. a state transition ([`WeatherWidget::mount`], [`WeatherWidget::set_coordinate`],
//!    a location grant) resets both resources to pending and hands out a
//!    [`FetchTicket`] stamped with a new generation;
//! 2. [`FetchTicket::run`] performs both requests concurrently and the resulting
//!    [`FetchOutcome`] is fed back through [`WeatherWidget::apply`].
//!
//! Outcomes from an older generation are dropped, so the most recently issued
//! request always determines what is shown.
//!
//! Failures are loud: any failed resource turns the whole widget into an error
//! banner.

use chrono::TimeZone;
use tracing::{debug, error, info, warn};

use crate::{
    error::{FetchError, LocationError},
    format,
    location::Locator,
    model::{CurrentWeather, Forecast, ForecastEntry, GeoCoordinate},
    provider::{WeatherProvider, openweather::icon_url},
    resource::RemoteResource,
};

pub const CURRENT_ERROR: &str = "Failed to load weather data. Please try again later.";
pub const FORECAST_ERROR: &str = "Failed to load forecast data. Please try again later.";

/// A request to load both resources for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    coordinate: GeoCoordinate,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }

    /// Issue the current-conditions and forecast requests concurrently.
    pub async fn run<P>(self, provider: &P) -> FetchOutcome
    where
        P: WeatherProvider + ?Sized,
    {
        let (current, forecast) = tokio::join!(
            provider.current_weather(self.coordinate),
            provider.forecast(self.coordinate),
        );

        FetchOutcome {
            generation: self.generation,
            current,
            forecast,
        }
    }
}

/// Settled results of a [`FetchTicket`].
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub current: Result<CurrentWeather, FetchError>,
    pub forecast: Result<Forecast, FetchError>,
}

/// What the widget should display, in precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherView {
    Loading,
    Error(String),
    Empty,
    Populated(WeatherPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPanel {
    pub location_name: String,
    pub icon_url: Option<String>,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    /// `None` while the forecast has not arrived.
    pub forecast: Option<Vec<DaySummary>>,
    pub location_button: &'static str,
    pub advisory: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date: String,
    pub icon_url: Option<String>,
    pub high: String,
    pub low: String,
    pub description: String,
    pub precipitation: String,
}

#[derive(Debug, Clone)]
pub struct WeatherWidget {
    coordinate: GeoCoordinate,
    current: RemoteResource<CurrentWeather>,
    forecast: RemoteResource<Forecast>,
    location_enabled: bool,
    advisory: Option<String>,
    generation: u64,
}

impl Default for WeatherWidget {
    fn default() -> Self {
        Self::new(GeoCoordinate::default())
    }
}

impl WeatherWidget {
    pub fn new(coordinate: GeoCoordinate) -> Self {
        Self {
            coordinate,
            current: RemoteResource::new(),
            forecast: RemoteResource::new(),
            location_enabled: false,
            advisory: None,
            generation: 0,
        }
    }

    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }

    pub fn current(&self) -> &RemoteResource<CurrentWeather> {
        &self.current
    }

    pub fn forecast(&self) -> &RemoteResource<Forecast> {
        &self.forecast
    }

    pub fn location_enabled(&self) -> bool {
        self.location_enabled
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start the initial load.
    pub fn mount(&mut self) -> FetchTicket {
        info!(coordinate = %self.coordinate, "mounting weather widget");
        self.restart()
    }

    /// Replace the trigger coordinate. Returns a ticket only when the value changed.
    pub fn set_coordinate(&mut self, coordinate: GeoCoordinate) -> Option<FetchTicket> {
        if coordinate == self.coordinate {
            return None;
        }

        info!(from = %self.coordinate, to = %coordinate, "weather coordinate changed");
        self.coordinate = coordinate;
        Some(self.restart())
    }

    fn restart(&mut self) -> FetchTicket {
        self.generation += 1;
        self.current.begin();
        self.forecast.begin();

        FetchTicket {
            generation: self.generation,
            coordinate: self.coordinate,
        }
    }

    fn is_stale(&self, generation: u64, what: &str) -> bool {
        if generation == self.generation {
            return false;
        }
        debug!(
            generation,
            latest = self.generation,
            "discarding stale {what} result"
        );
        true
    }

    /// Settle the current-conditions resource. Returns `false` if the result was stale.
    pub fn apply_current(
        &mut self,
        generation: u64,
        result: Result<CurrentWeather, FetchError>,
    ) -> bool {
        if self.is_stale(generation, "weather") {
            return false;
        }

        match result {
            Ok(data) => self.current.resolve(data),
            Err(err) => {
                error!(error = %err, "Error fetching weather data");
                self.current.fail(CURRENT_ERROR);
            }
        }
        true
    }

    /// Settle the forecast resource. Returns `false` if the result was stale.
    pub fn apply_forecast(&mut self, generation: u64, result: Result<Forecast, FetchError>) -> bool {
        if self.is_stale(generation, "forecast") {
            return false;
        }

        match result {
            Ok(data) => self.forecast.resolve(data),
            Err(err) => {
                error!(error = %err, "Error fetching forecast data");
                self.forecast.fail(FORECAST_ERROR);
            }
        }
        true
    }

    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let current = self.apply_current(outcome.generation, outcome.current);
        let forecast = self.apply_forecast(outcome.generation, outcome.forecast);
        current && forecast
    }

    /// Reload both resources for the current coordinate and apply the result.
    pub async fn refresh<P>(&mut self, provider: &P) -> bool
    where
        P: WeatherProvider + ?Sized,
    {
        let ticket = self.restart();
        let outcome = ticket.run(provider).await;
        self.apply(outcome)
    }

    /// Ask the locator for the device position.
    ///
    /// On success the coordinate is replaced and a fresh ticket is returned, even
    /// if the position did not move. On failure the current coordinate and any
    /// loaded data are kept and an advisory is recorded.
    pub async fn use_device_location<L>(&mut self, locator: &L) -> Option<FetchTicket>
    where
        L: Locator + ?Sized,
    {
        match locator.locate().await {
            Ok(coordinate) => Some(self.location_granted(coordinate)),
            Err(err) => {
                self.location_failed(&err);
                None
            }
        }
    }

    pub fn location_granted(&mut self, coordinate: GeoCoordinate) -> FetchTicket {
        info!(%coordinate, "using device location");
        self.coordinate = coordinate;
        self.location_enabled = true;
        self.advisory = None;
        self.restart()
    }

    pub fn location_failed(&mut self, err: &LocationError) {
        warn!(error = %err, "Error getting location");
        self.location_enabled = false;
        self.advisory = Some(err.advisory().to_string());
    }

    pub fn location_button_label(&self) -> &'static str {
        if self.location_enabled {
            "Using Your Location"
        } else {
            "Use My Location"
        }
    }

    pub fn view<Tz>(&self, tz: &Tz) -> WeatherView
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if self.current.is_pending() {
            return WeatherView::Loading;
        }

        if let Some(message) = self.current.error().or(self.forecast.error()) {
            return WeatherView::Error(message.to_string());
        }

        let Some(current) = self.current.data() else {
            return WeatherView::Empty;
        };

        let condition = current.condition();
        let forecast = self.forecast.data().map(|f| {
            format::daily_samples(&f.list)
                .map(|e| day_summary(e, tz))
                .collect::<Vec<_>>()
        });

        WeatherView::Populated(WeatherPanel {
            location_name: current.name.clone(),
            icon_url: condition.map(|c| icon_url(&c.icon)),
            temperature: format::temperature(current.main.temp),
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            humidity: format::humidity(current.main.humidity),
            forecast,
            location_button: self.location_button_label(),
            advisory: self.advisory.clone(),
        })
    }
}

fn day_summary<Tz>(entry: &ForecastEntry, tz: &Tz) -> DaySummary
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let condition = entry.weather.first();
    DaySummary {
        date: format::short_day(entry.dt, tz),
        icon_url: condition.map(|c| icon_url(&c.icon)),
        high: format::temperature(entry.main.temp_max),
        low: format::temperature(entry.main.temp_min),
        description: condition.map(|c| c.description.clone()).unwrap_or_default(),
        precipitation: format::precipitation(entry.pop),
    }
}

//! Plain-text rendering of the core view values.

use std::fmt;

use farmdash_core::{DashboardView, Section, WeatherView, format};

pub struct WeatherScreen<'a>(pub &'a WeatherView);

impl fmt::Display for WeatherScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let panel = match self.0 {
            WeatherView::Loading => return writeln!(f, "Loading weather..."),
            WeatherView::Error(message) => return writeln!(f, "[!] {message}"),
            WeatherView::Empty => return Ok(()),
            WeatherView::Populated(panel) => panel,
        };

        writeln!(f, "Weather Forecast  [{}]", panel.location_button)?;
        if let Some(advisory) = &panel.advisory {
            writeln!(f, "note: {advisory}")?;
        }
        writeln!(f)?;
        writeln!(f, "Current Weather in {}", panel.location_name)?;
        writeln!(f, "  {}  {}", panel.temperature, panel.description)?;
        writeln!(f, "  {}", panel.humidity)?;
        if let Some(icon) = &panel.icon_url {
            writeln!(f, "  icon: {icon}")?;
        }

        if let Some(days) = &panel.forecast {
            writeln!(f)?;
            writeln!(f, "5-Day Forecast")?;
            for day in days {
                writeln!(
                    f,
                    "  {:<12} {:>5} / {:<5} {:<20} {}",
                    day.date, day.high, day.low, day.description, day.precipitation
                )?;
            }
        }

        Ok(())
    }
}

pub struct DashboardScreen<'a>(pub &'a DashboardView<'a>);

impl fmt::Display for DashboardScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "{}", view.greeting)?;
        writeln!(f, "{}", view.tagline)?;
        writeln!(f)?;
        for card in &view.cards {
            writeln!(f, "  {:<16} {}", card.title, card.value)?;
        }
        writeln!(f)?;

        match &view.section {
            Section::Products { buyer } => {
                writeln!(f, "Available Products")?;
                writeln!(f, "  Shopping as {} ({})", buyer.name, buyer.id)?;
            }
            Section::Orders { orders } => {
                writeln!(f, "Order History")?;
                if orders.is_empty() {
                    writeln!(f, "  No orders yet")?;
                }
                for order in orders.iter() {
                    let placed = order
                        .created_at
                        .map(|at| at.format("%Y-%m-%d").to_string())
                        .unwrap_or_default();
                    writeln!(
                        f,
                        "  {:<12} {:<10} {:>10} {}",
                        order.id,
                        order.status,
                        format::rupees(order.total_price),
                        placed
                    )?;
                }
            }
            Section::Redirect(_) | Section::Nothing => {}
        }

        Ok(())
    }
}

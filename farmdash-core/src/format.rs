//! Display helpers shared by the weather widget and the dashboard.

use chrono::{DateTime, TimeZone};

use crate::model::ForecastEntry;

/// The forecast API reports one entry every 3 hours; 8 entries make a day.
pub const ENTRIES_PER_DAY: usize = 8;
pub const FORECAST_DAYS: usize = 5;

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn temperature(celsius: f64) -> String {
    format!("{}°C", round_half_up(celsius))
}

/// `pop` is a probability in `0.0..=1.0`.
pub fn precipitation(pop: f64) -> String {
    format!("{}% rain", round_half_up(pop * 100.0))
}

pub fn humidity(percent: u8) -> String {
    format!("Humidity: {percent}%")
}

pub fn rupees(amount: f64) -> String {
    format!("₹{amount}")
}

/// Short weekday, month and day, e.g. `Tue, Nov 14`.
pub fn short_day<Tz>(timestamp: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(tz).format("%a, %b %-d").to_string(),
        None => String::new(),
    }
}

/// One entry per day: indices 0, 8, 16, 24 and 32 of the 3-hourly series.
pub fn daily_samples(list: &[ForecastEntry]) -> impl Iterator<Item = &ForecastEntry> {
    list.iter().step_by(ENTRIES_PER_DAY).take(FORECAST_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, ForecastMain};
    use chrono::{FixedOffset, Utc};

    fn entry(dt: i64) -> ForecastEntry {
        ForecastEntry {
            dt,
            main: ForecastMain {
                temp_min: 20.0,
                temp_max: 25.0,
                humidity: 50,
            },
            weather: vec![Condition {
                main: "Clear".into(),
                description: "clear sky".into(),
                icon: "01d".into(),
            }],
            pop: 0.0,
        }
    }

    #[test]
    fn temperature_rounds_to_whole_degrees() {
        assert_eq!(temperature(23.4), "23°C");
        assert_eq!(temperature(23.5), "24°C");
        assert_eq!(temperature(-2.5), "-2°C");
        assert_eq!(temperature(-2.6), "-3°C");
    }

    #[test]
    fn precipitation_is_a_rounded_percentage() {
        assert_eq!(precipitation(0.42), "42% rain");
        assert_eq!(precipitation(0.0), "0% rain");
        assert_eq!(precipitation(1.0), "100% rain");
    }

    #[test]
    fn rupees_drops_trailing_zero_fraction() {
        assert_eq!(rupees(350.0), "₹350");
        assert_eq!(rupees(12.5), "₹12.5");
    }

    #[test]
    fn short_day_in_utc() {
        // 2023-11-14T22:13:20Z
        assert_eq!(short_day(1_700_000_000, &Utc), "Tue, Nov 14");
    }

    #[test]
    fn short_day_follows_time_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(short_day(1_700_000_000, &ist), "Wed, Nov 15");
    }

    #[test]
    fn forty_entries_give_five_days() {
        let list: Vec<_> = (0..40).map(|i| entry(i * 10_800)).collect();
        let picked: Vec<i64> = daily_samples(&list).map(|e| e.dt / 10_800).collect();

        assert_eq!(picked, vec![0, 8, 16, 24, 32]);
    }

    #[test]
    fn short_series_yields_fewer_days() {
        let list: Vec<_> = (0..10).map(|i| entry(i * 10_800)).collect();
        assert_eq!(daily_samples(&list).count(), 2);
        assert_eq!(daily_samples(&[]).count(), 0);
    }
}

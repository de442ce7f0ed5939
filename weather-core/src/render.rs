//! Plain-text rendering of the view state.

use std::fmt;

use crate::{
    app::ViewState,
    clock::LocalTime,
    condition::icon_for,
    model::{ForecastDay, WeatherSnapshot},
};

pub fn render(state: &ViewState) -> String {
    Screen(state).to_string()
}

/// `Display` adapter drawing a whole screen.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a>(pub &'a ViewState);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let toggle = if state.dark_mode { "☀️" } else { "🌙" };

        writeln!(f, "[{}]  {toggle}", state.container_class())?;
        writeln!(f, "Weather App")?;
        writeln!(f, "Check the weather anywhere in the world")?;
        writeln!(f)?;

        if state.loading {
            writeln!(f, "Searching...")?;
        }
        if let Some(error) = &state.error {
            writeln!(f, "! {error}")?;
        }

        match &state.snapshot {
            Some(snapshot) => write_card(f, snapshot, state.local_time.as_ref())?,
            None if !state.loading => writeln!(f, "🌍 Search for a city to see the weather")?,
            None => {}
        }

        writeln!(f)?;
        write!(f, "Weather data by Open-Meteo")
    }
}

fn write_card(
    f: &mut fmt::Formatter<'_>,
    snapshot: &WeatherSnapshot,
    local_time: Option<&LocalTime>,
) -> fmt::Result {
    writeln!(f, "{}", snapshot.city)?;
    writeln!(f, "{}", snapshot.country)?;
    if let Some(local) = local_time {
        writeln!(f, "{}  {}", local.time, local.date)?;
    }
    writeln!(f, "{} {}", icon_for(&snapshot.condition), snapshot.condition)?;
    writeln!(f)?;
    writeln!(f, "{}°C", round_half_up(snapshot.current_temperature_c))?;
    writeln!(f, "{:<10}{} km/h", "Wind", snapshot.current_windspeed_kmh)?;
    // Not provided by the forecast endpoint.
    writeln!(f, "{:<10}-", "Humidity")?;
    writeln!(f, "{:<10}-", "Pressure")?;

    if snapshot.daily.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "{}-Day Forecast", snapshot.daily.len())?;
    for day in &snapshot.daily {
        write_day(f, day)?;
    }
    Ok(())
}

fn write_day(f: &mut fmt::Formatter<'_>, day: &ForecastDay) -> fmt::Result {
    let precipitation = match day.precipitation_probability {
        Some(p) => format!("{p}%"),
        None => "-".to_string(),
    };

    writeln!(
        f,
        "{}  {}  {:>4}° {:>4}°  {:>4}",
        day.date.format("%a"),
        icon_for(day.condition()),
        round_half_up(day.max_temp_c),
        round_half_up(day.min_temp_c),
        precipitation,
    )
}

/// Round to the nearest integer, halves toward positive infinity (-2.5 -> -2).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

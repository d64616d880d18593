use std::fmt::Write;

use anyhow::Context;
use weatherapp_core::{WeatherQueryResult, model::icon_url};

/// Human-readable block: location, current conditions, tomorrow.
pub fn text(result: &WeatherQueryResult) -> String {
    let mut out = String::new();
    let location = &result.location;
    let current = &result.current;

    let place = [&location.name, &location.region, &location.country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "{place}");

    let _ = writeln!(
        out,
        "  Now:      {:.1} °C / {:.1} °F, {}  [{}]",
        current.temp_c,
        current.temp_f,
        current.condition.text.trim(),
        icon_url(&current.condition.icon),
    );

    match result.tomorrow() {
        Some(day) => {
            let _ = write!(
                out,
                "  {}: avg {:.1} °C / {:.1} °F, {}  [{}]",
                day.date.format("%a %-d %b"),
                day.day.avg_c,
                day.day.avg_f,
                day.day.condition.text.trim(),
                icon_url(&day.day.condition.icon),
            );
        }
        None => out.push_str("  Tomorrow: no forecast available"),
    }

    out
}

pub fn json(result: &WeatherQueryResult) -> anyhow::Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize weather result")
}

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use weather_dash_core::{
    CurrentConditions, DailyForecast, DashboardState, IconSize, icon_url,
};

/// ANSI palette for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    text: &'static str,
    accent: &'static str,
    muted: &'static str,
    error: &'static str,
}

const RESET: &str = "\x1b[0m";

impl Theme {
    pub const LIGHT: Theme = Theme {
        name: "light",
        text: "\x1b[30m",
        accent: "\x1b[1;33m",
        muted: "\x1b[90m",
        error: "\x1b[1;41;97m",
    };

    pub const DARK: Theme = Theme {
        name: "dark",
        text: "\x1b[97m",
        accent: "\x1b[1;94m",
        muted: "\x1b[37m",
        error: "\x1b[1;41;97m",
    };

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::DARK } else { Self::LIGHT }
    }

    fn paint(code: &str, text: impl Display) -> String {
        format!("{code}{text}{RESET}")
    }
}

/// Render the whole dashboard: error slot, conditions panel, forecast cards.
pub fn render<Tz>(state: &DashboardState, theme: Theme, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();

    if state.loading {
        out.push_str(&line(Theme::paint(theme.muted, "Loading...")));
    }

    if let Some(err) = &state.error {
        out.push_str(&line(Theme::paint(theme.error, format!(" {err} "))));
        out.push('\n');
    }

    if let Some(cc) = &state.conditions {
        out.push_str(&render_conditions(cc, theme, now));
    }

    if !state.forecast.is_empty() {
        out.push('\n');
        for day in &state.forecast {
            out.push_str(&render_day(day, theme));
        }
    }

    out
}

fn line(text: String) -> String {
    format!("{text}\n")
}

fn render_conditions<Tz>(cc: &CurrentConditions, theme: Theme, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    out.push_str(&line(Theme::paint(
        theme.accent,
        format!("{}, {}", cc.name, cc.country),
    )));
    out.push_str(&line(Theme::paint(theme.muted, now.format("%A, %B %-d, %Y"))));
    out.push_str(&line(Theme::paint(
        theme.text,
        capitalize_words(&cc.condition.description),
    )));
    out.push_str(&line(Theme::paint(
        theme.muted,
        icon_url(&cc.condition.icon, IconSize::Large),
    )));

    let rows = [
        ("Temperature", format!("{}°C", round_half_up(cc.temperature_c))),
        ("Feels Like", format!("{}°C", round_half_up(cc.feels_like_c))),
        ("Humidity", format!("{}%", cc.humidity_pct)),
        ("Wind", format!("{} m/s", cc.wind_speed_mps)),
        ("Pressure", format!("{} hPa", cc.pressure_hpa)),
    ];
    for (label, value) in rows {
        out.push_str(&format!(
            "  {} {}\n",
            Theme::paint(theme.text, format!("{label}:")),
            Theme::paint(theme.accent, value)
        ));
    }

    out
}

fn render_day(day: &DailyForecast, theme: Theme) -> String {
    format!(
        "  {} {:<7} {} {}  {}\n",
        Theme::paint(theme.accent, day.date.format("%a")),
        day.date.format("%b %-d").to_string(),
        Theme::paint(
            theme.text,
            format!(
                "{}° / {}°",
                round_half_up(day.temp_max_c),
                round_half_up(day.temp_min_c)
            )
        ),
        Theme::paint(theme.text, capitalize_words(&day.description)),
        Theme::paint(theme.muted, icon_url(&day.icon, IconSize::Small)),
    )
}

/// Round to the nearest integer, halves towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

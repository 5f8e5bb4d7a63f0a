use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Select, Text};
use tracing::debug;
use weather_dash_core::{
    Config, Coordinates, Dashboard, DashboardState, FilePreferences, FixedLocation,
    OpenWeatherProvider, load_dark_mode, provider_from_config, save_dark_mode,
};

use crate::render::{Theme, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to the interactive dashboard.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and defaults.
    Configure,

    /// Show current conditions and the daily forecast for a city.
    Show {
        /// City name; falls back to the configured default city.
        city: Option<String>,
    },

    /// Show weather for the device location.
    Locate {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Switch between light and dark output.
    Theme {
        #[arg(value_enum, default_value_t = ThemeArg::Toggle)]
        mode: ThemeArg,
    },

    /// Interactive dashboard (search, use my location, refresh, theme).
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    UseMyLocation,
    Refresh,
    ToggleDarkMode,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Action::Search => "Search",
            Action::UseMyLocation => "Use My Location",
            Action::Refresh => "Refresh",
            Action::ToggleDarkMode => "Toggle dark mode",
            Action::Quit => "Quit",
        })
    }
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => {
                let config = Config::load()?;
                let city = city.unwrap_or_else(|| config.default_city().to_string());
                let mut dash = open_dashboard(&config, city)?;
                dash.search().await;
                Ok(print_state(dash.state()))
            }
            Some(Command::Locate { lat, lon }) => {
                let config = Config::load()?;
                let from_flags = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                let here = FixedLocation(from_flags.or(config.location));
                let mut dash = open_dashboard(&config, config.default_city().to_string())?;
                dash.use_my_location(&here).await;
                Ok(print_state(dash.state()))
            }
            Some(Command::Theme { mode }) => set_theme(mode),
            Some(Command::Dashboard) | None => interactive().await,
        }
    }
}

fn open_dashboard(config: &Config, city: String) -> Result<Dashboard<OpenWeatherProvider>> {
    let provider = provider_from_config(config)?;
    let prefs = FilePreferences::open_default()?;
    let dark = load_dark_mode(&prefs)?;
    debug!(
        "OpenWeather at {}, preferences in {}, dark mode {dark}",
        config.base_url(),
        prefs.path().display()
    );
    Ok(Dashboard::new(provider, city, dark))
}

fn print_state(state: &DashboardState) -> ExitCode {
    print!("{}", render(state, Theme::for_mode(state.dark_mode), &Local::now()));
    if state.error.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn configure() -> Result<ExitCode> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string()).filter(|c| !c.is_empty());

    let set_location = Confirm::new("Set a fixed position for \"use my location\"?")
        .with_default(config.location.is_some())
        .prompt()
        .context("Failed to read answer")?;
    config.location = if set_location {
        let latitude = CustomType::<f64>::new("Latitude:")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .prompt()
            .context("Failed to read longitude")?;
        Some(Coordinates::new(latitude, longitude))
    } else {
        None
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(ExitCode::SUCCESS)
}

fn set_theme(mode: ThemeArg) -> Result<ExitCode> {
    let mut prefs = FilePreferences::open_default()?;
    let dark = match mode {
        ThemeArg::Light => false,
        ThemeArg::Dark => true,
        ThemeArg::Toggle => !load_dark_mode(&prefs)?,
    };
    save_dark_mode(&mut prefs, dark)?;
    println!("Theme: {}", Theme::for_mode(dark).name);
    Ok(ExitCode::SUCCESS)
}

/// First run without a key goes through `configure` before the dashboard opens.
fn needs_setup(config: &Config) -> bool {
    !config.is_configured()
}

async fn interactive() -> Result<ExitCode> {
    let mut config = Config::load()?;
    if needs_setup(&config) {
        println!("No OpenWeather API key found; running `weather-dash configure` first.");
        configure()?;
        config = Config::load()?;
    }
    let mut prefs = FilePreferences::open_default()?;
    let here = FixedLocation(config.location);
    let mut dash = open_dashboard(&config, config.default_city().to_string())?;

    // Initial load, like opening the page.
    dash.search().await;

    loop {
        print!("\n{}", render(dash.state(), Theme::for_mode(dash.state().dark_mode), &Local::now()));

        let actions = vec![
            Action::Search,
            Action::UseMyLocation,
            Action::Refresh,
            Action::ToggleDarkMode,
            Action::Quit,
        ];
        let action = match Select::new("What next?", actions).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read action"),
        };

        match action {
            Action::Search => {
                let city = match Text::new("City:").with_initial_value(&dash.state().city).prompt() {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err).context("Failed to read city"),
                };
                dash.set_city(city);
                dash.search().await;
            }
            Action::UseMyLocation => {
                dash.use_my_location(&here).await;
            }
            Action::Refresh => {
                dash.refresh().await;
            }
            Action::ToggleDarkMode => {
                dash.toggle_dark_mode(&mut prefs)?;
            }
            Action::Quit => break,
        }
    }

    Ok(ExitCode::SUCCESS)
}

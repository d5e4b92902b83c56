use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{
    BackgroundTheme, Config, Controller, WeatherReport,
    provider::provider_from_config,
    view::{report_heading, report_rows},
    widget::Action,
};

use crate::tui;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London" or "New York".
        city: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive search widget.
    Widget,
}

impl Cli {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(config),
            Command::Show { city, json } => show(&config, city, json).await,
            Command::Widget => {
                let provider = provider_from_config(&config)?;
                tui::run(provider).await
            }
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("API key saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// One-shot lookup through the same flow the widget uses.
async fn show(config: &Config, city: String, json: bool) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let mut controller = Controller::new(provider);

    controller.dispatch(Action::Edit(city));
    controller.dispatch(Action::Search);
    controller.settle().await;

    let state = controller.state();
    if let Some(toast) = state.notifications().latest() {
        bail!(toast.message());
    }

    let report = state
        .report()
        .context("Lookup finished without a report")?;

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_report(report, state.theme()));
    }

    Ok(())
}

fn render_report(report: &WeatherReport, theme: BackgroundTheme) -> String {
    let mut out = format!("{}\n", report_heading(report));
    for (label, value) in report_rows(report) {
        out.push_str(&format!("- {label}: {value}\n"));
    }
    out.push_str(&format!("Background: {theme} ({})\n", theme.image_path()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_city_and_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "New York", "--json"]).unwrap();
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rendered_report_lists_rows_and_background() {
        let report = WeatherReport {
            location_name: "Cairo".into(),
            temperature_c: 30.0,
            feels_like_c: 29.5,
            temp_min_c: 28.0,
            temp_max_c: 31.0,
            humidity_pct: 20,
            sea_level_hpa: None,
            description: "haze".into(),
            observed_at: None,
        };
        let text = render_report(&report, BackgroundTheme::Haze);

        assert!(text.starts_with("Temperature in Cairo\n"));
        assert!(text.contains("- Current Temperature: 30°C\n"));
        assert!(text.contains("- Weather: haze\n"));
        assert!(text.ends_with("Background: haze (/haze.jpg)\n"));
    }
}

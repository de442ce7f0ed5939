use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Text};
use tracing::debug;
use weather_core::{Config, SearchOutcome, WeatherApp, provider_from_config, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and forecast for any city")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for cities until you quit (the default).
    Interactive,

    /// Show weather for a single city.
    Show {
        /// City name, e.g. "Paris" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Render in dark mode.
        #[arg(long)]
        dark: bool,
    },

    /// Edit the persisted settings.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        debug!(?config, "Configuration loaded");

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => interactive(&config).await,
            Command::Show { city, dark } => show(&config, &city.join(" "), dark).await,
            Command::Configure => configure(&mut config),
        }
    }
}

async fn show(config: &Config, city: &str, dark: bool) -> anyhow::Result<()> {
    let app = WeatherApp::new(provider_from_config(config)?);
    app.set_dark_mode(config.dark_mode || dark);

    let outcome = app.search(city).await;
    println!("{}", render(&app.state()));

    match outcome {
        SearchOutcome::Found => Ok(()),
        SearchOutcome::Skipped => bail!("City name must not be empty"),
        SearchOutcome::Failed(err) => Err(err.into()),
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let app = WeatherApp::new(provider_from_config(config)?);
    app.set_dark_mode(config.dark_mode);
    println!("{}", render(&app.state()));

    loop {
        let input = match Text::new("City:")
            .with_placeholder("Enter city name...")
            .with_help_message(":dark toggles dark mode, :q quits")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        match input.trim() {
            ":q" | ":quit" => break,
            ":dark" => {
                app.toggle_dark_mode();
            }
            blank if blank.is_empty() => continue,
            _ => {
                app.set_query(&input);
                println!("Searching...");
                // Failures are already part of the view state.
                let outcome = app.submit().await;
                debug!(outcome = %outcome_summary(&outcome), "Search finished");
            }
        }

        println!("{}", render(&app.state()));
    }

    Ok(())
}

fn outcome_summary(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Found => "found".to_string(),
        SearchOutcome::Skipped => "skipped (blank query)".to_string(),
        SearchOutcome::Failed(err) => format!("failed: {err}"),
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    config.dark_mode = Confirm::new("Start in dark mode?")
        .with_default(config.dark_mode)
        .prompt()
        .context("Failed to read dark mode preference")?;

    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read request timeout")?;

    config.forecast_days = CustomType::<u8>::new("Forecast days (1-16):")
        .with_default(config.forecast_days)
        .with_error_message("Please enter a number between 1 and 16")
        .prompt()
        .context("Failed to read forecast length")?;

    config.geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.geocoding_url)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    config.forecast_url = Text::new("Forecast endpoint:")
        .with_default(&config.forecast_url)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    // Reject unusable endpoints before they are written.
    provider_from_config(config)?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

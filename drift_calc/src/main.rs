pub(crate) mod clock;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod navigation;
pub(crate) mod report;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clock::{ClockReadout, SystemClock};
use config::DriftConfig;
use error::{ApplicationError, ApplicationResult};
use navigation::NavTab;
use report::{DriftReport, open_html_report};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};
use wind_triangle::{solver::WindTriangleInput, wind_group::find_wind_group};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Direction the wind blows from, degrees true
    #[clap(long, short = 'd', allow_negative_numbers = true)]
    wind_direction: Option<f64>,
    /// Wind speed in knots
    #[clap(long, short = 's', allow_negative_numbers = true)]
    wind_speed: Option<f64>,
    /// Desired ground track, degrees true
    #[clap(
        long,
        short = 'c',
        allow_negative_numbers = true,
        required_unless_present = "print_config"
    )]
    true_course: Option<f64>,
    /// True airspeed in knots, defaults to `default_true_airspeed` from the config
    #[clap(long, short = 't', allow_negative_numbers = true)]
    true_airspeed: Option<f64>,
    /// Take the wind from a METAR (or a bare wind group like 27015G25KT)
    #[clap(long, short = 'm', conflicts_with_all = ["wind_direction", "wind_speed"])]
    metar: Option<String>,
    /// Correct for the gust instead of the mean wind when the METAR reports one
    #[clap(long, requires = "metar")]
    use_gust: bool,
    #[clap(long, short = 'f', value_enum, default_value_t)]
    format: OutputFormat,
    /// Config file to use instead of the one in the user config directory
    #[clap(long)]
    config: Option<PathBuf>,
    /// Print the effective configuration and exit
    #[clap(long)]
    print_config: bool,
    /// Leave out the clock and tab bar
    #[clap(long)]
    no_header: bool,
    /// Page path the tab bar marks as active
    #[clap(long, default_value = NavTab::DriftCalc.route())]
    page: String,
}

impl Cli {
    fn wind_triangle_input(&self, config: &DriftConfig) -> ApplicationResult<WindTriangleInput> {
        let (wind_direction, wind_speed) = match &self.metar {
            Some(metar) => {
                let wind = find_wind_group(metar)?;
                debug!(?wind, "Wind group from METAR");
                wind.solver_wind(self.use_gust)?
            }
            None => (
                self.wind_direction
                    .ok_or(ApplicationError::MissingInput("--wind-direction or --metar"))?,
                self.wind_speed
                    .ok_or(ApplicationError::MissingInput("--wind-speed or --metar"))?,
            ),
        };
        let true_course = self
            .true_course
            .ok_or(ApplicationError::MissingInput("--true-course"))?;
        let true_airspeed = self
            .true_airspeed
            .or(config.default_true_airspeed())
            .ok_or(ApplicationError::MissingInput(
                "--true-airspeed or default_true_airspeed in the config",
            ))?;
        Ok(WindTriangleInput::new(
            wind_direction,
            wind_speed,
            true_course,
            true_airspeed,
        ))
    }
}

fn run(cli: Cli) -> ApplicationResult<()> {
    let config = DriftConfig::load(cli.config.as_deref())?;
    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let input = cli.wind_triangle_input(&config)?;
    let result = input.solve()?;
    info!(?input, ?result, "Wind triangle solved");

    let clock = (config.show_header() && !cli.no_header)
        .then(|| ClockReadout::read(&SystemClock, &config.local_time_zone()));
    let report = DriftReport {
        clock,
        local_time_zone: config.local_time_zone_name().to_string(),
        page: cli.page.clone(),
        metar: cli.metar.clone(),
        input,
        result,
    };

    match cli.format {
        OutputFormat::Text => println!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
        OutputFormat::Html => open_html_report(&report.render_html()?)?,
    }
    Ok(())
}

fn main() -> ApplicationResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
    run(Cli::parse())
}

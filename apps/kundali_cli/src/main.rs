use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use kundali::chart::{assemble_sweep, grid};
use kundali::{ChartAssembler, ChartSettings, Location, Moment};

#[derive(Parser, Debug)]
#[command(name = "kundali", author, version, about = "Sidereal chart casting")]
struct Args {
    /// Settings file (defaults to configs/kundali.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ayanamsa name, overrides the settings file
    #[arg(long, global = true)]
    ayanamsa: Option<String>,

    /// House system name, overrides the settings file
    #[arg(long, global = true)]
    house_system: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cast one chart and print it as JSON
    Chart {
        /// RFC 3339 date and time, e.g. 1990-05-15T06:30:00+05:30
        #[arg(long)]
        datetime: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        pretty: bool,
    },
    /// Cast a chart at every point of a latitude/longitude grid, one JSON line each
    Sweep {
        #[arg(long)]
        datetime: String,
        #[arg(long, allow_negative_numbers = true, default_value_t = -60.0)]
        lat_min: f64,
        #[arg(long, allow_negative_numbers = true, default_value_t = 60.0)]
        lat_max: f64,
        #[arg(long, allow_negative_numbers = true, default_value_t = -180.0)]
        lon_min: f64,
        #[arg(long, allow_negative_numbers = true, default_value_t = 180.0)]
        lon_max: f64,
        #[arg(long, default_value_t = 10.0)]
        step: f64,
    },
}

fn load_settings(args: &Args) -> anyhow::Result<ChartSettings> {
    let mut settings = match &args.config {
        Some(path) => ChartSettings::load(path)?,
        None => ChartSettings::load_default()?,
    };
    if let Some(name) = &args.ayanamsa {
        settings.ayanamsa = name.parse()?;
    }
    if let Some(name) = &args.house_system {
        settings.house_system = name.parse()?;
    }
    settings.validate()?;
    Ok(settings)
}

fn parse_moment(datetime: &str) -> anyhow::Result<Moment> {
    let dt = DateTime::parse_from_rfc3339(datetime)
        .with_context(|| format!("expected an RFC 3339 datetime, got {datetime:?}"))?;
    Ok(Moment::from_datetime(&dt))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = load_settings(&args)?;
    log::debug!("Using settings {:?}", settings);
    let assembler = ChartAssembler::from_settings(&settings);

    match args.command {
        Command::Chart {
            ref datetime,
            lat,
            lon,
            pretty,
        } => {
            let moment = parse_moment(datetime)?;
            let location = Location::new(lat, lon)?;
            let chart = assembler.assemble(&moment, &location)?;
            println!("{}", chart.to_json(pretty)?);
        }
        Command::Sweep {
            ref datetime,
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            step,
        } => {
            let moment = parse_moment(datetime)?;
            let locations = grid(lat_min, lat_max, lon_min, lon_max, step)?;
            log::info!("Sweeping {} locations", locations.len());

            let results = assemble_sweep(Arc::new(assembler), moment, locations.clone()).await?;
            for (location, result) in locations.iter().zip(results) {
                let line = match result {
                    Ok(chart) => json!({
                        "latitude": location.latitude,
                        "longitude": location.longitude,
                        "ascendant": chart.ascendant,
                        "rashi": chart.ascendant_rashi(),
                    }),
                    Err(e) => json!({
                        "latitude": location.latitude,
                        "longitude": location.longitude,
                        "error": e.to_string(),
                    }),
                };
                println!("{line}");
            }
        }
    }
    Ok(())
}

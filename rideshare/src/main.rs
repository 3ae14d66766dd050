use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::error;

use rideshare::config::{AppConfig, DEFAULT_LOG_FILTER};
use rideshare::dispatch::{DispatchError, Dispatcher};
use rideshare::domain::{Driver, Passenger, Trip};
use rideshare::records::{LoadError, load_directory};

#[derive(Parser)]
#[command(
    name = "rideshare",
    about = "Ride-share trip dispatcher",
    long_about = "Loads passengers, drivers and trips from a CSV data directory\n\
                  and dispatches new trips to the longest-idle available driver."
)]
struct Cli {
    /// Directory with passengers.csv, drivers.csv and trips.csv
    /// [default: $RIDESHARE_DATA_DIR or ./support]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show collection sizes and available drivers
    Summary,
    /// Show a passenger with their spending and riding time
    Passenger {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Show a driver with their rating and revenue
    Driver {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Request a trip for a passenger
    Request {
        #[arg(allow_negative_numbers = true)]
        passenger_id: i64,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Summary<'a> {
    passengers: usize,
    drivers: usize,
    trips: usize,
    in_progress: usize,
    available_drivers: Vec<&'a Driver>,
}

#[derive(Serialize)]
struct PassengerView<'a> {
    passenger: &'a Passenger,
    net_expenditures: Option<f64>,
    total_time_spent_secs: Option<i64>,
    trips: Vec<&'a Trip>,
}

#[derive(Serialize)]
struct DriverView<'a> {
    driver: &'a Driver,
    average_rating: Option<f64>,
    total_revenue: f64,
    trips: Vec<&'a Trip>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.data_dir {
        Some(dir) => AppConfig::from_env().with_data_dir(dir),
        None => AppConfig::from_env(),
    };

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn run(cli: &Cli, config: &AppConfig) -> Result<(), CliError> {
    let mut dispatcher = load_directory(&config.data_dir)?;

    match cli.command {
        Command::Summary => print_summary(&dispatcher, cli.json),
        Command::Passenger { id } => print_passenger(&dispatcher, id, cli.json),
        Command::Driver { id } => print_driver(&dispatcher, id, cli.json),
        Command::Request { passenger_id } => {
            let trip = dispatcher.request_trip(passenger_id)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&trip)?);
            } else {
                let driver = dispatcher.find_driver(trip.driver().get().into())?;
                println!(
                    "Trip {} for passenger {}: driver {} ({}, {}) starting {}",
                    trip.id(),
                    trip.passenger(),
                    driver.id(),
                    driver.name(),
                    driver.vin(),
                    trip.start_time().format("%Y-%m-%d %H:%M:%S UTC"),
                );
            }
            Ok(())
        }
    }
}

fn print_summary(dispatcher: &Dispatcher, json: bool) -> Result<(), CliError> {
    let summary = Summary {
        passengers: dispatcher.passengers().len(),
        drivers: dispatcher.drivers().len(),
        trips: dispatcher.trips().len(),
        in_progress: dispatcher
            .trips()
            .iter()
            .filter(|t| t.is_in_progress())
            .count(),
        available_drivers: dispatcher.available_drivers().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Passengers: {}", summary.passengers);
    println!("Drivers:    {}", summary.drivers);
    println!(
        "Trips:      {} ({} in progress)",
        summary.trips, summary.in_progress
    );
    println!();
    println!("Available drivers:");
    if summary.available_drivers.is_empty() {
        println!("  (none)");
    }
    for driver in &summary.available_drivers {
        println!("  {:>4}  {}", driver.id(), driver.name());
    }
    Ok(())
}

fn print_passenger(dispatcher: &Dispatcher, id: i64, json: bool) -> Result<(), CliError> {
    let passenger = dispatcher.find_passenger(id)?;
    let view = PassengerView {
        passenger,
        net_expenditures: passenger.net_expenditures(dispatcher),
        total_time_spent_secs: passenger.total_time_spent(dispatcher),
        trips: passenger.resolve_trips(dispatcher).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Passenger {}: {}", passenger.id(), passenger.name());
    println!("  Phone:        {}", passenger.phone_number());
    println!("  Trips:        {}", view.trips.len());
    match view.net_expenditures {
        Some(total) => println!("  Spent:        ${total:.2}"),
        None => println!("  Spent:        -"),
    }
    match view.total_time_spent_secs {
        Some(secs) => println!("  Time riding:  {}m {}s", secs / 60, secs % 60),
        None => println!("  Time riding:  -"),
    }
    print_trips(&view.trips);
    Ok(())
}

fn print_driver(dispatcher: &Dispatcher, id: i64, json: bool) -> Result<(), CliError> {
    let driver = dispatcher.find_driver(id)?;
    let view = DriverView {
        driver,
        average_rating: driver.average_rating(dispatcher),
        total_revenue: driver.total_revenue(dispatcher),
        trips: driver.resolve_trips(dispatcher).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("Driver {}: {}", driver.id(), driver.name());
    println!("  VIN:          {}", driver.vin());
    println!("  Status:       {}", driver.status());
    println!("  Trips:        {}", view.trips.len());
    match view.average_rating {
        Some(rating) => println!("  Rating:       {rating:.1}"),
        None => println!("  Rating:       -"),
    }
    println!("  Revenue:      ${:.2}", view.total_revenue);
    print_trips(&view.trips);
    Ok(())
}

fn print_trips(trips: &[&Trip]) {
    for trip in trips {
        let end = trip
            .end_time()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "in progress".to_string());
        let cost = trip
            .cost()
            .map(|c| format!("${c:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "    #{:<5} {} -> {:<16} {:>9}",
            trip.id(),
            trip.start_time().format("%Y-%m-%d %H:%M"),
            end,
            cost,
        );
    }
}

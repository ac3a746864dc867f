use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod generate;
mod report;

#[derive(Parser)]
#[command(name = "dispatch", about = "Ride-share network reports and dispatching")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print network-wide totals.
    Summary {
        /// Directory containing drivers.csv, passengers.csv, trips.csv.
        #[arg(long)]
        data_dir: PathBuf,
        /// Emit JSON instead of a text report.
        #[arg(long)]
        json: bool,
    },
    /// Per-driver earnings and ratings.
    Drivers {
        #[arg(long)]
        data_dir: PathBuf,
    },
    /// Per-passenger spend and ride time.
    Passengers {
        #[arg(long)]
        data_dir: PathBuf,
    },
    /// Request one or more trips for a passenger.
    Request {
        #[arg(long)]
        data_dir: PathBuf,
        #[arg(long)]
        passenger_id: u64,
        /// Number of trips to request.
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Write seeded synthetic fixture CSVs.
    Generate {
        /// Output directory (created if missing).
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 20)]
        drivers: usize,
        #[arg(long, default_value_t = 40)]
        passengers: usize,
        #[arg(long, default_value_t = 120)]
        trips: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Summary { data_dir, json } => report::summary(&data_dir, json),
        Command::Drivers { data_dir } => report::drivers(&data_dir),
        Command::Passengers { data_dir } => report::passengers(&data_dir),
        Command::Request {
            data_dir,
            passenger_id,
            count,
        } => report::request(&data_dir, passenger_id, count),
        Command::Generate {
            out,
            drivers,
            passengers,
            trips,
            seed,
        } => generate::generate(&out, drivers, passengers, trips, seed),
    }
}

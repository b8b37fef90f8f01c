use std::error::Error;

use clap::Parser;
use rusqlite::Connection;
use time::Date;
use tracing_subscriber::EnvFilter;

use realtime_dashboard::{
    initialize_db,
    report::{JoinDateRange, Report, parse_date, render_output},
    reset_and_seed,
};

/// Seed the database with sample data and print every report.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. It is created if it does not exist.
    #[arg(long, default_value = "example.db")]
    db_path: String,

    /// The earliest join date to include in the users by join date report.
    #[arg(long, default_value = "2022-01-01", value_parser = parse_date_arg)]
    start: Date,

    /// The latest join date to include in the users by join date report.
    #[arg(long, default_value = "2022-05-01", value_parser = parse_date_arg)]
    end: Date,
}

/// The printed reports, in order.
const REPORTS: [Report; 6] = [
    Report::UsersByJoinDate,
    Report::TotalSpentPerUser,
    Report::UserReport,
    Report::TopUsers,
    Report::AverageTransaction,
    Report::NoTransactions,
];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;
    reset_and_seed(&conn)?;

    let join_dates = JoinDateRange::new(args.start, args.end);

    for (index, report) in REPORTS.into_iter().enumerate() {
        if index > 0 {
            println!();
        }

        let output = report.run(join_dates, &conn)?;
        println!("{}:", report.title());
        println!("{}", render_output(&output));
    }

    Ok(())
}

fn parse_date_arg(text: &str) -> Result<Date, String> {
    parse_date(text).map_err(|error| error.to_string())
}

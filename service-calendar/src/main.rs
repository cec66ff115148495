use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use service_calendar::feed::{LoadConfig, load_feed};
use service_calendar::filter::HourWindow;

/// Read an hour bound from the environment, warning on junk values.
fn hour_from_env(name: &str) -> Option<u32> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(hour) => Some(hour),
        Err(_) => {
            eprintln!("Warning: ignoring {name}={value:?}, expected a whole number of hours");
            None
        }
    }
}

fn main() -> ExitCode {
    // Logging, filtered by RUST_LOG (default: info)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Ok(feed_dir) = std::env::var("FEED_DIR") else {
        eprintln!("Error: FEED_DIR not set. Point it at an unpacked feed directory.");
        return ExitCode::FAILURE;
    };
    let json_output = std::env::var("OUTPUT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    // Hour window is only applied if at least one bound is given
    let start_hour = hour_from_env("START_HOUR");
    let end_hour = hour_from_env("END_HOUR");
    let window = (start_hour.is_some() || end_hour.is_some()).then(|| {
        let default = HourWindow::default();
        HourWindow::new(
            start_hour.unwrap_or(default.start_hour),
            end_hour.unwrap_or(default.end_hour),
        )
    });

    let config = LoadConfig::new(&feed_dir);
    let feed = match load_feed(&config) {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("Error: failed to load feed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (feed, observations) = feed.parse_times().resolve_service_dates();
    for observation in &observations {
        eprintln!("Note: {observation}");
    }

    let Some(table) = feed.date_service_table() else {
        eprintln!("Error: feed has no date-service table after resolution");
        return ExitCode::FAILURE;
    };

    if json_output {
        match serde_json::to_string_pretty(table.by_date()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialise table: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("Feed: {feed_dir}");
        println!("  Calendar entries:    {}", feed.calendar().len());
        println!(
            "  Calendar exceptions: {}",
            feed.calendar_dates().map_or(0, |c| c.len())
        );
        println!("  Stop times:          {}", feed.stop_times().len());
        println!();
        println!("Date-service table: {} rows", table.len());
        if let Some((first, last)) = table.date_range() {
            println!("  Service dates: {first} to {last}");
        }
        if let Some((date, count)) = table.busiest_date() {
            println!("  Busiest date:  {date} ({count} services)");
        }
    }

    if let Some(window) = window {
        match feed.stop_times_in_hours(&window) {
            Ok(rows) => eprintln!(
                "Stop times strictly between {}h and {}h: {}",
                window.start_hour,
                window.end_hour,
                rows.len()
            ),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

//! Prints the merged query window a month-grid view needs for `(year, month)`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use almanac_core::config::load_config;
use almanac_service::calendar::grid::{month_grid, overall_range};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(year), Some(month)) = (args.next(), args.next()) else {
        eprintln!("usage: month_window <year> <month>");
        std::process::exit(2);
    };
    let year: i32 = year.parse()?;
    let month: u32 = month.parse()?;

    let config = load_config()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(config.logging.level.as_str())
            .unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(fmt::layer().with_target(true))
        .init();

    let tz = config.calendar.timezone()?;
    let week_start = config.calendar.week_start()?;

    let (grid_start, grid_end) = month_grid(year, month, week_start, tz)?;
    let (window_start, window_end) = overall_range(year, month, week_start, tz)?;

    println!("grid:   {grid_start} .. {grid_end}");
    println!("window: {window_start} .. {window_end}");

    Ok(())
}

// main.rs - Desktop shell for the Game of Life simulation

use std::error::Error;
use std::fmt::Display;
use std::process::exit;
use std::str::FromStr;

use clap::{App, Arg, ArgMatches};

use conway_life::{Config, Simulation, StartGrid};

mod ui;

use ui::LifeApp;

fn main() {
    env_logger::init();
    exit(match inner_main() {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("{}", err);
            1
        }
    })
}

fn inner_main() -> Result<(), Box<dyn Error>> {
    let matches = cli().get_matches();
    let config = config_from(&matches)?;
    log::info!(
        "{}x{} grid, {} ms per generation, {:?} start",
        config.dimensions.rows,
        config.dimensions.cols,
        config.step_delay.as_millis(),
        config.start
    );

    // One worker: the step task is the only thing scheduled on it
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("life-steps")
        .enable_time()
        .build()?;
    let simulation = Simulation::new(runtime.handle().clone(), &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(ui::window_size(&config)),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(simulation, runtime, &config))),
    )?;
    Ok(())
}

fn cli<'a, 'b>() -> App<'a, 'b> {
    App::new("Game of Life")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Conway's Game of Life on a bounded grid")
        .arg(
            Arg::with_name("rows")
                .short("r")
                .long("rows")
                .default_value("50")
                .help("Number of grid rows"),
        )
        .arg(
            Arg::with_name("cols")
                .short("c")
                .long("cols")
                .default_value("100")
                .help("Number of grid columns"),
        )
        .arg(
            Arg::with_name("delay-ms")
                .short("d")
                .long("delay-ms")
                .default_value("250")
                .help("Milliseconds between generations while running"),
        )
        .arg(
            Arg::with_name("start")
                .short("s")
                .long("start")
                .possible_values(&["random", "empty"])
                .default_value("random")
                .help("Initial grid"),
        )
        .arg(
            Arg::with_name("cell-size")
                .long("cell-size")
                .default_value("15")
                .help("Side of one cell on screen, in points"),
        )
}

fn config_from(matches: &ArgMatches<'_>) -> Result<Config, Box<dyn Error>> {
    let cell_size: f32 = get_value("cell-size", matches)?;
    if !(cell_size > 0.0) {
        return Err(format!("cell-size should be a positive number, got {}", cell_size).into());
    }

    let config = Config::new(
        get_value("rows", matches)?,
        get_value("cols", matches)?,
        get_value("delay-ms", matches)?,
    )?
    .with_start(get_value::<StartGrid>("start", matches)?)
    .with_cell_size(cell_size);
    Ok(config)
}

fn get_value<A>(name: &str, matches: &ArgMatches<'_>) -> Result<A, Box<dyn Error>>
where
    A: FromStr,
    <A as FromStr>::Err: Display,
{
    let raw = matches
        .value_of(name)
        .ok_or_else(|| format!("missing value for --{}", name))?;
    raw.parse::<A>()
        .map_err(|err| format!("invalid --{} {:?}: {}", name, raw, err).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use conway_life::Dimensions;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Result<Config, Box<dyn Error>> {
        let matches = cli().get_matches_from_safe(std::iter::once("conway-life").chain(args.iter().copied()))?;
        config_from(&matches)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.dimensions, Dimensions { rows: 50, cols: 100 });
        assert_eq!(config.step_delay, Duration::from_millis(250));
        assert_eq!(config.start, StartGrid::Random);
        assert_eq!(config.cell_size, 15.0);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&["--rows", "8", "-c", "12", "--delay-ms", "100", "--start", "empty"]).unwrap();
        assert_eq!(config.dimensions, Dimensions { rows: 8, cols: 12 });
        assert_eq!(config.step_delay, Duration::from_millis(100));
        assert_eq!(config.start, StartGrid::Empty);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["--rows", "0"]).is_err());
        assert!(parse(&["--cols", "many"]).is_err());
        assert!(parse(&["--rows", "100000", "--cols", "100000"]).is_err());
        assert!(parse(&["--delay-ms", "0"]).is_err());
        assert!(parse(&["--start", "glider"]).is_err());
        assert!(parse(&["--cell-size", "-3"]).is_err());
    }
}

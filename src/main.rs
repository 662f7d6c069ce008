//! Delvegrid - Entry Point
//!
//! Generates one dungeon into an in-memory spawner and prints it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use delvegrid::config::DungeonConfig;
use delvegrid::interior::FurniturePlacement;
use delvegrid::{DungeonGenerator, DungeonLayout, GenerationReport, InstanceArena};

/// What `--json` writes out
#[derive(Serialize)]
struct Export<'a> {
    report: &'a GenerationReport,
    layout: &'a DungeonLayout,
    furniture: &'a [FurniturePlacement],
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = matches();

    if let Some(path) = matches.value_of("export_config") {
        DungeonConfig::default()
            .export(path)
            .with_context(|| format!("exporting default config to {}", path))?;
        println!("Wrote default config to {}", path);
        return Ok(());
    }

    let mut config = match matches.value_of("config") {
        Some(path) => DungeonConfig::load(path)?,
        None => DungeonConfig::load_or_default("assets/dungeon.ron"),
    };
    if let Some(seed) = parse_arg::<u64>(&matches, "seed")? {
        config.seed = Some(seed);
    }
    if let Some(width) = parse_arg::<i32>(&matches, "width")? {
        config.layout.width = width;
    }
    if let Some(height) = parse_arg::<i32>(&matches, "height")? {
        config.layout.height = height;
    }

    log::info!("Starting Delvegrid v{}", env!("CARGO_PKG_VERSION"));

    let arena = InstanceArena::for_config(&config);
    let mut generator = DungeonGenerator::new(config, arena)?;
    let report = generator.generate()?;
    let layout = generator
        .layout()
        .context("generator finished without a layout")?;

    if !matches.is_present("no_map") {
        print!("{}", layout.grid.render_ascii());
    }
    print_summary(&report);

    if let Some(path) = matches.value_of("json") {
        let export = Export {
            report: &report,
            layout,
            furniture: &generator.furnishing().placements,
        };
        write_json(Path::new(path), &export)?;
        println!("Wrote layout to {}", path);
    }

    Ok(())
}

fn print_summary(report: &GenerationReport) {
    println!("Seed:      {}", report.seed);
    println!("Rooms:     {}", report.rooms);
    println!("Corridors: {}", report.corridors);
    println!(
        "Spawned:   {} walls, {} corners, {} corridor pieces, {} furniture",
        report.walls, report.corners, report.corridor_pieces, report.furniture
    );
    for shortfall in &report.shortfalls {
        println!(
            "  room {}: placed {}/{} '{}'",
            shortfall.room, shortfall.placed, shortfall.requested, shortfall.archetype
        );
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing layout")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn parse_arg<T>(matches: &clap::ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|value| {
            value
                .parse::<T>()
                .with_context(|| format!("invalid value for --{}: {}", name, value))
        })
        .transpose()
}

fn matches() -> clap::ArgMatches<'static> {
    clap::App::new("delvegrid - BSP dungeon layout generator.")
        .set_term_width(80)
        .version(clap::crate_version!())
        .arg(
            clap::Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("RON config file. Uses assets/dungeon.ron or built-in defaults if not provided.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("N")
                .help("Random seed. Overrides the config file.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("width")
                .short("W")
                .long("width")
                .value_name("CELLS")
                .help("Dungeon width in cells.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("height")
                .short("H")
                .long("height")
                .value_name("CELLS")
                .help("Dungeon height in cells.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("json")
                .short("j")
                .long("json")
                .value_name("FILE")
                .help("Write layout, furniture and report as JSON.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("export_config")
                .long("export-config")
                .value_name("FILE")
                .help("Write the default config as RON and exit.")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("no_map")
                .long("no-map")
                .help("Do not print the ASCII map."),
        )
        .get_matches()
}

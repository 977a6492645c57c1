//! Seeded cave generator
//!
//! Command-line front end for cave-core: builds a config from defaults, an
//! optional config file and flags, generates one cave and prints it.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use cave_core::{CaveConfig, CaveMap, Grid, MapSink, generate_cave};

/// Seeded cave generator
#[derive(Parser, Debug)]
#[command(name = "cavegen")]
#[command(author, version, about = "Generate a connected cave map from a seed", long_about = None)]
struct Args {
    /// Map width in tiles
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Map height in tiles
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Seed text (all-digit text is used as a number)
    #[arg(short = 's', long = "seed")]
    seed: Option<String>,

    /// Derive the seed from the current time
    #[arg(short = 'r', long = "random-seed")]
    random_seed: bool,

    /// Initial wall chance in percent (0-100)
    #[arg(short = 'f', long = "fill")]
    fill: Option<u32>,

    /// Number of smoothing passes
    #[arg(short = 'i', long = "smooth")]
    smooth: Option<u32>,

    /// Wall regions smaller than this become open
    #[arg(long = "wall-threshold")]
    wall_threshold: Option<usize>,

    /// Open regions smaller than this become wall
    #[arg(long = "room-threshold")]
    room_threshold: Option<usize>,

    /// Skip region filtering and connectivity repair
    #[arg(long = "no-regions")]
    no_regions: bool,

    /// Radius of carved passages
    #[arg(long = "passage-radius")]
    passage_radius: Option<u32>,

    /// Config file (JSON or cavegenrc)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the whole map as JSON
    #[arg(long = "json")]
    json: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    /// Overlay command-line flags on a base config
    fn apply_to(&self, config: &mut CaveConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = &self.seed {
            config.seed = seed.clone();
            config.use_random_seed = false;
        }
        if self.random_seed {
            config.use_random_seed = true;
        }
        if let Some(fill) = self.fill {
            config.fill_percent = fill;
        }
        if let Some(smooth) = self.smooth {
            config.smooth_iterations = smooth;
        }
        if let Some(threshold) = self.wall_threshold {
            config.wall_threshold = threshold;
        }
        if let Some(threshold) = self.room_threshold {
            config.room_threshold = threshold;
        }
        if self.no_regions {
            config.process_regions = false;
        }
        if let Some(radius) = self.passage_radius {
            config.passage_radius = radius;
        }
    }

    fn build_config(&self) -> Result<CaveConfig> {
        let mut config = match &self.config {
            Some(path) => CaveConfig::load_from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => CaveConfig::default(),
        };
        self.apply_to(&mut config);
        Ok(config)
    }
}

/// Writes the finished grid as ASCII rows
struct AsciiSink<W: Write> {
    out: W,
    result: io::Result<()>,
}

impl<W: Write> AsciiSink<W> {
    fn new(out: W) -> Self {
        Self { out, result: Ok(()) }
    }

    fn finish(self) -> io::Result<()> {
        self.result
    }
}

impl<W: Write> MapSink for AsciiSink<W> {
    fn receive(&mut self, grid: &Grid, border_size: usize) {
        if self.result.is_err() {
            return;
        }
        log::debug!("printing {}x{} grid, border {}", grid.width(), grid.height(), border_size);
        self.result = writeln!(self.out, "{}", grid);
    }
}

fn summary(map: &CaveMap) -> String {
    format!(
        "seed: {}\nsize: {}x{}\nrooms: {}\npassages: {}",
        map.seed,
        map.grid.width(),
        map.grid.height(),
        map.rooms.len(),
        map.passages.len()
    )
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = args.build_config()?;
    let map = generate_cave(&config).context("invalid cave configuration")?;

    let stdout = io::stdout();
    if args.json {
        let json = serde_json::to_string_pretty(&map).context("failed to serialize map")?;
        writeln!(stdout.lock(), "{}", json)?;
        return Ok(());
    }

    let mut sink = AsciiSink::new(stdout.lock());
    map.hand_off(&mut sink);
    sink.finish().context("failed to write map")?;

    println!("{}", summary(&map));
    Ok(())
}

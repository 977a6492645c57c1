//! Generation configuration
//!
//! Handles defaults, validation and config file loading. Two file forms are
//! accepted: JSON (`*.json`) and a cavegenrc text form:
//!
//! ```text
//! # comment
//! OPTIONS=width:80,height:60,seed:deep-mines
//! OPTIONS=fill:48,!process_regions
//! SEED=rest of the line, verbatim
//! ```

#[cfg(not(feature = "std"))]
use crate::compat::*;

use core::str::FromStr;

use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::path::Path;

use crate::consts::*;
use crate::error::ConfigError;

/// Everything one generation run needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub width: usize,
    pub height: usize,
    /// Seed text; all-digit text is used as a numeric seed
    pub seed: String,
    /// Ignore `seed` and derive one from the current time
    pub use_random_seed: bool,
    /// Chance (0..=100) that an interior tile starts as wall
    pub fill_percent: u32,
    pub smooth_iterations: u32,
    pub wall_threshold: usize,
    pub room_threshold: usize,
    /// Run region filtering and connectivity repair
    pub process_regions: bool,
    pub passage_radius: u32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: DEFAULT_SEED.to_string(),
            use_random_seed: false,
            fill_percent: DEFAULT_FILL_PERCENT,
            smooth_iterations: DEFAULT_SMOOTH_ITERATIONS,
            wall_threshold: DEFAULT_WALL_THRESHOLD,
            room_threshold: DEFAULT_ROOM_THRESHOLD,
            process_regions: true,
            passage_radius: DEFAULT_PASSAGE_RADIUS,
        }
    }
}

impl CaveConfig {
    /// Check the config can produce a well-formed map
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        // Coordinates are i32 and the tile count must fit in usize
        let too_large = ConfigError::MapTooLarge {
            width: self.width,
            height: self.height,
        };
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(too_large);
        }
        let Some(total) = self.width.checked_mul(self.height) else {
            return Err(too_large);
        };

        if self.fill_percent > 100 {
            return Err(ConfigError::FillPercentOutOfRange(self.fill_percent));
        }

        if self.process_regions {
            let interior = self.width.saturating_sub(2) * self.height.saturating_sub(2);
            if self.room_threshold > interior {
                return Err(ConfigError::UnsatisfiableRoomThreshold {
                    threshold: self.room_threshold,
                    interior,
                });
            }

            if self.wall_threshold > total {
                return Err(ConfigError::UnsatisfiableWallThreshold {
                    threshold: self.wall_threshold,
                    total,
                });
            }

            // A bare line only joins rooms diagonally
            if self.passage_radius == 0 {
                return Err(ConfigError::PassageTooNarrow);
            }
        }

        if self.use_random_seed && !cfg!(feature = "std") {
            return Err(ConfigError::RandomSeedUnavailable);
        }

        Ok(())
    }

    /// Seed text for this run
    ///
    /// In random-seed mode this is the current UTC time at nanosecond
    /// precision, otherwise the configured seed.
    pub fn resolve_seed(&self) -> Result<String, ConfigError> {
        if !self.use_random_seed {
            return Ok(self.seed.clone());
        }

        #[cfg(feature = "std")]
        {
            Ok(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Nanos, true))
        }
        #[cfg(not(feature = "std"))]
        {
            Err(ConfigError::RandomSeedUnavailable)
        }
    }

    #[cfg(feature = "std")]
    /// Load a config file, JSON if the extension says so, cavegenrc otherwise
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&contents)
        } else {
            Self::parse_config(&contents)
        }
    }

    #[cfg(feature = "std")]
    /// Parse the JSON form; missing fields take their defaults
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    #[cfg(feature = "std")]
    /// Save the config in cavegenrc form
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_config_string()).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Parse options from a config string (cavegenrc format)
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_config(contents)?;
        Ok(config)
    }

    /// Apply every `OPTIONS=` line of a config string on top of this config
    pub fn apply_config(&mut self, contents: &str) -> Result<(), ConfigError> {
        for raw in contents.lines() {
            // The seed line is taken verbatim so commas and spaces survive
            if let Some(seed) = raw.trim_start().strip_prefix("SEED=") {
                self.seed = unescape_seed(seed)?;
                continue;
            }

            let line = raw.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(opts) = line.strip_prefix("OPTIONS=") else {
                return Err(ConfigError::Parse(format!("unrecognised line: {}", line)));
            };
            for opt in opts.split(',') {
                let opt = opt.trim();
                if !opt.is_empty() {
                    self.parse_option(opt)?;
                }
            }
        }
        Ok(())
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), ConfigError> {
        // Handle key=value options
        if let Some((key, value)) = opt.split_once(':').or_else(|| opt.split_once('=')) {
            return self.set_option(key.trim(), Some(value.trim()));
        }

        // Handle negation
        if let Some(name) = opt.strip_prefix('!') {
            return self.set_bool_option(name, false);
        }
        if self.set_bool_option(opt, true).is_ok() {
            return Ok(());
        }
        match opt.strip_prefix("no") {
            Some(name) => self.set_bool_option(name, false),
            None => self.set_option(opt, None),
        }
    }

    /// Set a boolean option
    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), ConfigError> {
        match name {
            "random_seed" | "use_random_seed" => self.use_random_seed = value,
            "process_regions" | "regions" => self.process_regions = value,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Set an option with a value
    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        match name {
            "width" | "height" | "seed" | "fill" | "fill_percent" | "smooth"
            | "smooth_iterations" | "wall_threshold" | "room_threshold" | "passage_radius"
            | "random_seed" | "use_random_seed" | "process_regions" | "regions" => {}
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        let value = value.ok_or_else(|| ConfigError::MissingValue(name.to_string()))?;

        match name {
            "width" => self.width = parse_value(name, value)?,
            "height" => self.height = parse_value(name, value)?,
            "seed" => self.seed = value.to_string(),
            "fill" | "fill_percent" => self.fill_percent = parse_value(name, value)?,
            "smooth" | "smooth_iterations" => self.smooth_iterations = parse_value(name, value)?,
            "wall_threshold" => self.wall_threshold = parse_value(name, value)?,
            "room_threshold" => self.room_threshold = parse_value(name, value)?,
            "passage_radius" => self.passage_radius = parse_value(name, value)?,
            _ => {
                let flag = parse_bool(name, value)?;
                self.set_bool_option(name, flag)?;
            }
        }
        Ok(())
    }

    /// Write the config in cavegenrc form
    pub fn to_config_string(&self) -> String {
        let flag = |on: bool, name: &str| {
            if on {
                name.to_string()
            } else {
                format!("!{}", name)
            }
        };

        let mut lines = Vec::new();
        lines.push("# cavegen configuration".to_string());
        lines.push(format!("OPTIONS=width:{},height:{}", self.width, self.height));
        lines.push(format!("SEED={}", escape_seed(&self.seed)));
        lines.push(format!(
            "OPTIONS=fill:{},smooth:{},passage_radius:{}",
            self.fill_percent, self.smooth_iterations, self.passage_radius
        ));
        lines.push(format!(
            "OPTIONS=wall_threshold:{},room_threshold:{}",
            self.wall_threshold, self.room_threshold
        ));
        lines.push(format!(
            "OPTIONS={},{}",
            flag(self.use_random_seed, "random_seed"),
            flag(self.process_regions, "process_regions")
        ));
        lines.join("\n")
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name.to_string(), value.to_string()))
}

/// Escape backslashes and line breaks so a seed fits on one line
fn escape_seed(seed: &str) -> String {
    let mut escaped = String::with_capacity(seed.len());
    for c in seed.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape_seed(text: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidValue("seed".to_string(), text.to_string());

    let mut seed = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            seed.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => seed.push('\\'),
            Some('n') => seed.push('\n'),
            Some('r') => seed.push('\r'),
            _ => return Err(invalid()),
        }
    }
    Ok(seed)
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name.to_string(), value.to_string())),
    }
}

//! Replay host configuration.
//!
//! Every option can come from the command line or a `GLOBE_NAV_*` environment
//! variable; the command line wins.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use clap::Parser;

use crate::replay::ReplayError;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "globe-nav", about = "Replay recorded input through the globe navigation controller")]
pub struct Config {
    #[arg(long, env = "GLOBE_NAV_INPUT", default_value = "-", help = "JSON-lines event file, or - for stdin")]
    pub input: String,

    #[arg(long, env = "GLOBE_NAV_CANVAS_WIDTH", default_value_t = 1024.0)]
    pub canvas_width: f64,

    #[arg(long, env = "GLOBE_NAV_CANVAS_HEIGHT", default_value_t = 768.0)]
    pub canvas_height: f64,

    #[arg(long, env = "GLOBE_NAV_GLOBE_2D", default_value_t = false)]
    pub globe_2d: bool,

    #[arg(long, env = "GLOBE_NAV_RANGE", default_value_t = 10_000_000.0, help = "Initial eye range in meters")]
    pub range: f64,
}

impl Config {
    /// Reject values the simulated window cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Config`] for a non-positive or non-finite canvas
    /// dimension or range.
    pub fn validate(self) -> Result<Self, ReplayError> {
        for (name, value) in [
            ("canvas-width", self.canvas_width),
            ("canvas-height", self.canvas_height),
            ("range", self.range),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ReplayError::Config(format!("{name} must be a positive number, got {value}")));
            }
        }
        Ok(self)
    }

    /// Whether events are read from standard input.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}

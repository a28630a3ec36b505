use super::*;

use ::log::Level;

/// The `[log]` section: verbosity of the debug log written to stderr.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Log {
    #[serde(default = "default_level", deserialize_with = "level")]
    level: Level,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Log {
    pub fn level(&self) -> Level {
        self.level
    }

    /// Level after applying `-v` flags from the command line. One flag
    /// raises the level to debug, two or more to trace.
    pub fn with_verbosity(&self, verbose: u8) -> Level {
        match verbose {
            0 => self.level,
            1 => self.level.max(Level::Debug),
            _ => Level::Trace,
        }
    }
}

fn default_level() -> Level {
    Level::Info
}

fn level<'de, D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Level, D::Error> {
    let name = String::deserialize(deserializer)?;

    match name.as_str() {
        "error" => Ok(Level::Error),
        "warn" => Ok(Level::Warn),
        "info" => Ok(Level::Info),
        "debug" => Ok(Level::Debug),
        "trace" => Ok(Level::Trace),
        other => Err(serde::de::Error::unknown_variant(
            other,
            &["error", "warn", "info", "debug", "trace"],
        )),
    }
}

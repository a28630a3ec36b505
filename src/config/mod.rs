use crate::templates;
use crate::{Error, Result};

use serde::Deserialize;

use std::collections::HashMap;
use std::path::Path;

mod general;
mod log;

pub use general::{Format, General};
pub use log::Log;

fn format() -> Format {
    Format::Json
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    general: General,
    #[serde(default)]
    log: Log,
    // check command name -> template name
    #[serde(default)]
    aliases: HashMap<String, String>,
}

impl Config {
    pub fn load(path: &dyn AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;

        config.check()?;

        Ok(config)
    }

    pub fn check(&self) -> Result<()> {
        self.general.check()?;

        for (alias, template) in &self.aliases {
            if templates::lookup(template).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "alias '{alias}' refers to unknown template '{template}'"
                )));
            }
        }

        Ok(())
    }

    pub fn general(&self) -> &General {
        &self.general
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    /// Resolve a check command to the template name it should be rendered
    /// with. Unaliased commands are returned unchanged.
    pub fn resolve<'a>(&'a self, check: &'a str) -> &'a str {
        let command = check.split('!').next().unwrap_or(check).trim();

        self.aliases
            .get(command)
            .map(|t| t.as_str())
            .unwrap_or(check)
    }
}

use super::*;

use std::fmt;
use std::str::FromStr;

/// Output format of the rendered graphs.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Rrd,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "rrd" => Ok(Self::Rrd),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Rrd => f.write_str("rrd"),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(default = "format")]
    format: Format,

    // pretty print json output
    #[serde(default)]
    pretty: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            format: format(),
            pretty: false,
        }
    }
}

impl General {
    pub fn check(&self) -> Result<()> {
        if self.pretty && self.format != Format::Json {
            ::log::warn!("'pretty' has no effect with the {} output format", self.format);
        }

        Ok(())
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

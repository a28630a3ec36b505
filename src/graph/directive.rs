use super::{Color, Consolidation};
use crate::sample::Threshold;

use serde::Serialize;

/// A single drawing instruction. Directives are drawn in sequence, later
/// ones on top of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawDirective {
    Line {
        vname: String,
        width: u8,
        color: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        legend: Option<String>,
    },
    Area {
        vname: String,
        color: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        legend: Option<String>,
        stack: bool,
    },
    Gradient {
        vname: String,
        from: Color,
        to: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        legend: Option<String>,
        steps: u8,
    },
    Rule {
        value: RuleValue,
        color: Color,
        #[serde(skip_serializing_if = "Option::is_none")]
        legend: Option<String>,
    },
    Print {
        vname: String,
        cfs: Vec<Consolidation>,
        format: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Line,
    Area,
    Gradient,
    Rule,
    Print,
}

impl DrawDirective {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Self::Line { .. } => DirectiveKind::Line,
            Self::Area { .. } => DirectiveKind::Area,
            Self::Gradient { .. } => DirectiveKind::Gradient,
            Self::Rule { .. } => DirectiveKind::Rule,
            Self::Print { .. } => DirectiveKind::Print,
        }
    }

    /// The series this directive reads from, if any.
    pub fn vname(&self) -> Option<&str> {
        match self {
            Self::Line { vname, .. }
            | Self::Area { vname, .. }
            | Self::Gradient { vname, .. }
            | Self::Print { vname, .. } => Some(vname),
            Self::Rule {
                value: RuleValue::Series(vname),
                ..
            } => Some(vname),
            Self::Rule { .. } => None,
        }
    }

    pub fn legend(&self) -> Option<&str> {
        match self {
            Self::Line { legend, .. }
            | Self::Area { legend, .. }
            | Self::Gradient { legend, .. }
            | Self::Rule { legend, .. } => legend.as_deref(),
            Self::Print { .. } => None,
        }
    }
}

/// Position of a horizontal rule: a fixed value or the value of a `VDEF`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleValue {
    Constant(Threshold),
    Series(String),
}

impl RuleValue {
    pub fn as_arg(&self) -> &str {
        match self {
            Self::Constant(threshold) => threshold.as_str(),
            Self::Series(vname) => vname,
        }
    }
}

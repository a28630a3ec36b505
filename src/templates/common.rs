use crate::graph::{AxisBounds, Color, DrawDirective, RuleValue};
use crate::sample::{Class, Limit, MetricSample};

pub const WARN_RULE: Color = Color::rgb(0xFF, 0xFF, 0x00);
pub const CRIT_RULE: Color = Color::rgb(0xFF, 0x00, 0x00);

/// Split a compound data source name like `temp_Inlet` into its type tag and
/// display label. Names without a `_` split a leading alphabetic run from the
/// rest, so `temp1` yields `("temp", "1")`.
pub fn split_name(name: &str) -> (&str, &str) {
    if let Some((tag, label)) = name.split_once('_') {
        return (tag, label);
    }

    let end = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());

    (&name[..end], &name[end..])
}

/// Truncate `text` to at most `width` characters.
pub fn cut(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Display token and axis label for a raw unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayUnit {
    pub token: String,
    pub label: String,
}

impl DisplayUnit {
    pub fn parse(raw: &str) -> Self {
        let (token, label) = match raw {
            "volts" => ("V", "Volts"),
            "watts" => ("W", "Watts"),
            "%%" => ("%", "Percentage"),
            "C" => ("°C", "Centigrade"),
            other => (other, other),
        };

        Self {
            token: token.to_string(),
            label: label.to_string(),
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.token == "%"
    }

    /// The token as it has to appear inside a printout format string.
    pub fn format_token(&self) -> String {
        self.token.replace('%', "%%")
    }
}

/// Axis bounds implied by a display unit: percentages are clamped to
/// `[0, 101]`, everything else is left to the renderer.
pub fn bounds_for_unit(unit: &str) -> AxisBounds {
    if unit == "%" {
        AxisBounds::percentage()
    } else {
        AxisBounds::default()
    }
}

/// Horizontal rules for one threshold class of a sample.
///
/// A single value yields one labeled rule. A min/max pair yields a rule at
/// the minimum labeled with both bounds and an unlabeled rule at the maximum.
pub fn threshold_rules(sample: &MetricSample, class: Class, unit: &str) -> Vec<DrawDirective> {
    let color = match class {
        Class::Warning => WARN_RULE,
        Class::Critical => CRIT_RULE,
    };
    let name = class.name();

    match sample.limit(class) {
        Limit::None => Vec::new(),
        Limit::Single(value) => vec![DrawDirective::Rule {
            value: RuleValue::Constant(value.clone()),
            color,
            legend: Some(format!("{name}  {value}{unit} ")),
        }],
        Limit::Range { min, max } => vec![
            DrawDirective::Rule {
                value: RuleValue::Constant(min.clone()),
                color,
                legend: Some(format!("{name}  (min: {min}{unit}  max: {max}{unit})")),
            },
            DrawDirective::Rule {
                value: RuleValue::Constant(max.clone()),
                color,
                legend: None,
            },
        ],
    }
}

/// Warning rules followed by critical rules.
pub fn all_threshold_rules(sample: &MetricSample, unit: &str) -> Vec<DrawDirective> {
    let mut rules = threshold_rules(sample, Class::Warning, unit);
    rules.extend(threshold_rules(sample, Class::Critical, unit));
    rules
}

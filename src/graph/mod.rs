use crate::sample::{StorageRef, Threshold};

use serde::{Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

mod directive;
pub mod rrd;

pub use directive::{DirectiveKind, DrawDirective, RuleValue};

/// One rendered graph: its labels, axis bounds, the series it reads and the
/// directives drawn on top of each other in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSpec {
    name: String,
    title: String,
    vertical_label: String,
    #[serde(skip_serializing_if = "AxisBounds::is_unset")]
    bounds: AxisBounds,
    defs: Vec<SeriesDef>,
    series: Vec<DrawDirective>,
}

impl GraphSpec {
    pub fn new<T: Into<String>, U: Into<String>, V: Into<String>>(
        name: T,
        title: U,
        vertical_label: V,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            vertical_label: vertical_label.into(),
            bounds: AxisBounds::default(),
            defs: Vec::new(),
            series: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: AxisBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn vertical_label(&self) -> &str {
        &self.vertical_label
    }

    pub fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    pub fn defs(&self) -> &[SeriesDef] {
        &self.defs
    }

    pub fn series(&self) -> &[DrawDirective] {
        &self.series
    }

    /// Reads data source `storage` into the series `vname`.
    pub fn def<T: Into<String>>(&mut self, vname: T, storage: &StorageRef) -> &mut Self {
        self.defs.push(SeriesDef::Def {
            vname: vname.into(),
            storage: storage.clone(),
            cf: Consolidation::Average,
        });
        self
    }

    /// Reduces `source` to a single value named `vname`.
    pub fn vdef<T: Into<String>, U: Into<String>>(
        &mut self,
        vname: T,
        source: U,
        cf: Consolidation,
    ) -> &mut Self {
        self.defs.push(SeriesDef::Vdef {
            vname: vname.into(),
            source: source.into(),
            cf,
        });
        self
    }

    pub fn push(&mut self, directive: DrawDirective) -> &mut Self {
        self.series.push(directive);
        self
    }

    pub fn push_all<I: IntoIterator<Item = DrawDirective>>(&mut self, directives: I) -> &mut Self {
        self.series.extend(directives);
        self
    }

    pub fn line<T: Into<String>>(&mut self, vname: T, color: Color, legend: Option<String>) -> &mut Self {
        self.push(DrawDirective::Line {
            vname: vname.into(),
            width: 1,
            color,
            legend,
        })
    }

    pub fn area<T: Into<String>>(
        &mut self,
        vname: T,
        color: Color,
        legend: Option<String>,
        stack: bool,
    ) -> &mut Self {
        self.push(DrawDirective::Area {
            vname: vname.into(),
            color,
            legend,
            stack,
        })
    }

    pub fn gradient<T: Into<String>>(
        &mut self,
        vname: T,
        from: Color,
        to: Color,
        legend: Option<String>,
    ) -> &mut Self {
        self.push(DrawDirective::Gradient {
            vname: vname.into(),
            from,
            to,
            legend,
            steps: DEFAULT_GRADIENT_STEPS,
        })
    }

    pub fn rule(&mut self, value: RuleValue, color: Color, legend: Option<String>) -> &mut Self {
        self.push(DrawDirective::Rule {
            value,
            color,
            legend,
        })
    }

    pub fn print<T: Into<String>, U: Into<String>>(
        &mut self,
        vname: T,
        cfs: &[Consolidation],
        format: U,
    ) -> &mut Self {
        self.push(DrawDirective::Print {
            vname: vname.into(),
            cfs: cfs.to_vec(),
            format: format.into(),
        })
    }

    /// Number of directives of the given kind.
    pub fn count(&self, kind: DirectiveKind) -> usize {
        self.series.iter().filter(|d| d.kind() == kind).count()
    }
}

pub const DEFAULT_GRADIENT_STEPS: u8 = 20;

/// Optional override of the vertical axis range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AxisBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

impl AxisBounds {
    pub fn lower(lower: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// Slightly wider than 0..100 so the 100% gridline stays visible.
    pub fn percentage() -> Self {
        Self {
            lower: Some(0.0),
            upper: Some(101.0),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesDef {
    Def {
        vname: String,
        storage: StorageRef,
        cf: Consolidation,
    },
    Vdef {
        vname: String,
        source: String,
        cf: Consolidation,
    },
}

impl SeriesDef {
    pub fn vname(&self) -> &str {
        match self {
            Self::Def { vname, .. } | Self::Vdef { vname, .. } => vname,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Consolidation {
    Last,
    Max,
    Min,
    Average,
}

impl Consolidation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last => "LAST",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Average => "AVERAGE",
        }
    }

    /// Suffix appended to printouts, e.g. `Average`.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Last => "Last",
            Self::Max => "Max",
            Self::Min => "Min",
            Self::Average => "Average",
        }
    }
}

impl fmt::Display for Consolidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation towards `other`, `factor` in 0..=1.
    pub fn mix(&self, other: &Color, factor: f64) -> Color {
        let channel = |a: u8, b: u8| -> u8 {
            let v = a as f64 + (b as f64 - a as f64) * factor;
            v.round().clamp(0.0, 255.0) as u8
        };

        Color::rgb(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0}")]
pub struct ColorError(String);

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError(s.to_string()))
        };

        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<Threshold> for RuleValue {
    fn from(value: Threshold) -> Self {
        RuleValue::Constant(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parse_and_display() {
        assert_eq!("#A55231".parse::<Color>(), Ok(Color::rgb(0xA5, 0x52, 0x31)));
        assert_eq!("256aef".parse::<Color>(), Ok(Color::rgb(0x25, 0x6A, 0xEF)));
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
        assert_eq!(Color::rgb(0, 0x80, 0xff).to_string(), "#0080FF");
    }

    #[test]
    fn color_mix() {
        let from = Color::rgb(0, 0, 0);
        let to = Color::rgb(200, 100, 50);

        assert_eq!(from.mix(&to, 0.0), from);
        assert_eq!(from.mix(&to, 1.0), to);
        assert_eq!(from.mix(&to, 0.5), Color::rgb(100, 50, 25));
    }

    #[test]
    fn builder_keeps_order() {
        let storage = StorageRef::new("a.rrd", 1);
        let mut graph = GraphSpec::new("Test", "Test graph", "units");
        graph
            .def("var1", &storage)
            .line("var1", Color::BLACK, None)
            .print("var1", &[Consolidation::Last], "%6.2lf")
            .rule(RuleValue::Constant(Threshold::new(1.0)), Color::BLACK, None);

        let kinds: Vec<_> = graph.series().iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![DirectiveKind::Line, DirectiveKind::Print, DirectiveKind::Rule]
        );
        assert_eq!(graph.defs()[0].vname(), "var1");
        assert!(graph.bounds().is_unset());
    }

    #[test]
    fn serializes_to_json() {
        let mut graph = GraphSpec::new("Hum", "Humidity", "Humidity in %")
            .with_bounds(AxisBounds::percentage());
        graph.area("hum", Color::rgb(0xff, 0, 0), Some("Inlet".to_string()), true);

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["bounds"]["upper"], 101.0);
        assert_eq!(json["series"][0]["kind"], "area");
        assert_eq!(json["series"][0]["color"], "#FF0000");
        assert_eq!(json["series"][0]["stack"], true);

        let plain = serde_json::to_value(GraphSpec::new("a", "b", "c")).unwrap();
        assert!(plain.get("bounds").is_none());
    }
}

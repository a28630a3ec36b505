use super::*;

const PRINT: &[Consolidation] = &[Consolidation::Last, Consolidation::Max, Consolidation::Average];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Temperature,
    Humidity,
    Unknown,
}

impl From<&str> for Probe {
    fn from(tag: &str) -> Self {
        match tag {
            "temp" => Self::Temperature,
            "hum" => Self::Humidity,
            _ => Self::Unknown,
        }
    }
}

/// One graph per temperature or humidity probe. Other data sources are
/// ignored.
pub fn generate(context: &Context, samples: &[MetricSample]) -> Vec<GraphSpec> {
    let mut graphs = Vec::new();

    for sample in samples {
        let (tag, label) = split_name(&sample.name);

        let graph = match Probe::from(tag) {
            Probe::Temperature => temperature(context, sample, label),
            Probe::Humidity => humidity(context, sample, label),
            Probe::Unknown => {
                debug!("check_akcp: skipping unknown probe type '{tag}'");
                continue;
            }
        };

        graphs.push(graph);
    }

    graphs
}

fn temperature(context: &Context, sample: &MetricSample, label: &str) -> GraphSpec {
    let unit = if sample.unit.starts_with('°') {
        sample.unit.clone()
    } else {
        format!("°{}", sample.unit)
    };

    let mut graph = GraphSpec::new(
        format!("Temperature {label}"),
        format!("Temperature {} / {label}", context.hostname),
        format!("Temperature in {unit}"),
    );

    graph
        .def("temp", &sample.storage)
        .gradient(
            "temp",
            Color::rgb(0xA5, 0x52, 0x31),
            Color::rgb(0xDE, 0xC6, 0xBD),
            Some(cut(label, 16)),
        )
        .print("temp", PRINT, format!("%5.1lf {}", unit.replace('%', "%%")))
        .line("temp", Color::BLACK, None)
        .push_all(all_threshold_rules(sample, &unit));

    graph
}

fn humidity(context: &Context, sample: &MetricSample, label: &str) -> GraphSpec {
    let unit = "%";

    let mut graph = GraphSpec::new(
        format!("Humidity {label}"),
        format!("Humidity {} / {label}", context.hostname),
        "Humidity in %",
    )
    .with_bounds(bounds_for_unit(unit));

    graph
        .def("hum", &sample.storage)
        .gradient(
            "hum",
            Color::rgb(0x31, 0x52, 0xA5),
            Color::rgb(0xBD, 0xC6, 0xDE),
            Some(cut(label, 16)),
        )
        .print("hum", PRINT, "%5.1lf%%")
        .line("hum", Color::BLACK, None)
        .push_all(all_threshold_rules(sample, unit));

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, unit: &str) -> MetricSample {
        MetricSample::new(name, unit, StorageRef::new("akcp.rrd", 1))
    }

    #[test]
    fn temperature_probe() {
        let input = sample("temp_Serverroom Inlet", "C")
            .with_warn_range("15".parse().unwrap(), "28".parse().unwrap());
        let graphs = generate(&Context::new("akcp01", "Sensors"), &[input]);

        assert_eq!(graphs.len(), 1);
        let graph = &graphs[0];
        assert_eq!(graph.title(), "Temperature akcp01 / Serverroom Inlet");
        assert_eq!(graph.vertical_label(), "Temperature in °C");
        assert!(graph.bounds().is_unset());
        assert_eq!(graph.series()[0].legend(), Some("Serverroom Inlet"));
        assert!(matches!(
            &graph.series()[1],
            DrawDirective::Print { format, .. } if format == "%5.1lf °C"
        ));
        assert_eq!(graph.count(DirectiveKind::Rule), 2);
        assert_eq!(
            graph.series()[3].legend(),
            Some("Warning  (min: 15°C  max: 28°C)")
        );
    }

    #[test]
    fn humidity_probe() {
        let input = sample("hum2", "%%").with_crit("80".parse().unwrap());
        let graph = &generate(&Context::new("akcp01", "Sensors"), &[input])[0];

        assert_eq!(graph.name(), "Humidity 2");
        assert_eq!(graph.vertical_label(), "Humidity in %");
        assert_eq!(graph.bounds(), AxisBounds::percentage());
        assert_eq!(graph.series()[3].legend(), Some("Critical  80% "));
    }

    #[test]
    fn long_labels_are_cut() {
        let input = sample("temp_Rack 12 rear exhaust", "C");
        let graph = &generate(&Context::new("h", "s"), &[input])[0];
        assert_eq!(graph.series()[0].legend(), Some("Rack 12 rear exh"));
    }

    #[test]
    fn unknown_probe_is_skipped() {
        let input = vec![sample("foo_bar", "x"), sample("temp_Inlet", "C")];
        let graphs = generate(&Context::new("h", "s"), &input);

        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].name(), "Temperature Inlet");
        assert!(generate(&Context::new("h", "s"), &[sample("foo_bar", "x")]).is_empty());
    }
}

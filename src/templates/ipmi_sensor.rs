use super::*;

const AREA: Color = Color::rgb(0x25, 0x6A, 0xEF);
const AREA2: Color = Color::rgb(0xBD, 0xC6, 0xDE);
const LINE: Color = Color::BLACK;

const PRINT: &[Consolidation] = &[Consolidation::Last, Consolidation::Max, Consolidation::Average];

/// One graph per sensor.
pub fn generate(context: &Context, samples: &[MetricSample]) -> Vec<GraphSpec> {
    samples
        .iter()
        .map(|sample| sensor(context, sample))
        .collect()
}

fn sensor(context: &Context, sample: &MetricSample) -> GraphSpec {
    let unit = DisplayUnit::parse(&sample.unit);
    let label = sample.label();

    let mut graph = GraphSpec::new(
        label,
        format!("{} / {label}", context.display_hostname()),
        unit.label.as_str(),
    )
    .with_bounds(bounds_for_unit(&unit.token));

    graph
        .def("var1", &sample.storage)
        .gradient("var1", AREA, AREA2, Some(cut(&sample.name, 16)))
        .line("var1", LINE, None)
        .print("var1", PRINT, format!("%3.4lf%S{}", unit.format_token()))
        .push_all(all_threshold_rules(sample, &unit.token));

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        let mut context = Context::new("srv01.example.com", "IPMI");
        context.disp_hostname = Some("srv01".to_string());
        context
    }

    #[test]
    fn volts_sensor() {
        let sample = MetricSample::new("volts_12V", "volts", StorageRef::new("ipmi.rrd", 1))
            .with_warn("11.5".parse().unwrap())
            .with_crit("11.0".parse().unwrap());

        let graphs = generate(&context(), &[sample]);
        assert_eq!(graphs.len(), 1);

        let graph = &graphs[0];
        assert_eq!(graph.title(), "srv01 / volts_12V");
        assert_eq!(graph.vertical_label(), "Volts");
        assert!(graph.bounds().is_unset());
        assert_eq!(graph.count(DirectiveKind::Gradient), 1);
        assert_eq!(graph.count(DirectiveKind::Line), 1);
        assert_eq!(graph.count(DirectiveKind::Print), 1);
        assert_eq!(graph.count(DirectiveKind::Rule), 2);

        assert!(matches!(
            &graph.series()[2],
            DrawDirective::Print { format, .. } if format == "%3.4lf%SV"
        ));
        assert_eq!(graph.series()[3].legend(), Some("Warning  11.5V "));
        assert_eq!(graph.series()[4].legend(), Some("Critical  11.0V "));
    }

    #[test]
    fn percentage_sensor_is_clamped() {
        let sample = MetricSample::new("fan_load", "%%", StorageRef::new("ipmi.rrd", 2))
            .with_label("Fan Load");

        let graph = &generate(&context(), &[sample])[0];
        assert_eq!(graph.name(), "Fan Load");
        assert_eq!(graph.title(), "srv01 / Fan Load");
        assert_eq!(graph.vertical_label(), "Percentage");
        assert_eq!(graph.bounds(), AxisBounds::percentage());
        assert!(matches!(
            &graph.series()[2],
            DrawDirective::Print { format, .. } if format == "%3.4lf%S%%"
        ));
    }

    #[test]
    fn range_thresholds() {
        let sample = MetricSample::new("CPU Temp", "C", StorageRef::new("ipmi.rrd", 3))
            .with_warn_range("5".parse().unwrap(), "75".parse().unwrap())
            .with_crit_range("0".parse().unwrap(), "90".parse().unwrap());

        let graph = &generate(&context(), &[sample])[0];
        assert_eq!(graph.vertical_label(), "Centigrade");
        assert_eq!(graph.count(DirectiveKind::Rule), 4);
        assert_eq!(
            graph.series()[3].legend(),
            Some("Warning  (min: 5°C  max: 75°C)")
        );
        assert_eq!(graph.series()[4].legend(), None);
        assert_eq!(
            graph.series()[5].legend(),
            Some("Critical  (min: 0°C  max: 90°C)")
        );
    }

    #[test]
    fn unknown_unit_passes_through() {
        let sample = MetricSample::new("Fan1", "RPM", StorageRef::new("ipmi.rrd", 4));
        let graph = &generate(&context(), &[sample])[0];

        assert_eq!(graph.vertical_label(), "RPM");
        assert_eq!(graph.count(DirectiveKind::Rule), 0);
    }
}

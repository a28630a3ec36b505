use super::*;

const RESPONSE_PRINT: &[Consolidation] = &[Consolidation::Last, Consolidation::Max, Consolidation::Average];
const TASK_PRINT: &[Consolidation] = &[Consolidation::Last, Consolidation::Average, Consolidation::Max];

/// Task states in the order the hub reports them, following the response
/// time as the first data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskState {
    Free,
    Open,
    Closed,
    Canceled,
    Assigned,
    Failed,
}

impl TaskState {
    const ALL: [TaskState; 6] = [
        TaskState::Free,
        TaskState::Open,
        TaskState::Closed,
        TaskState::Canceled,
        TaskState::Assigned,
        TaskState::Failed,
    ];

    fn vname(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Canceled => "canceled",
            Self::Assigned => "assigned",
            Self::Failed => "failed",
        }
    }

    fn legend(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Canceled => "Canceled",
            Self::Assigned => "Assigned",
            Self::Failed => "Failed",
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Free => Color::rgb(0x00, 0x00, 0xDD),
            Self::Open => Color::rgb(0xFF, 0x80, 0x00),
            Self::Closed => Color::rgb(0x00, 0xFF, 0x00),
            Self::Canceled => Color::rgb(0xFF, 0xFF, 0x00),
            Self::Assigned => Color::rgb(0x00, 0xFF, 0xFF),
            Self::Failed => Color::rgb(0xFF, 0x00, 0x00),
        }
    }
}

/// Response time graph for the first data source and a stacked task graph
/// for the following six.
pub fn generate(context: &Context, samples: &[MetricSample]) -> Vec<GraphSpec> {
    vec![
        response_time(context, samples.first()),
        tasks(context, samples.get(1..).unwrap_or_default()),
    ]
}

fn response_time(context: &Context, sample: Option<&MetricSample>) -> GraphSpec {
    let unit = sample.map(|s| s.unit.as_str()).unwrap_or_default();

    let mut graph = GraphSpec::new(
        "Response Time",
        format!(
            "Response Times {} / {}",
            context.hostname, context.service_desc
        ),
        unit,
    );

    if let Some(sample) = sample {
        graph.def("var1", &sample.storage);

        // bare rules underneath the data, single values only
        for (class, color) in [(Class::Warning, WARN_RULE), (Class::Critical, CRIT_RULE)] {
            if let Limit::Single(value) = sample.limit(class) {
                graph.rule(RuleValue::Constant(value.clone()), color, None);
            }
        }

        graph
            .gradient(
                "var1",
                Color::rgb(0x66, 0xCC, 0xFF),
                Color::rgb(0x00, 0x00, 0xFF),
                Some(sample.name.clone()),
            )
            .line("var1", Color::rgb(0x66, 0x66, 0x66), None)
            .print("var1", RESPONSE_PRINT, format!("%6.2lf {}", unit.replace('%', "%%")));
    }

    graph
}

fn tasks(context: &Context, samples: &[MetricSample]) -> GraphSpec {
    let mut graph = GraphSpec::new(
        "Tasks",
        format!("Koji Tasks {}", context.hostname),
        "Tasks",
    );

    if samples.len() > TaskState::ALL.len() {
        debug!(
            "check_koji_hub: ignoring {} extra data sources",
            samples.len() - TaskState::ALL.len()
        );
    }

    let states: Vec<_> = TaskState::ALL.iter().zip(samples).collect();

    for (state, sample) in &states {
        graph.def(state.vname(), &sample.storage);
    }

    for (idx, (state, _)) in states.iter().enumerate() {
        graph
            .area(
                state.vname(),
                state.color(),
                Some(cut(state.legend(), 12)),
                idx > 0,
            )
            .print(state.vname(), TASK_PRINT, "%6.2lf%s");
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(count: usize) -> Vec<MetricSample> {
        (0..count)
            .map(|i| {
                let unit = if i == 0 { "s" } else { "" };
                MetricSample::new(format!("ds{}", i + 1), unit, StorageRef::new("koji.rrd", i as u32 + 1))
            })
            .collect()
    }

    #[test]
    fn response_time_and_tasks() {
        let mut samples = input(7);
        samples[0].warn = Some("1.5".parse().unwrap());
        samples[0].crit = Some("3".parse().unwrap());

        let graphs = generate(&Context::new("koji", "Koji Hub"), &samples);
        assert_eq!(graphs.len(), 2);

        let response = &graphs[0];
        assert_eq!(response.title(), "Response Times koji / Koji Hub");
        assert_eq!(response.vertical_label(), "s");
        assert_eq!(response.count(DirectiveKind::Gradient), 1);

        let kinds: Vec<_> = response.series().iter().map(|d| d.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                DirectiveKind::Rule,
                DirectiveKind::Rule,
                DirectiveKind::Gradient,
                DirectiveKind::Line,
                DirectiveKind::Print,
            ]
        );
        assert!(matches!(
            &response.series()[0],
            DrawDirective::Rule { value: RuleValue::Constant(t), color, legend: None }
                if t.as_str() == "1.5" && *color == WARN_RULE
        ));
        assert!(matches!(
            &response.series()[1],
            DrawDirective::Rule { value: RuleValue::Constant(t), color, legend: None }
                if t.as_str() == "3" && *color == CRIT_RULE
        ));
        assert_eq!(response.series()[2].legend(), Some("ds1"));

        let tasks = &graphs[1];
        assert_eq!(tasks.title(), "Koji Tasks koji");
        assert_eq!(tasks.vertical_label(), "Tasks");
        assert_eq!(tasks.defs().len(), 6);
        assert_eq!(tasks.count(DirectiveKind::Area), 6);
        assert_eq!(tasks.count(DirectiveKind::Print), 6);

        let stacked: Vec<_> = tasks
            .series()
            .iter()
            .filter_map(|d| match d {
                DrawDirective::Area { stack, .. } => Some(*stack),
                _ => None,
            })
            .collect();
        assert_eq!(stacked, vec![false, true, true, true, true, true]);
        assert_eq!(tasks.series()[10].legend(), Some("Failed"));
    }

    #[test]
    fn ranges_draw_no_response_rules() {
        let mut samples = input(1);
        samples[0] = samples[0]
            .clone()
            .with_warn_range("1".parse().unwrap(), "2".parse().unwrap());

        let graphs = generate(&Context::new("koji", "Koji Hub"), &samples);
        assert_eq!(graphs[0].count(DirectiveKind::Rule), 0);
    }

    #[test]
    fn missing_task_counters() {
        let graphs = generate(&Context::new("koji", "Koji Hub"), &input(3));
        assert_eq!(graphs[1].count(DirectiveKind::Area), 2);

        let graphs = generate(&Context::new("koji", "Koji Hub"), &[]);
        assert_eq!(graphs.len(), 2);
        assert!(graphs[0].series().is_empty());
        assert!(graphs[1].series().is_empty());
        assert_eq!(graphs[0].vertical_label(), "");
    }
}

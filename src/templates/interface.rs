use super::*;

const PRINT: &[Consolidation] = &[Consolidation::Last, Consolidation::Max, Consolidation::Average];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Counter {
    InOctets,
    InErrors,
    OutOctets,
    OutErrors,
    Speed,
}

impl Counter {
    const ALL: [Counter; 5] = [
        Counter::InOctets,
        Counter::InErrors,
        Counter::OutOctets,
        Counter::OutErrors,
        Counter::Speed,
    ];

    fn vname(&self) -> &'static str {
        match self {
            Self::InOctets => "ifInOctets",
            Self::InErrors => "ifInErrors",
            Self::OutOctets => "ifOutOctets",
            Self::OutErrors => "ifOutErrors",
            Self::Speed => "ifSpeed",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.vname() == name)
    }
}

/// Samples of one interface check keyed by counter. The first sample for a
/// counter wins.
#[derive(Default)]
struct Counters<'a> {
    samples: [Option<&'a MetricSample>; 5],
}

impl<'a> Counters<'a> {
    fn collect(samples: &'a [MetricSample]) -> Self {
        let mut counters = Self::default();

        for sample in samples {
            match Counter::parse(&sample.name) {
                Some(counter) => {
                    let slot = &mut counters.samples[counter as usize];
                    if slot.is_none() {
                        *slot = Some(sample);
                    }
                }
                None => debug!("check_interface: skipping unknown counter '{}'", sample.name),
            }
        }

        counters
    }

    fn get(&self, counter: Counter) -> Option<&'a MetricSample> {
        self.samples[counter as usize]
    }

    fn def(&self, graph: &mut GraphSpec, counter: Counter) -> bool {
        match self.get(counter) {
            Some(sample) => {
                graph.def(counter.vname(), &sample.storage);
                true
            }
            None => false,
        }
    }
}

/// A traffic graph and an error graph, always in that order.
pub fn generate(context: &Context, samples: &[MetricSample]) -> Vec<GraphSpec> {
    let counters = Counters::collect(samples);

    vec![traffic(context, &counters), errors(context, &counters)]
}

fn traffic(context: &Context, counters: &Counters) -> GraphSpec {
    let mut graph = GraphSpec::new(
        "Traffic",
        format!("Traffic {} / {}", context.hostname, context.service_desc),
        "bits per second",
    );

    let inbound = counters.def(&mut graph, Counter::InOctets);
    let outbound = counters.def(&mut graph, Counter::OutOctets);
    let speed = counters.def(&mut graph, Counter::Speed);

    if speed {
        graph
            .vdef("ifSpeedLast", "ifSpeed", Consolidation::Last)
            .rule(
                RuleValue::Series("ifSpeedLast".to_string()),
                Color::BLACK,
                Some(cut("Speed", 10)),
            )
            .print("ifSpeed", &[Consolidation::Last], "%6.2lf%sbit/s");
    }

    if inbound {
        graph
            .area("ifInOctets", Color::rgb(0x00, 0xFF, 0x00), Some(cut("Inbound", 10)), false)
            .print("ifInOctets", PRINT, "%6.2lf%sbit/s");
    }

    if outbound {
        graph
            .line("ifOutOctets", Color::rgb(0x00, 0x00, 0xFF), Some(cut("Outbound", 10)))
            .print("ifOutOctets", PRINT, "%6.2lf%sbit/s");
    }

    graph
}

fn errors(context: &Context, counters: &Counters) -> GraphSpec {
    let mut graph = GraphSpec::new(
        "Error",
        format!("Error {} / {}", context.hostname, context.service_desc),
        "errors per second",
    );

    let inbound = counters.def(&mut graph, Counter::InErrors);
    let outbound = counters.def(&mut graph, Counter::OutErrors);

    if inbound {
        graph
            .area("ifInErrors", Color::rgb(0x80, 0x00, 0x00), Some(cut("Inbound", 10)), false)
            .print("ifInErrors", PRINT, "%4.2lf%s errors/s");
    }

    if outbound {
        // stack on top of inbound errors when both are present
        graph
            .area(
                "ifOutErrors",
                Color::rgb(0xFF, 0x00, 0x00),
                Some(cut("Outbound", 10)),
                inbound,
            )
            .print("ifOutErrors", PRINT, "%4.2lf%s errors/s");
    }

    graph
}

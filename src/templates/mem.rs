use super::*;

const PRINT: &[Consolidation] = &[Consolidation::Last, Consolidation::Average, Consolidation::Max];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Memory {
    Total,
    Slab,
    SwapCached,
    PageTables,
    Apps,
    Free,
    Buffers,
    Cached,
    Swap,
}

impl Memory {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "memtotal" => Some(Self::Total),
            "slab" => Some(Self::Slab),
            "swapcached" => Some(Self::SwapCached),
            "pagetables" => Some(Self::PageTables),
            "apps" => Some(Self::Apps),
            "memfree" => Some(Self::Free),
            "buffers" => Some(Self::Buffers),
            "cached" => Some(Self::Cached),
            "swap" => Some(Self::Swap),
            _ => None,
        }
    }

    fn vname(&self) -> &'static str {
        match self {
            Self::Total => "tot",
            Self::Slab => "slab",
            Self::SwapCached => "swapcached",
            Self::PageTables => "pagetables",
            Self::Apps => "apps",
            Self::Free => "memfree",
            Self::Buffers => "buffers",
            Self::Cached => "cached",
            Self::Swap => "swap",
        }
    }

    fn legend(&self) -> &'static str {
        match self {
            Self::Total => "Total memory",
            Self::Slab => "Slab",
            Self::SwapCached => "Swap Cache",
            Self::PageTables => "Page Table",
            Self::Apps => "Applications",
            Self::Free => "Free",
            Self::Buffers => "Buffer",
            Self::Cached => "Cache",
            Self::Swap => "Swap",
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Total => Color::BLACK,
            Self::Apps => Color::rgb(0xFF, 0x00, 0x00),
            Self::PageTables => Color::rgb(0x00, 0x00, 0xFF),
            Self::Slab => Color::rgb(0x00, 0xFF, 0xFF),
            Self::SwapCached => Color::rgb(0xFF, 0x80, 0x00),
            Self::Cached => Color::rgb(0xFF, 0xFF, 0x00),
            Self::Buffers => Color::rgb(0x80, 0xFF, 0x00),
            Self::Free => Color::rgb(0x00, 0xFF, 0x00),
            Self::Swap => Color::rgb(0x80, 0x00, 0x00),
        }
    }
}

// applications at the bottom, everything else stacked on top in this order
static STACK: &[Memory] = &[
    Memory::Apps,
    Memory::PageTables,
    Memory::Slab,
    Memory::SwapCached,
    Memory::Cached,
    Memory::Buffers,
    Memory::Free,
    Memory::Swap,
];

pub fn generate(context: &Context, samples: &[MetricSample]) -> Vec<GraphSpec> {
    let mut graph = GraphSpec::new(
        "Memory Usage",
        format!("Memory Usage for {}", context.hostname),
        "",
    )
    .with_bounds(AxisBounds::lower(0.0));

    let mut found: Vec<(Memory, &MetricSample)> = Vec::new();

    for sample in samples {
        match Memory::parse(&sample.name) {
            Some(kind) if !found.iter().any(|(k, _)| *k == kind) => {
                graph.def(kind.vname(), &sample.storage);
                found.push((kind, sample));
            }
            Some(_) => debug!("check_mem: duplicate data source '{}'", sample.name),
            None => debug!("check_mem: skipping unknown data source '{}'", sample.name),
        }
    }

    let has = |kind: Memory| found.iter().any(|(k, _)| *k == kind);

    if has(Memory::Total) {
        graph
            .line("tot", Memory::Total.color(), Some(Memory::Total.legend().to_string()))
            .print("tot", &[Consolidation::Last], "%6.2lf%s");
    }

    for (idx, kind) in STACK.iter().filter(|k| has(**k)).enumerate() {
        graph
            .area(
                kind.vname(),
                kind.color(),
                Some(format!("{:<12}", kind.legend())),
                idx > 0,
            )
            .print(kind.vname(), PRINT, "%6.2lf%s");
    }

    vec![graph]
}

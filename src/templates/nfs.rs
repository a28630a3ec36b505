use super::*;

const PRINT: &[Consolidation] = &[Consolidation::Last, Consolidation::Max, Consolidation::Average];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    Tcp,
    Udp,
    Tcp6,
    Udp6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Version {
    V3,
    V4,
}

/// One probed RPC endpoint, e.g. `tcp_v3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Endpoint {
    transport: Transport,
    version: Version,
}

impl Endpoint {
    fn parse(name: &str) -> Option<Self> {
        let name = name.replace(':', "_");
        let (transport, version) = name.split_once('_')?;

        let transport = match transport {
            "tcp" => Transport::Tcp,
            "udp" => Transport::Udp,
            "tcp6" => Transport::Tcp6,
            "udp6" => Transport::Udp6,
            _ => return None,
        };

        let version = match version {
            "v3" => Version::V3,
            "v4" => Version::V4,
            _ => return None,
        };

        Some(Self { transport, version })
    }

    fn color(&self) -> Color {
        match (self.transport, self.version) {
            (Transport::Tcp, Version::V3) => Color::rgb(0x80, 0x00, 0x00),
            (Transport::Tcp, Version::V4) => Color::rgb(0xFF, 0x00, 0x00),
            (Transport::Udp, Version::V3) => Color::rgb(0x00, 0x80, 0x00),
            (Transport::Udp, Version::V4) => Color::rgb(0x00, 0xFF, 0x00),
            (Transport::Tcp6, Version::V3) => Color::rgb(0x00, 0x00, 0x80),
            (Transport::Tcp6, Version::V4) => Color::rgb(0x00, 0x00, 0xFF),
            (Transport::Udp6, Version::V3) => Color::rgb(0x80, 0x40, 0x00),
            (Transport::Udp6, Version::V4) => Color::rgb(0xFF, 0x80, 0x00),
        }
    }

    fn legend(&self) -> String {
        let version = match self.version {
            Version::V3 => "NFSv3",
            Version::V4 => "NFSv4",
        };

        let transport = match self.transport {
            Transport::Tcp => "TCP",
            Transport::Udp => "UDP",
            Transport::Tcp6 => "TCP6",
            Transport::Udp6 => "UDP6",
        };

        format!("{version} {transport}")
    }
}

pub fn generate(context: &Context, samples: &[MetricSample]) -> Vec<GraphSpec> {
    let unit = samples.first().map(|s| s.unit.as_str()).unwrap_or_default();

    let mut graph = GraphSpec::new(
        "NFS Response Time",
        format!(
            "Response Times {} / {}",
            context.hostname, context.service_desc
        ),
        unit,
    );

    for (idx, sample) in samples.iter().enumerate() {
        let Some(endpoint) = Endpoint::parse(&sample.name) else {
            debug!("check_nfs: skipping unknown endpoint '{}'", sample.name);
            continue;
        };

        let vname = format!("var_{}", idx + 1);
        let format = format!("%6.3lf %S{}", sample.unit.replace('%', "%%"));

        graph
            .def(vname.as_str(), &sample.storage)
            .line(vname.as_str(), endpoint.color(), Some(cut(&endpoint.legend(), 12)))
            .print(&vname, PRINT, format);
    }

    vec![graph]
}

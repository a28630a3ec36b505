//! PNP4Nagios graph templates for the monitoring plugins.
//!
//! Each template maps the performance data samples of one check onto a list
//! of graphs: titles, axis labels, the series to read and the draw directives
//! (lines, areas, gradients, threshold rules and value printouts) layered on
//! top of each other. Templates are pure functions and keep no state between
//! calls.
//!
//! ```
//! use pnpgraph::sample::{Context, MetricSample, StorageRef};
//!
//! let samples = vec![
//!     MetricSample::new("volts_12V", "volts", StorageRef::new("ipmi.rrd", 1))
//!         .with_warn("11.5".parse().unwrap()),
//! ];
//! let graphs = pnpgraph::build_graphs("check_ipmi_sensor", &Context::new("srv01", "IPMI"), &samples)
//!     .unwrap();
//!
//! assert_eq!(graphs[0].vertical_label(), "Volts");
//! ```

pub mod config;
mod error;
pub mod graph;
pub mod sample;
pub mod templates;

pub use config::{Config, Format};
pub use error::{Error, Result};
pub use graph::GraphSpec;
pub use sample::{Context, MetricSample, Request};
pub use templates::build_graphs;

/// Render a request with the template configured for `check`, following
/// any alias from the config.
pub fn render(config: &Config, check: &str, request: &Request) -> Result<Vec<GraphSpec>> {
    let template = config.resolve(check);

    build_graphs(template, &request.context, &request.samples)
        .ok_or_else(|| Error::UnknownCheck(check.to_string()))
}

/// Serialize rendered graphs in the requested output format.
///
/// The `rrd` format writes one block per graph: a `# name` header followed
/// by one `rrdtool graph` argument per line.
pub fn output(graphs: &[GraphSpec], format: Format, pretty: bool) -> Result<String> {
    match format {
        Format::Json if pretty => Ok(serde_json::to_string_pretty(graphs)?),
        Format::Json => Ok(serde_json::to_string(graphs)?),
        Format::Rrd => {
            let blocks: Vec<String> = graphs
                .iter()
                .map(|graph| {
                    let mut lines = vec![format!("# {}", graph.name())];
                    lines.extend(graph::rrd::render(graph));
                    lines.join("\n")
                })
                .collect();

            Ok(blocks.join("\n\n"))
        }
    }
}

use crate::graph::*;
use crate::sample::*;

use log::{debug, trace};

pub mod common;

mod akcp;
mod interface;
mod ipmi_sensor;
mod koji_hub;
mod mem;
mod nfs;

use common::*;

pub type Generator = fn(&Context, &[MetricSample]) -> Vec<GraphSpec>;

static TEMPLATES: &[(&str, Generator)] = &[
    ("check_akcp", akcp::generate),
    ("check_interface", interface::generate),
    ("check_ipmi_sensor", ipmi_sensor::generate),
    ("check_koji_hub", koji_hub::generate),
    ("check_mem", mem::generate),
    ("check_nfs", nfs::generate),
];

/// Names of all registered templates.
pub fn names() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|(name, _)| *name)
}

/// Find the template for a check command. Arguments following a `!` in the
/// command are ignored.
pub fn lookup(check: &str) -> Option<Generator> {
    let check = check.split('!').next().unwrap_or(check).trim();

    TEMPLATES
        .iter()
        .find(|(name, _)| *name == check)
        .map(|(_, generator)| *generator)
}

/// Build the graphs for `check`, or `None` if no template is registered for
/// it.
pub fn build_graphs(check: &str, context: &Context, samples: &[MetricSample]) -> Option<Vec<GraphSpec>> {
    let generator = lookup(check)?;
    let graphs = generator(context, samples);

    for graph in &graphs {
        trace!(
            "{check}: graph '{}' with {} series",
            graph.name(),
            graph.series().len()
        );
    }

    Some(graphs)
}

//! Renders a [`GraphSpec`] as `rrdtool graph` arguments.

use super::*;

/// Render the graph as a list of `rrdtool graph` arguments. Each entry is a
/// single argument, no shell quoting is applied.
pub fn render(graph: &GraphSpec) -> Vec<String> {
    let mut args = Vec::new();

    if !graph.vertical_label().is_empty() {
        args.push("--vertical-label".to_string());
        args.push(graph.vertical_label().to_string());
    }

    args.push("--title".to_string());
    args.push(graph.title().to_string());

    let bounds = graph.bounds();
    if let Some(lower) = bounds.lower {
        args.push(format!("--lower-limit={lower}"));
    }
    if let Some(upper) = bounds.upper {
        args.push(format!("--upper-limit={upper}"));
    }

    for def in graph.defs() {
        args.push(render_def(def));
    }

    for directive in graph.series() {
        render_directive(directive, &mut args);
    }

    args
}

fn render_def(def: &SeriesDef) -> String {
    match def {
        SeriesDef::Def { vname, storage, cf } => {
            format!(
                "DEF:{vname}={}:{}:{cf}",
                escape(&storage.rrd_file),
                storage.ds
            )
        }
        SeriesDef::Vdef { vname, source, cf } => format!("VDEF:{vname}={source},{cf}"),
    }
}

fn render_directive(directive: &DrawDirective, args: &mut Vec<String>) {
    match directive {
        DrawDirective::Line {
            vname,
            width,
            color,
            legend,
        } => args.push(with_legend(format!("LINE{width}:{vname}{color}"), legend)),
        DrawDirective::Area {
            vname,
            color,
            legend,
            stack,
        } => {
            let mut arg = format!("AREA:{vname}{color}");
            if *stack {
                arg.push(':');
                arg.push_str(&legend.as_deref().map(escape).unwrap_or_default());
                arg.push_str(":STACK");
            } else {
                arg = with_legend(arg, legend);
            }
            args.push(arg);
        }
        DrawDirective::Gradient {
            vname,
            from,
            to,
            legend,
            steps,
        } => render_gradient(vname, from, to, legend.as_deref(), *steps, args),
        DrawDirective::Rule {
            value,
            color,
            legend,
        } => {
            let mut arg = format!("HRULE:{}{color}", value.as_arg());
            if let Some(legend) = legend {
                arg.push(':');
                arg.push_str(&escape(legend));
                arg.push_str("\\n");
            }
            args.push(arg);
        }
        DrawDirective::Print { vname, cfs, format } => {
            for (idx, cf) in cfs.iter().enumerate() {
                let mut arg = format!("GPRINT:{vname}:{cf}:{} {}", escape(format), cf.title());
                if idx == cfs.len() - 1 {
                    arg.push_str("\\n");
                }
                args.push(arg);
            }
        }
    }
}

// Stack of bands from the full value down to a small fraction of it, each
// band shaded a step closer to `from`. Only the outermost band carries the
// legend.
fn render_gradient(
    vname: &str,
    from: &Color,
    to: &Color,
    legend: Option<&str>,
    steps: u8,
    args: &mut Vec<String>,
) {
    let steps = steps.max(1) as u32;

    for i in (1..=steps).rev() {
        args.push(format!(
            "CDEF:{vname}_g{i}={vname},100,/,{},*",
            i * 100 / steps
        ));
    }

    for i in (1..=steps).rev() {
        let color = from.mix(to, i as f64 / steps as f64);
        let area = format!("AREA:{vname}_g{i}{color}");

        if i == steps {
            args.push(with_legend(area, &legend.map(|l| l.to_string())));
        } else {
            args.push(area);
        }
    }
}

fn with_legend(mut arg: String, legend: &Option<String>) -> String {
    if let Some(legend) = legend {
        arg.push(':');
        arg.push_str(&escape(legend));
    }
    arg
}

/// Colons separate fields in rrdtool arguments and must be escaped.
pub fn escape(s: &str) -> String {
    s.replace(':', "\\:")
}

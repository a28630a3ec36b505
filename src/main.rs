use anyhow::Context as _;
use backtrace::Backtrace;
use clap::{value_parser, Arg, ArgMatches, Command};
use pnpgraph::sample::{perfdata, Context};
use pnpgraph::{Config, Format, Request};
use ringlog::*;

use std::io::Read;
use std::path::PathBuf;

fn main() {
    // custom panic hook to terminate whole process after unwinding
    std::panic::set_hook(Box::new(|s| {
        eprintln!("{s}");
        eprintln!("{:?}", Backtrace::new());
        std::process::exit(101);
    }));

    let matches = command().get_matches();

    let config = match matches.get_one::<PathBuf>("CONFIG") {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(error) => {
                eprintln!("error loading config file: {path:?}\n{error}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let verbose = *matches.get_one::<u8>("VERBOSE").unwrap_or(&0);
    let level = config.log().with_verbosity(verbose);

    let mut log = match debug_log(level) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("failed to initialize debug log: {e}");
            std::process::exit(1);
        }
    };

    let result = match matches.subcommand() {
        Some(("list", _)) => list(),
        Some(("render", args)) => render(&config, args),
        Some(("perfdata", args)) => render_perfdata(&config, args),
        _ => unreachable!("subcommand is required"),
    };

    let _ = log.flush();

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn command() -> Command {
    Command::new(env!("CARGO_BIN_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_about("Renders PNP4Nagios graph definitions for the monitoring plugins.")
        .subcommand_required(true)
        .arg(
            Arg::new("CONFIG")
                .long("config")
                .short('c')
                .help("Configuration file")
                .value_parser(value_parser!(PathBuf))
                .action(clap::ArgAction::Set)
                .global(true),
        )
        .arg(
            Arg::new("VERBOSE")
                .long("verbose")
                .short('v')
                .help("Increase the verbosity")
                .action(clap::ArgAction::Count)
                .global(true),
        )
        .subcommand(Command::new("list").about("List the registered graph templates"))
        .subcommand(
            Command::new("render")
                .about("Render graphs from a JSON request")
                .arg(check_arg())
                .arg(
                    Arg::new("INPUT")
                        .help("JSON request file, stdin if omitted")
                        .value_parser(value_parser!(PathBuf))
                        .action(clap::ArgAction::Set)
                        .index(2),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("perfdata")
                .about("Render graphs from a plugin performance data string")
                .arg(check_arg())
                .arg(
                    Arg::new("PERFDATA")
                        .help("Performance data, e.g. 'ifInOctets=1234c ifSpeed=1000000000'")
                        .action(clap::ArgAction::Set)
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("HOST")
                        .long("host")
                        .help("Host name")
                        .action(clap::ArgAction::Set)
                        .required(true),
                )
                .arg(
                    Arg::new("SERVICE")
                        .long("service")
                        .help("Service description")
                        .action(clap::ArgAction::Set)
                        .default_value(""),
                )
                .arg(
                    Arg::new("RRD")
                        .long("rrd")
                        .help("Round-robin file holding the data sources")
                        .action(clap::ArgAction::Set)
                        .required(true),
                )
                .arg(format_arg()),
        )
}

fn check_arg() -> Arg {
    Arg::new("CHECK")
        .help("Check command the graphs are rendered for")
        .action(clap::ArgAction::Set)
        .required(true)
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("FORMAT")
        .long("format")
        .short('f')
        .help("Output format, overrides the config file")
        .value_parser(["json", "rrd"])
        .action(clap::ArgAction::Set)
}

fn debug_log(level: Level) -> Result<Box<dyn Drain>, String> {
    let debug_output: Box<dyn Output> = Box::new(Stderr::new());

    let debug_log = if level <= Level::Info {
        LogBuilder::new().format(ringlog::default_format)
    } else {
        LogBuilder::new()
    }
    .output(debug_output)
    .build()
    .map_err(|e| e.to_string())?;

    Ok(MultiLogBuilder::new()
        .level_filter(level.to_level_filter())
        .default(debug_log)
        .build()
        .start())
}

fn format(config: &Config, args: &ArgMatches) -> anyhow::Result<Format> {
    match args.get_one::<String>("FORMAT") {
        Some(f) => f.parse::<Format>().map_err(anyhow::Error::msg),
        None => Ok(config.general().format()),
    }
}

fn emit(config: &Config, args: &ArgMatches, check: &str, request: &Request) -> anyhow::Result<()> {
    let graphs = pnpgraph::render(config, check, request)?;
    debug!("{check}: rendered {} graphs", graphs.len());

    let output = pnpgraph::output(&graphs, format(config, args)?, config.general().pretty())?;
    println!("{output}");

    Ok(())
}

fn list() -> anyhow::Result<()> {
    for name in pnpgraph::templates::names() {
        println!("{name}");
    }

    Ok(())
}

fn render(config: &Config, args: &ArgMatches) -> anyhow::Result<()> {
    let check = args
        .get_one::<String>("CHECK")
        .context("missing check name")?;

    let content = match args.get_one::<PathBuf>("INPUT") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("unable to read request: {path:?}"))?,
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("unable to read request from stdin")?;
            content
        }
    };

    let request: Request = serde_json::from_str(&content).context("failed to parse request")?;

    emit(config, args, check, &request)
}

fn render_perfdata(config: &Config, args: &ArgMatches) -> anyhow::Result<()> {
    let check = args
        .get_one::<String>("CHECK")
        .context("missing check name")?;
    let text = args
        .get_one::<String>("PERFDATA")
        .context("missing perfdata")?;
    let host = args.get_one::<String>("HOST").context("missing host")?;
    let service = args
        .get_one::<String>("SERVICE")
        .map(|s| s.as_str())
        .unwrap_or_default();
    let rrd = args.get_one::<String>("RRD").context("missing rrd file")?;

    let request = Request {
        context: Context::new(host.as_str(), service),
        samples: perfdata::parse(text, rrd)?,
    };

    emit(config, args, check, &request)
}

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use evo_core::{IndexerConfig, Status};
use evo_indexer::{
    init_tracing, render_list, render_record, render_run, Indexer, OutputFormat, EXIT_FATAL,
    EXIT_OK,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// `show` exit status when the id is not indexed
const EXIT_NOT_FOUND: u8 = 1;

fn path_arg() -> Arg {
    Arg::new("path")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Directory containing proposal documents")
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .default_value("text")
        .value_parser(value_parser!(OutputFormat))
        .help("Report format")
}

fn cli() -> Command {
    Command::new("evo-index")
        .version(evo_indexer::VERSION)
        .about("Index and validate a collection of evolution proposals")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log level (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML settings file"),
        )
        .subcommand(
            Command::new("index")
                .about("Scan, validate and report on a collection")
                .arg(path_arg())
                .arg(format_arg())
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Exit non-zero when any warning is reported"),
                )
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .action(ArgAction::SetTrue)
                        .help("Parse documents on all cores"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Print one proposal by id")
                .arg(path_arg())
                .arg(
                    Arg::new("id")
                        .required(true)
                        .help("Proposal id, e.g. SE-0036"),
                )
                .arg(format_arg()),
        )
        .subcommand(
            Command::new("list")
                .about("List proposals with a given status")
                .arg(path_arg())
                .arg(
                    Arg::new("status")
                        .long("status")
                        .required(true)
                        .value_parser(|s: &str| s.parse::<Status>())
                        .help("Status phrase, e.g. \"Active review\""),
                )
                .arg(format_arg()),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    if let Err(err) = init_tracing(matches.get_count("verbose")) {
        eprintln!("warning: logging unavailable: {err}");
    }

    let code = execute(&matches, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(code)
}

/// Run the selected subcommand and map failures to an exit status
fn execute(matches: &ArgMatches, out: &mut dyn Write, err: &mut dyn Write) -> u8 {
    match run(matches, out, err) {
        Ok(code) => code,
        Err(failure) => {
            let _ = writeln!(err, "error: {failure:#}");
            EXIT_FATAL
        }
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<IndexerConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => IndexerConfig::load(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(IndexerConfig::default()),
    }
}

fn run(matches: &ArgMatches, out: &mut dyn Write, err: &mut dyn Write) -> anyhow::Result<u8> {
    let Some((name, args)) = matches.subcommand() else {
        anyhow::bail!("no subcommand given");
    };

    let mut config = load_config(args)?;
    if args.try_get_one::<bool>("parallel").ok().flatten() == Some(&true) {
        config = config.with_parallel(true);
    }

    let root = args
        .get_one::<PathBuf>("path")
        .context("missing collection path")?;
    let format = args
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or_default();

    let run = Indexer::new(config)
        .run(root)
        .with_context(|| format!("indexing {}", root.display()))?;

    match name {
        "index" => {
            write!(out, "{}", render_run(&run, format)?)?;
            Ok(run.exit_code(args.get_flag("strict")))
        }
        "show" => {
            let id = args.get_one::<String>("id").context("missing proposal id")?;
            match run.index.lookup(id) {
                Ok(record) => {
                    write!(out, "{}", render_record(record, format)?)?;
                    Ok(EXIT_OK)
                }
                Err(missing) => {
                    writeln!(err, "{missing}")?;
                    Ok(EXIT_NOT_FOUND)
                }
            }
        }
        "list" => {
            let status = *args
                .get_one::<Status>("status")
                .context("missing status")?;
            write!(out, "{}", render_list(&run.index.list_by_status(status), format)?)?;
            Ok(EXIT_OK)
        }
        other => anyhow::bail!("unknown subcommand {other}"),
    }
}

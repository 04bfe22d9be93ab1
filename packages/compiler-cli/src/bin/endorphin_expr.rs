use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process;

use endorphin_compiler_cli::args::{parse_offset, read_source};
use endorphin_compiler_cli::commands::{
    build_options, build_parser, parse_expression, scan_file, OutputMode,
};
use endorphin_compiler_cli::compiler::OffsetDescriptor;
use endorphin_compiler_cli::config::ExpressionConfig;
use endorphin_compiler_cli::logging::init_logging;

fn main() {
    let matches = Command::new("endorphin-expr")
        .version(endorphin_compiler_cli::version())
        .about("Endorphin template expression parser")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("JSON file with helper and global allow-lists")
                .global(true),
        )
        .arg(
            Arg::new("helper")
                .long("helper")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Register a helper name (repeatable)")
                .global(true),
        )
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .help("Document URL reported with syntax errors")
                .global(true),
        )
        .arg(
            Arg::new("bindings")
                .short('b')
                .long("bindings")
                .action(ArgAction::SetTrue)
                .help("Print classified identifiers instead of the tree")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity")
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a single expression")
                .arg(
                    Arg::new("expression")
                        .value_name("EXPR")
                        .help("Expression source; read from stdin when omitted"),
                )
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .value_name("POS:LINE:COLUMN")
                        .value_parser(parse_offset)
                        .help("Position of the expression in its document"),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Parse every {...} expression of a template document")
                .arg(
                    Arg::new("file")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        Some(("parse", sub)) => run_parse(sub),
        Some(("scan", sub)) => run_scan(sub),
        Some((name, _)) => Err(anyhow::anyhow!("Unknown command: {}", name)),
        None => Err(anyhow::anyhow!("No command given")),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<ExpressionConfig> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ExpressionConfig::load(path)?,
        None => ExpressionConfig::default(),
    };
    let helpers = matches
        .get_many::<String>("helper")
        .into_iter()
        .flatten()
        .cloned();
    config.with_helpers(helpers)
}

fn output_mode(matches: &ArgMatches) -> OutputMode {
    if matches.get_flag("bindings") {
        OutputMode::Bindings
    } else {
        OutputMode::Tree
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_parse(matches: &ArgMatches) -> anyhow::Result<i32> {
    init_logging(matches.get_count("verbose"));

    let config = load_config(matches)?;
    let parser = build_parser(&config);
    let mut options = build_options(&config);
    if let Some(offset) = matches.get_one::<OffsetDescriptor>("offset") {
        options = options.with_offset(*offset);
    }
    if let Some(url) = matches.get_one::<String>("url") {
        options = options.with_url(url.as_str());
    }

    let expression = matches.get_one::<String>("expression").map(String::as_str);
    let code = read_source(expression, io::stdin().lock())?;

    match parse_expression(&parser, &code, &options, output_mode(matches)) {
        Ok(output) => {
            print_json(&output)?;
            Ok(0)
        }
        Err(err) => {
            eprintln!("{}", err);
            Ok(1)
        }
    }
}

fn run_scan(matches: &ArgMatches) -> anyhow::Result<i32> {
    init_logging(matches.get_count("verbose"));

    let config = load_config(matches)?;
    let parser = build_parser(&config);
    let mut options = build_options(&config);
    if let Some(url) = matches.get_one::<String>("url") {
        options = options.with_url(url.as_str());
    }

    let Some(path) = matches.get_one::<PathBuf>("file") else {
        return Err(anyhow::anyhow!("Missing template file"));
    };

    let entries = scan_file(&parser, path, &options, output_mode(matches))?;
    print_json(&entries)?;

    if entries.iter().any(|entry| entry.is_error()) {
        Ok(1)
    } else {
        Ok(0)
    }
}

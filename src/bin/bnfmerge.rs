// Copyright (c) 2016-2021 Fabian Schuiki

//! Merge BNF XML grammar fragments into a single grammar.

extern crate bnfmerge;
extern crate clap;
#[macro_use]
extern crate log;

use bnfmerge::errors::*;
use bnfmerge::grammar::{filter::filter, render::tree_roots_report, serialize, Config, Style};
use clap::{App, Arg, ArgMatches};
use log::LevelFilter;

fn main() {
    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Merge BNF grammar fragments from XML files into a single grammar.")
        .arg(
            Arg::with_name("bnfc_style")
                .short("b")
                .long("bnfc-style")
                .help("Generate an LBNF grammar understood by BNFC (implies --bnf-style)")
                .conflicts_with_all(&["ebnf_style", "antlr_style"]),
        )
        .arg(
            Arg::with_name("bnf_style")
                .short("n")
                .long("bnf-style")
                .help("Generate strict BNF without repetitions, groups, and optionals"),
        )
        .arg(
            Arg::with_name("ebnf_style")
                .short("x")
                .long("ebnf-style")
                .help("Generate an EBNF grammar")
                .conflicts_with("antlr_style"),
        )
        .arg(
            Arg::with_name("antlr_style")
                .short("a")
                .long("antlr-style")
                .help("Generate an ANTLR4 grammar"),
        )
        .arg(
            Arg::with_name("print_roots")
                .short("r")
                .long("print-roots")
                .help("Print the grammar tree roots"),
        )
        .arg(
            Arg::with_name("no_semicolon")
                .short("s")
                .long("no-semicolon")
                .help("Do not end each production rule with a semicolon"),
        )
        .arg(
            Arg::with_name("no_empty_line")
                .short("e")
                .long("no-empty-line")
                .help("Do not separate production rules by an empty line"),
        )
        .arg(
            Arg::with_name("no_serialize")
                .short("g")
                .long("no-serialize")
                .help("Do not print the grammar"),
        )
        .arg(
            Arg::with_name("filter")
                .short("f")
                .long("filter")
                .value_name("NAME")
                .takes_value(true)
                .help("Only print the rules reachable from the given nonterminal"),
        )
        .arg(
            Arg::with_name("grammar_name")
                .long("grammar-name")
                .value_name("NAME")
                .takes_value(true)
                .help("Name of the ANTLR4 grammar"),
        )
        .arg(
            Arg::with_name("entrypoint")
                .long("entrypoint")
                .value_name("NAME")
                .takes_value(true)
                .help("Entry point of the BNFC grammar"),
        )
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Silence all log output"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("The BNF XML files to merge")
                .multiple(true)
                .required(true),
        )
        .get_matches();

    // Configure the logger.
    let level = if matches.is_present("quiet") {
        LevelFilter::Off
    } else {
        match matches.occurrences_of("verbosity") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    let diag = StderrEmitter::new();
    if run(&matches, &diag).is_err() || diag.has_errors() {
        std::process::exit(1);
    }
}

/// Map the command line options onto a configuration.
fn config_from_matches(matches: &ArgMatches) -> Config {
    let style = if matches.is_present("bnfc_style") {
        Style::Bnfc
    } else if matches.is_present("ebnf_style") {
        Style::Ebnf
    } else if matches.is_present("antlr_style") {
        Style::Antlr
    } else {
        Style::Bnf
    };
    let mut config = Config::new(style)
        .strict_bnf(matches.is_present("bnf_style"))
        .terminator(!matches.is_present("no_semicolon"))
        .empty_line(!matches.is_present("no_empty_line"));
    if let Some(name) = matches.value_of("grammar_name") {
        config = config.grammar_name(name);
    }
    // The filter root is the natural entry point of a filtered grammar.
    if let Some(name) = matches.value_of("entrypoint").or(matches.value_of("filter")) {
        config = config.entrypoint(name);
    }
    debug!("Configuration: {:?}", config);
    config
}

fn run(matches: &ArgMatches, diag: &dyn DiagEmitter) -> Result<(), ()> {
    let config = config_from_matches(matches);
    let inputs = matches.values_of("INPUT").into_iter().flatten();
    let grammar = match bnfmerge::load(inputs, &config, diag) {
        Ok(g) => g,
        Err(e) => {
            diag.emit(DiagBuilder::error(e.to_string()));
            return Err(());
        }
    };

    if matches.is_present("print_roots") {
        for line in tree_roots_report(&grammar, &config) {
            println!("{}", line);
        }
    }

    if matches.is_present("no_serialize") {
        return Ok(());
    }
    match matches.value_of("filter") {
        Some(root) => match filter(&grammar, root, diag) {
            Some(filtered) => println!("{}", serialize(&filtered, &config)),
            None => {
                diag.emit(DiagBuilder::error(format!("symbol '{}' not found", root)));
                return Err(());
            }
        },
        None => println!("{}", serialize(&grammar, &config)),
    }
    Ok(())
}

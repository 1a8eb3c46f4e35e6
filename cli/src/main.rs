/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

mod logger;

use clap::Parser;
use datalog::parser_kb_logic::parse_query;
use datalog::reasoning::to_dot::ToDot;
use datalog::{KnowledgeBase, ReasonerConfig, Verbosity};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(
    name = "kb-cli",
    version = "0.1.0",
    author = "Volodymyr Kadzhaia <vkadzhaia@gmail.com>, Pieter Bonte <pieter.bonte@kuleuven.be>",
    about = "A CLI tool for the datalog knowledge base",
    long_about = "Loads facts and rules from a file, chains them to closure, then retracts and queries. Retractions run before queries."
)]
struct Args {
    #[arg(short, long, help = "Knowledge base file to load", value_name = "FILE")]
    file: String,

    #[arg(short, long, help = "Fact pattern to ask, e.g. \"(isa ?x block)\"", value_name = "PATTERN")]
    ask: Vec<String>,

    #[arg(short, long, help = "Fact to retract", value_name = "FACT")]
    retract: Vec<String>,

    #[arg(long, help = "Print the knowledge base after all operations")]
    show: bool,

    #[arg(long, help = "Print the justification graph in DOT format")]
    dot: bool,

    #[arg(long, help = "Print answers as JSON")]
    json: bool,

    #[arg(long, help = "Stop chaining after this many steps per operation", value_name = "STEPS")]
    max_chain_steps: Option<usize>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Trace assertions (-v) or every derivation (-vv)")]
    verbose: u8,
}

#[derive(Serialize)]
struct Answer {
    bindings: BTreeMap<String, String>,
    facts: Vec<String>,
}

#[derive(Serialize)]
struct AskReport {
    query: String,
    answers: Vec<Answer>,
}

fn ask_all(kb: &mut KnowledgeBase, patterns: &[String]) -> Vec<AskReport> {
    let mut reports = Vec::new();
    for text in patterns {
        let query = match parse_query(text, &mut kb.dictionary) {
            Ok(query) => query,
            Err(e) => {
                eprintln!("Skipping query {}: {}", text, e);
                continue;
            }
        };
        let answers = kb
            .ask(&query)
            .iter()
            .map(|(bindings, facts)| Answer {
                bindings: bindings.readable(&kb.dictionary),
                facts: facts
                    .iter()
                    .filter_map(|id| kb.fact(*id))
                    .map(|f| kb.render_statement(&f.statement))
                    .collect(),
            })
            .collect();
        reports.push(AskReport { query: text.clone(), answers });
    }
    reports
}

fn print_reports(reports: &[AskReport]) {
    for report in reports {
        println!("Asking {}", report.query);
        if report.answers.is_empty() {
            println!("  no answers");
        }
        for answer in &report.answers {
            let bindings = answer
                .bindings
                .iter()
                .map(|(var, value)| format!("{}: {}", var, value))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {{{}}} <- {}", bindings, answer.facts.join(", "));
        }
    }
}

fn main() {
    let args = Args::parse();

    let verbosity = Verbosity::from_occurrences(args.verbose);
    logger::init(verbosity);

    let mut config = ReasonerConfig::new().with_verbosity(verbosity);
    if let Some(steps) = args.max_chain_steps {
        config = config.with_max_chain_steps(steps);
    }

    let mut kb = KnowledgeBase::new(config);
    if let Err(e) = kb.load_file(&args.file) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    for text in &args.retract {
        match parse_query(text, &mut kb.dictionary) {
            Ok(item) => kb.retract(&item),
            Err(e) => eprintln!("Skipping retraction {}: {}", text, e),
        }
    }

    let reports = ask_all(&mut kb, &args.ask);
    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        }
    } else {
        print_reports(&reports);
    }

    if args.show {
        print!("{}", kb);
    }
    if args.dot {
        println!("{}", kb.to_dot());
    }
}

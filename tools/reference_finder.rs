/// Reference Finder: lists where a name is used in a dialogue graph.
///
/// Usage:
///   reference_finder <graph.ron> <category> <name> [--ignore-case] [-v]
///   reference_finder <graph.ron> --list [category] [-v]
///
/// Pass `--` before a name that looks like a flag.

use dialogue_refs::core::graph::DialogueGraph;
use dialogue_refs::core::index::NameIndex;
use dialogue_refs::core::search::{MatchMode, ReferenceFinder, SearchCategory};
use std::path::Path;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, PartialEq)]
enum Command {
    Find {
        category: SearchCategory,
        name: String,
        mode: MatchMode,
    },
    List {
        category: Option<SearchCategory>,
    },
}

#[derive(Debug, PartialEq)]
enum Invocation {
    Help,
    Run {
        graph: String,
        command: Command,
        verbose: bool,
    },
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let (graph_path, command, verbose) = match parse_args(&args) {
        Ok(Invocation::Help) => {
            print_usage();
            process::exit(0);
        }
        Ok(Invocation::Run {
            graph,
            command,
            verbose,
        }) => (graph, command, verbose),
        Err(message) => {
            eprintln!("ERROR: {}", message);
            print_usage();
            process::exit(1);
        }
    };

    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let graph = match DialogueGraph::load_from_ron(Path::new(&graph_path)) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("ERROR: Failed to load graph '{}': {}", graph_path, e);
            process::exit(1);
        }
    };
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded {}",
        graph_path
    );

    match command {
        Command::Find {
            category,
            name,
            mode,
        } => print_references(&graph, category, &name, mode),
        Command::List { category } => print_names(&graph, category),
    }
}

/// Split the arguments after the program name. Flags may appear anywhere
/// before `--`; everything after `--` is positional.
fn parse_args(args: &[&str]) -> Result<Invocation, String> {
    if matches!(args.first(), Some(&"-h") | Some(&"--help")) {
        return Ok(Invocation::Help);
    }

    let mut positional = Vec::new();
    let mut verbose = false;
    let mut ignore_case = false;
    let mut rest = args.iter();
    while let Some(&arg) = rest.next() {
        match arg {
            "--" => {
                positional.extend(rest.by_ref().copied());
            }
            "-v" | "--verbose" => verbose = true,
            "--ignore-case" => ignore_case = true,
            _ => positional.push(arg),
        }
    }

    let Some((graph, command_args)) = positional.split_first() else {
        return Err("missing graph path".to_string());
    };
    Ok(Invocation::Run {
        graph: graph.to_string(),
        command: parse_command(command_args, ignore_case)?,
        verbose,
    })
}

fn parse_command(positional: &[&str], ignore_case: bool) -> Result<Command, String> {
    match positional {
        ["--list"] => Ok(Command::List { category: None }),
        ["--list", category] => Ok(Command::List {
            category: Some(category.parse::<SearchCategory>().map_err(|e| format!("{}", e))?),
        }),
        [category, name] => Ok(Command::Find {
            category: category.parse::<SearchCategory>().map_err(|e| format!("{}", e))?,
            name: name.to_string(),
            mode: if ignore_case {
                MatchMode::IgnoreAsciiCase
            } else {
                MatchMode::Exact
            },
        }),
        _ => Err("expected <category> <name> or --list [category]".to_string()),
    }
}

fn print_references(graph: &DialogueGraph, category: SearchCategory, name: &str, mode: MatchMode) {
    let found = ReferenceFinder::new(graph)
        .with_match_mode(mode)
        .find(name, category);

    if found.is_empty() {
        println!("No references to '{}' as {}", name, category);
        return;
    }

    println!("References to '{}' as {}:\n", name, category);
    for id in found.sorted_nodes() {
        if let Some(node) = graph.node(id) {
            let speaker = if node.speaker.is_empty() { "-" } else { node.speaker.as_str() };
            println!("  {} [{}] {}", id, speaker, node.text);
        }
    }
    for id in found.sorted_edges() {
        if let Some(edge) = graph.edge(id) {
            println!("  {} ({} -> {}) {}", id, edge.source, edge.target, edge.text);
        }
    }
    println!(
        "\nSummary: {} nodes, {} edges",
        found.nodes.len(),
        found.edges.len()
    );
}

fn print_names(graph: &DialogueGraph, category: Option<SearchCategory>) {
    let index = NameIndex::build(graph);
    let categories: Vec<SearchCategory> = match category {
        Some(category) => vec![category],
        None => SearchCategory::ALL
            .into_iter()
            .filter(|c| !c.is_composite())
            .collect(),
    };

    for category in categories {
        let names = index.names(category);
        if names.is_empty() {
            continue;
        }
        println!("{}:", category);
        for name in names {
            println!("  {}", name);
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  reference_finder <graph.ron> <category> <name> [--ignore-case] [-v]");
    println!("  reference_finder <graph.ron> --list [category] [-v]");
    println!("  (use -- before a name that starts with '-')");
    println!();
    println!("Categories:");
    for category in SearchCategory::ALL {
        println!("  {}", category);
    }
}

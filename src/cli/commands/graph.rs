//! `partforge graph` command - Show the compatibility graph

use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{load_armory, read_ids_from_stdin};
use crate::cli::output::{effective_format, render_delimited, render_structured, render_table};
use crate::cli::viz::render_adjacency;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct GraphArgs {
    /// Part ids to keep (default: the whole catalog; reads stdin when piped)
    pub ids: Vec<String>,

    /// Print Graphviz DOT instead of an adjacency listing
    #[arg(long)]
    pub dot: bool,
}

#[derive(Debug, Serialize)]
struct GraphReport<'a> {
    nodes: Vec<&'a str>,
    edges: Vec<(&'a str, &'a str)>,
}

pub fn run(args: GraphArgs, global: &GlobalOpts) -> Result<()> {
    let (armory, _) = load_armory(global)?;

    let ids = if args.ids.is_empty() {
        read_ids_from_stdin().unwrap_or_default()
    } else {
        args.ids
    };
    let graph = if ids.is_empty() {
        armory.graph().clone()
    } else {
        for id in ids.iter().filter(|id| !armory.graph().contains(id)) {
            tracing::warn!(id = %id, "ignoring unknown part id");
        }
        armory.graph().induced_subgraph(ids.iter().map(String::as_str))
    };

    if args.dot {
        print!("{}", graph.to_dot());
        return Ok(());
    }

    let format = effective_format(global.format, false);
    let mut nodes: Vec<&str> = graph.parts().map(|p| p.id.as_str()).collect();
    nodes.sort_unstable();
    let report = GraphReport {
        nodes,
        edges: graph.edges(),
    };
    if let Some(doc) = render_structured(&report, format)? {
        println!("{}", doc.trim_end());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = report
        .edges
        .iter()
        .map(|(a, b)| vec![a.to_string(), b.to_string()])
        .collect();
    match format {
        OutputFormat::Csv => print!("{}", render_delimited(&["from", "to"], &rows, b',')?),
        OutputFormat::Tsv => print!("{}", render_delimited(&["from", "to"], &rows, b'\t')?),
        OutputFormat::Table => println!("{}", render_table(&["from", "to"], &rows)),
        _ => {
            println!("{}", render_adjacency(&graph));
            println!();
            println!("{} parts, {} edges", graph.node_count(), graph.edge_count());
        }
    }
    Ok(())
}

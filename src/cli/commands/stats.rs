//! `partforge stats` command - Stat profile of specific parts

use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{format_number, load_armory, read_ids_from_stdin};
use crate::cli::output::{effective_format, render_delimited, render_structured, render_table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{are_compatible, StatProfile};

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Part ids, in order (reads stdin when omitted)
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport<'a> {
    parts: &'a [String],
    profile: StatProfile,
    /// Whether every pair of parts is compatible
    compatible: bool,
}

pub fn run(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let ids = if args.ids.is_empty() {
        read_ids_from_stdin().unwrap_or_default()
    } else {
        args.ids
    };
    if ids.is_empty() {
        return Err(miette::miette!(
            help = "Pass part ids as arguments or pipe them on stdin",
            "No part ids given"
        ));
    }

    let (armory, _) = load_armory(global)?;
    let parts = armory
        .resolve(&ids)
        .map_err(|id| miette::miette!("Unknown part id: {}", id))?;
    let profile = armory.profile_of(&parts);
    let compatible = parts
        .iter()
        .enumerate()
        .all(|(i, a)| parts[i + 1..].iter().all(|b| are_compatible(a, b)));

    let format = effective_format(global.format, false);
    let report = StatsReport {
        parts: &ids,
        profile,
        compatible,
    };
    if let Some(doc) = render_structured(&report, format)? {
        println!("{}", doc.trim_end());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = profile
        .entries()
        .iter()
        .map(|(stat, value)| vec![stat.to_string(), format_number(*value)])
        .collect();
    match format {
        OutputFormat::Csv => print!("{}", render_delimited(&["stat", "value"], &rows, b',')?),
        OutputFormat::Tsv => print!("{}", render_delimited(&["stat", "value"], &rows, b'\t')?),
        OutputFormat::Table => println!("{}", render_table(&["stat", "value"], &rows)),
        _ => {
            for row in &rows {
                println!("{:<14} {}", row[0], row[1]);
            }
        }
    }
    if !compatible {
        tracing::warn!("parts are not pairwise compatible");
    }
    Ok(())
}

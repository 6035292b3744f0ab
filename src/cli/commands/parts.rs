//! `partforge parts` command - List catalog parts

use miette::Result;
use serde::Serialize;

use crate::cli::filters::{PartFilter, PartSort};
use crate::cli::helpers::{format_number, load_armory, truncate_str};
use crate::cli::output::{effective_format, render_delimited, render_structured, render_table};
use crate::cli::args::parse_class;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Part, WeaponClass};

const HEADER: [&str; 5] = ["id", "class", "type", "manufacturer", "modifiers"];

#[derive(clap::Args, Debug)]
pub struct PartsArgs {
    /// Only parts of this weapon class
    #[arg(long, short = 'c', value_parser = parse_class)]
    pub class: Option<WeaponClass>,

    /// Only parts of this type (body, barrel, element, ...)
    #[arg(long = "type", short = 't')]
    pub part_type: Option<String>,

    /// Only parts from this manufacturer
    #[arg(long, short = 'm')]
    pub manufacturer: Option<String>,

    /// Substring of the part id
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, default_value_t = PartSort::Catalog)]
    pub sort: PartSort,

    /// Reverse the sort order
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Show at most this many parts
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Only print the count
    #[arg(long)]
    pub count: bool,
}

impl PartsArgs {
    pub fn filter(&self) -> PartFilter {
        PartFilter {
            class: self.class.clone(),
            part_type: self.part_type.clone(),
            manufacturer: self.manufacturer.clone(),
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PartList<'a> {
    count: usize,
    parts: Vec<&'a Part>,
}

pub fn run(args: PartsArgs, global: &GlobalOpts) -> Result<()> {
    let (armory, _) = load_armory(global)?;
    let filter = args.filter();

    let mut parts: Vec<&Part> = armory.catalog().iter().filter(|p| filter.matches(p)).collect();
    args.sort.apply(&mut parts);
    if args.reverse {
        parts.reverse();
    }
    if let Some(limit) = args.limit {
        parts.truncate(limit);
    }
    tracing::debug!(matched = parts.len(), "listing parts");

    if args.count {
        println!("{}", parts.len());
        return Ok(());
    }

    let format = effective_format(global.format, true);
    let list = PartList {
        count: parts.len(),
        parts,
    };
    if let Some(doc) = render_structured(&list, format)? {
        println!("{}", doc.trim_end());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = list.parts.iter().map(|p| row(p)).collect();
    match format {
        OutputFormat::Csv => print!("{}", render_delimited(&HEADER, &rows, b',')?),
        OutputFormat::Tsv => print!("{}", render_delimited(&HEADER, &rows, b'\t')?),
        OutputFormat::Text => {
            for part in &list.parts {
                println!("{}", part.id);
            }
        }
        _ => {
            if rows.is_empty() {
                println!("No parts found.");
                return Ok(());
            }
            let display: Vec<Vec<String>> = rows
                .into_iter()
                .map(|mut r| {
                    r[4] = truncate_str(&r[4], 48);
                    r
                })
                .collect();
            println!("{}", render_table(&HEADER, &display));
            println!("{} part(s)", list.count);
        }
    }
    Ok(())
}

fn row(part: &Part) -> Vec<String> {
    vec![
        part.id.clone(),
        part.class.to_string(),
        part.part_type.clone(),
        part.manufacturer_str().to_string(),
        modifiers_summary(part),
    ]
}

/// Modifiers as `key=value` pairs separated by spaces
fn modifiers_summary(part: &Part) -> String {
    part.stat_modifiers
        .iter()
        .map(|(k, v)| format!("{}={}", k, format_number(*v)))
        .collect::<Vec<_>>()
        .join(" ")
}

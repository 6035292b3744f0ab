//! `partforge check` command - Load and validate the catalog

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::helpers::load_armory;
use crate::cli::output::{effective_format, render_delimited, render_structured, render_table};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::part::BODY;
use crate::core::{Armory, WeaponClass};

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Fail if a class has no body part
    #[arg(long)]
    pub strict: bool,
}

/// Per-class catalog summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClassSummary {
    class: WeaponClass,
    parts: usize,
    types: Vec<String>,
    elements: usize,
    has_body: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    parts: usize,
    classes: Vec<ClassSummary>,
    manufacturers: Vec<String>,
    edges: usize,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let (armory, _) = load_armory(global)?;
    let report = summarize(&armory);

    let format = effective_format(global.format, false);
    if let Some(doc) = render_structured(&report, format)? {
        println!("{}", doc.trim_end());
    } else {
        let header = ["class", "parts", "types", "elements"];
        let rows: Vec<Vec<String>> = report
            .classes
            .iter()
            .map(|c| {
                vec![
                    c.class.to_string(),
                    c.parts.to_string(),
                    c.types.join(" "),
                    c.elements.to_string(),
                ]
            })
            .collect();
        match format {
            OutputFormat::Csv => print!("{}", render_delimited(&header, &rows, b',')?),
            OutputFormat::Tsv => print!("{}", render_delimited(&header, &rows, b'\t')?),
            OutputFormat::Table => println!("{}", render_table(&header, &rows)),
            _ => print_text(&report, &rows),
        }
    }

    let missing: Vec<String> = report
        .classes
        .iter()
        .filter(|c| !c.has_body)
        .map(|c| c.class.to_string())
        .collect();
    if !missing.is_empty() {
        tracing::warn!(classes = ?missing, "classes without a body part");
        if args.strict {
            return Err(miette::miette!(
                "No body part for class(es): {}",
                missing.join(", ")
            ));
        }
    }
    Ok(())
}

fn summarize(armory: &Armory) -> CheckReport {
    let catalog = armory.catalog();
    let classes = catalog
        .classes()
        .into_iter()
        .map(|class| {
            let parts: Vec<_> = catalog.iter().filter(|p| p.class == class).collect();
            let mut types: Vec<String> = parts.iter().map(|p| p.part_type.clone()).collect();
            types.sort();
            types.dedup();
            ClassSummary {
                parts: parts.len(),
                elements: parts.iter().filter(|p| p.is_element()).count(),
                has_body: types.iter().any(|t| t == BODY),
                types,
                class,
            }
        })
        .collect();

    CheckReport {
        parts: catalog.len(),
        classes,
        manufacturers: catalog.manufacturers().into_iter().map(String::from).collect(),
        edges: armory.graph().edge_count(),
    }
}

fn print_text(report: &CheckReport, rows: &[Vec<String>]) {
    println!(
        "{} Catalog OK: {} parts, {} classes, {} manufacturers",
        style("✓").green(),
        style(report.parts).cyan(),
        report.classes.len(),
        report.manufacturers.len()
    );
    for row in rows {
        println!("  {:<10} {:>4} parts  [{}]", row[0], row[1], row[2]);
    }
    println!("  {} compatibility edges", style(report.edges).cyan());
}

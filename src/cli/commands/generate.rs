//! `partforge generate` command - Search for a build meeting thresholds

use console::style;
use miette::Result;
use serde::Serialize;

use crate::cli::helpers::{format_number, load_armory};
use crate::cli::output::{effective_format, render_delimited, render_structured, render_table};
use crate::cli::viz::{render_adjacency, render_build_schematic, type_style};
use crate::cli::args::parse_class;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Armory, Build, PoolFilter, SearchStats, Stat, Thresholds, WeaponClass};

/// Message printed when the search finds nothing
pub const NO_SOLUTION_MESSAGE: &str = "No valid combinations found matching constraints.";

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Weapon class (Pistol, SMG, Shotgun, Sniper, Rifle)
    #[arg(long, short = 'c', value_parser = parse_class)]
    pub class: WeaponClass,

    /// Preferred manufacturer for the body
    #[arg(long, short = 'm')]
    pub manufacturer: Option<String>,

    /// Require every part to come from the manufacturer
    #[arg(long, requires = "manufacturer")]
    pub match_manufacturer: bool,

    /// Element part id to use
    #[arg(long, short = 'e')]
    pub element: Option<String>,

    /// Minimum weapon damage
    #[arg(long, value_name = "N")]
    pub min_damage: Option<f64>,

    /// Minimum accuracy
    #[arg(long, value_name = "N")]
    pub min_accuracy: Option<f64>,

    /// Minimum fire rate
    #[arg(long, value_name = "N")]
    pub min_fire_rate: Option<f64>,

    /// Minimum magazine size
    #[arg(long, value_name = "N")]
    pub min_mag: Option<f64>,

    /// Maximum reload time in seconds
    #[arg(long, value_name = "SECS")]
    pub max_reload: Option<f64>,
}

impl GenerateArgs {
    /// Thresholds given on the command line
    pub fn thresholds(&self) -> Thresholds {
        [
            (Stat::WeaponDamage, self.min_damage),
            (Stat::Accuracy, self.min_accuracy),
            (Stat::FireRate, self.min_fire_rate),
            (Stat::MagSize, self.min_mag),
            (Stat::ReloadTime, self.max_reload),
        ]
        .into_iter()
        .filter_map(|(stat, value)| value.map(|v| (stat, v)))
        .fold(Thresholds::new(), |t, (stat, value)| t.with(stat, value))
    }

    pub fn pool_filter(&self) -> PoolFilter {
        let mut filter = PoolFilter::new(self.class.clone());
        if let Some(manufacturer) = &self.manufacturer {
            filter = filter.with_manufacturer(manufacturer.clone(), self.match_manufacturer);
        }
        if let Some(element) = &self.element {
            filter = filter.with_element(element.clone());
        }
        filter
    }
}

/// Serialized result of a generate run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReport<'a> {
    found: bool,
    class: &'a WeaponClass,
    thresholds: &'a Thresholds,
    type_order: &'a [String],
    pool_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<&'a Build>,
    search: SearchStats,
}

pub fn run(args: GenerateArgs, global: &GlobalOpts) -> Result<()> {
    let (armory, config) = load_armory(global)?;
    let thresholds = args.thresholds().or(&config.thresholds());
    let generation = armory.generate(&args.pool_filter(), &thresholds);

    let format = effective_format(global.format, false);
    let report = GenerateReport {
        found: generation.outcome.is_found(),
        class: &args.class,
        thresholds: &thresholds,
        type_order: &generation.type_order,
        pool_size: generation.pool_size,
        build: generation.outcome.build(),
        search: generation.stats,
    };
    if let Some(doc) = render_structured(&report, format)? {
        print!("{}", ensure_newline(doc));
        return Ok(());
    }

    let Some(build) = generation.outcome.build() else {
        println!("{}", style(NO_SOLUTION_MESSAGE).yellow());
        return Ok(());
    };

    match format {
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
            print!("{}", render_delimited(&["type", "id"], &part_rows(build), delimiter)?);
        }
        OutputFormat::Table => {
            println!("{}", render_table(&["type", "id"], &part_rows(build)));
            println!("{}", render_table(&["stat", "value"], &stat_rows(build)));
        }
        _ => print_text(build, &armory),
    }
    Ok(())
}

fn part_rows(build: &Build) -> Vec<Vec<String>> {
    build
        .parts
        .iter()
        .map(|p| vec![p.part_type.clone(), p.id.clone()])
        .collect()
}

fn stat_rows(build: &Build) -> Vec<Vec<String>> {
    build
        .profile
        .entries()
        .iter()
        .map(|(stat, value)| vec![stat.to_string(), format_number(*value)])
        .collect()
}

fn print_text(build: &Build, armory: &Armory) {
    println!("{}", style("Valid Combination Found!").green().bold());
    println!();
    for part in &build.parts {
        let label = capitalize(&part.part_type);
        println!(
            "- {}: {}",
            type_style(&part.part_type).apply_to(label),
            style(&part.id).cyan()
        );
    }

    println!();
    println!("{}", style("Stats").bold());
    println!("{}", style("─".repeat(30)).dim());
    for (stat, value) in build.profile.entries() {
        println!("  {:<14} {}", stat.to_string(), format_number(value));
    }

    println!();
    println!("{}", render_build_schematic(build));

    let subgraph = armory
        .graph()
        .induced_subgraph(build.parts.iter().map(|p| p.id.as_str()));
    println!();
    println!(
        "{} ({} edges)",
        style("Compatibility").bold(),
        subgraph.edge_count()
    );
    println!("{}", render_adjacency(&subgraph));
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ensure_newline(mut doc: String) -> String {
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
    doc
}

//! Terminal visualization of builds and compatibility subgraphs
//!
//! Box-drawing output only. Widths are computed on the plain text so that
//! color codes never skew the borders.

use console::Style;

use crate::cli::helpers::truncate_str;
use crate::core::part::{BODY, ELEMENT};
use crate::core::{Build, CompatibilityGraph};

/// Longest part id shown inside a schematic row
pub const MAX_ID_WIDTH: usize = 40;

/// Display color for a part type
pub fn type_style(part_type: &str) -> Style {
    match part_type {
        BODY => Style::new().color256(210),
        "barrel" => Style::new().cyan(),
        "grip" => Style::new().green(),
        "accessory" => Style::new().yellow(),
        ELEMENT => Style::new().magenta(),
        _ => Style::new().white(),
    }
}

/// Render a build as a chain hanging off its body
///
/// # Example Output
/// ```text
/// ┌─────────────────────────────────────┐
/// │  Pistol build                       │
/// │                                     │
/// │  [body]     Jakobs_Pistol_Body      │
/// │   ├─ [barrel]    Jakobs_Barrel      │
/// │   └─ [grip]      Jakobs_Grip        │
/// └─────────────────────────────────────┘
/// ```
pub fn render_build_schematic(build: &Build) -> String {
    let Some(first) = build.parts.first() else {
        return "  (empty build)".to_string();
    };

    let title = format!("{} build", first.class);
    let type_width = build
        .parts
        .iter()
        .map(|p| p.part_type.chars().count() + 2)
        .max()
        .unwrap_or(0);

    // (plain text, styled text) per row
    let mut rows: Vec<(String, String)> = Vec::new();
    let last = build.parts.len() - 1;
    for (i, part) in build.parts.iter().enumerate() {
        let prefix = match i {
            0 => "",
            i if i == last => " └─ ",
            _ => " ├─ ",
        };
        let tag = format!("[{}]", part.part_type);
        let id = truncate_str(&part.id, MAX_ID_WIDTH);
        let plain = format!("{}{:<width$} {}", prefix, tag, id, width = type_width);
        let padding = " ".repeat(type_width.saturating_sub(tag.chars().count()));
        let styled = format!(
            "{}{}{} {}",
            prefix,
            type_style(&part.part_type).apply_to(&tag),
            padding,
            id
        );
        rows.push((plain, styled));
    }

    let content_width = rows
        .iter()
        .map(|(plain, _)| plain.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(format!("┌{}┐", "─".repeat(content_width + 2)));
    lines.push(boxed(&title, &Style::new().bold().apply_to(&title).to_string(), content_width));
    lines.push(boxed("", "", content_width));
    for (plain, styled) in &rows {
        lines.push(boxed(plain, styled, content_width));
    }
    lines.push(format!("└{}┘", "─".repeat(content_width + 2)));
    lines.join("\n")
}

fn boxed(plain: &str, styled: &str, width: usize) -> String {
    let pad = width.saturating_sub(plain.chars().count());
    format!("│  {}{}│", styled, " ".repeat(pad))
}

/// Render the adjacency list of a graph, one part per line
///
/// # Example Output
/// ```text
/// B1 [body]
///   ── R1
///   ── G1
/// R1 [barrel]
///   ── B1
/// ```
pub fn render_adjacency(graph: &CompatibilityGraph) -> String {
    let mut lines = Vec::new();
    let mut parts: Vec<_> = graph.parts().collect();
    parts.sort_by(|a, b| a.id.cmp(&b.id));

    for part in parts {
        lines.push(format!(
            "{} {}",
            part.id,
            type_style(&part.part_type).apply_to(format!("[{}]", part.part_type))
        ));
        let neighbors = graph.neighbors(&part.id);
        if neighbors.is_empty() {
            lines.push("  (no compatible parts)".to_string());
        }
        for neighbor in neighbors {
            lines.push(format!("  ── {}", neighbor.id));
        }
    }

    if lines.is_empty() {
        return "  (empty graph)".to_string();
    }
    lines.join("\n")
}

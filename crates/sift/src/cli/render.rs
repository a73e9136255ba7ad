//! # Rendering Module
//!
//! Turns siftapp values into output strings. Handlers print whatever these functions
//! return; nothing here touches stdout.
//!
//! Text layout is column based. Widths are measured with `unicode-width` before any
//! styling is applied, so taxon names with wide or combining characters still line up,
//! and ANSI codes never count towards a column.
//!
//! JSON output is the serde form of the library types, i.e. exactly the clause wire
//! format the query layer receives.

use super::setup::OutputFormat;
use super::styles;
use serde::Serialize;
use siftapp::chip::Chip;
use siftapp::clause::{Clause, ClauseAction, ClauseValue, FacetKind};
use siftapp::rank::TaxonRank;
use siftapp::search::TaxonMatch;
use siftapp::session::PanelView;
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";
const GAP: &str = "  ";
const INCLUDE_MARKER: &str = "+";
const EXCLUDE_MARKER: &str = "-";

pub fn render_view(view: &PanelView, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => to_json(view),
        OutputFormat::Text => Ok(view_text(view)),
    }
}

pub fn render_candidates(
    candidates: &[TaxonMatch],
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => to_json(candidates),
        OutputFormat::Text => Ok(candidates_text(candidates)),
    }
}

/// Named kinds first, then every rank with its label.
pub fn render_kinds() -> String {
    let named = [
        FacetKind::HasData,
        FacetKind::BushfireRecovery,
        FacetKind::Attribute,
        FacetKind::VernacularGroup,
    ];
    let rows: Vec<[String; 2]> = named
        .iter()
        .map(|kind| [kind.as_str().to_string(), String::new()])
        .chain(
            TaxonRank::ALL
                .iter()
                .map(|rank| [rank.as_str().to_string(), rank.label()]),
        )
        .collect();
    let width = column_width(rows.iter().map(|[name, _]| name.as_str()));

    let mut out = String::new();
    for [name, label] in &rows {
        if label.is_empty() {
            out.push_str(name);
        } else {
            out.push_str(&format!(
                "{}{}{}",
                pad(name, width),
                GAP,
                styles::muted().apply_to(label)
            ));
        }
        out.push('\n');
    }
    out
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value).map(|mut s| {
        s.push('\n');
        s
    })
}

fn view_text(view: &PanelView) -> String {
    let mut out = format!(
        "{} {}\n",
        styles::heading().apply_to("Subject:"),
        view.subject
    );
    if view.clauses.is_empty() {
        out.push_str("No active filters.\n");
        return out;
    }

    out.push_str(&format!(
        "{}\n",
        styles::heading().apply_to(format!("Clauses ({})", view.clauses.len()))
    ));
    out.push_str(&clauses_text(&view.clauses));

    out.push_str(&format!(
        "{}\n",
        styles::heading().apply_to(format!("Chips ({})", view.chips.len()))
    ));
    out.push_str(&chips_text(&view.chips));
    out
}

fn clauses_text(clauses: &[Clause]) -> String {
    let action_width = "INCLUDE".width();
    let kind_width = column_width(clauses.iter().map(|c| c.facet_kind.as_str()));

    clauses
        .iter()
        .map(|clause| {
            let action = match clause.action {
                ClauseAction::Include => "INCLUDE",
                ClauseAction::Exclude => "EXCLUDE",
            };
            format!(
                "{}{}{}{}{}{}\n",
                INDENT,
                styles::action(clause.action).apply_to(pad(action, action_width)),
                GAP,
                pad(clause.facet_kind.as_str(), kind_width),
                GAP,
                value_text(&clause.value)
            )
        })
        .collect()
}

fn chips_text(chips: &[Chip]) -> String {
    let texts: Vec<String> = chips
        .iter()
        .map(|chip| format!("{}: {}", chip.label, chip.value))
        .collect();
    let width = column_width(texts.iter().map(String::as_str));

    chips
        .iter()
        .zip(&texts)
        .map(|(chip, text)| {
            let (marker, style) = if chip.include {
                (INCLUDE_MARKER, styles::include())
            } else {
                (EXCLUDE_MARKER, styles::exclude())
            };
            format!(
                "{}{} {}{}{}\n",
                INDENT,
                style.apply_to(marker),
                pad(text, width),
                GAP,
                styles::muted().apply_to(format!("[{}]", chip.key))
            )
        })
        .collect()
}

fn candidates_text(candidates: &[TaxonMatch]) -> String {
    if candidates.is_empty() {
        return "No matching taxa.\n".to_string();
    }
    let id_width = column_width(candidates.iter().map(|c| c.identifier.as_str()));
    let name_width = column_width(candidates.iter().map(|c| c.display_name.as_str()));

    candidates
        .iter()
        .map(|c| {
            format!(
                "{}{}{}{}{}{}\n",
                INDENT,
                styles::muted().apply_to(pad(&c.identifier, id_width)),
                GAP,
                pad(&c.display_name, name_width),
                GAP,
                c.rank.label()
            )
        })
        .collect()
}

fn value_text(value: &ClauseValue) -> String {
    match value {
        ClauseValue::Scalar(scalar) => scalar.to_string(),
        ClauseValue::Attributes(attrs) => attrs
            .iter()
            .map(|a| format!("{}={}", a.name, a.value))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|cell| cell.width()).max().unwrap_or(0)
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use siftapp::event::FacetEvent;

    fn view() -> PanelView {
        PanelView {
            subject: "arga".to_string(),
            clauses: vec![
                Clause::new(FacetKind::HasData, true, ClauseValue::text("Locus")),
                Clause::new(
                    FacetKind::Rank(TaxonRank::Class),
                    false,
                    ClauseValue::text("Mammalia"),
                ),
                Clause::new(
                    FacetKind::Attribute,
                    true,
                    ClauseValue::attribute("agricultural_industry_icon", "livestock"),
                ),
            ],
            chips: vec![Chip {
                key: "taxon:X1".to_string(),
                label: "Class".to_string(),
                value: "Mammalia".to_string(),
                include: false,
                on_switch: FacetEvent::SwitchTaxon {
                    identifier: "X1".to_string(),
                    include: true,
                },
                on_remove: FacetEvent::RemoveTaxon {
                    identifier: "X1".to_string(),
                },
            }],
        }
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("日本", 5), "日本 ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_text_view_lists_clauses_and_chips() {
        console::set_colors_enabled(false);
        let out = render_view(&view(), OutputFormat::Text).unwrap();
        assert!(out.starts_with("Subject: arga\n"));
        assert!(out.contains("Clauses (3)"));
        assert!(out.contains("  INCLUDE  HAS_DATA   Locus"));
        assert!(out.contains("  EXCLUDE  CLASS      Mammalia"));
        assert!(out.contains("ATTRIBUTE  agricultural_industry_icon=livestock"));
        assert!(out.contains("  - Class: Mammalia  [taxon:X1]"));
    }

    #[test]
    fn test_empty_view() {
        let view = PanelView {
            subject: "arga".to_string(),
            clauses: vec![],
            chips: vec![],
        };
        let out = render_view(&view, OutputFormat::Text).unwrap();
        assert!(out.contains("No active filters."));
    }

    #[test]
    fn test_json_view_is_wire_format() {
        let out = render_view(&view(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["clauses"][1]["facetKind"], "CLASS");
        assert_eq!(parsed["clauses"][1]["action"], "EXCLUDE");
        assert_eq!(parsed["chips"][0]["onRemove"]["type"], "remove_taxon");
    }

    #[test]
    fn test_kinds_include_ranks() {
        console::set_colors_enabled(false);
        let out = render_kinds();
        assert!(out.lines().next().unwrap().starts_with("HAS_DATA"));
        assert!(out.lines().any(|l| l.starts_with("CLASS") && l.ends_with("Class")));
        assert_eq!(out.lines().count(), 4 + TaxonRank::ALL.len());
    }
}

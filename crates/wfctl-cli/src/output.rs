//! Output rendering
//!
//! Replies are printed as JSON indented by four spaces unless table output is
//! requested, in which case nested objects are flattened into dotted keys and
//! drawn as a two-column `Key | Value` table.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use unicode_width::UnicodeWidthStr;
use wfctl_config::TableStyle;

/// How replies are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Json,
    Table(TableStyle),
}

/// One item a command wants printed
#[derive(Debug, Clone, PartialEq)]
pub enum Printable {
    Json(Value),
    Text(String),
}

/// Result of a successful command
///
/// `problems` are per-token issues that did not abort the command (for
/// example a malformed `key:value` pair that was skipped).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub printed: Vec<Printable>,
    pub problems: Vec<String>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn json(value: Value) -> Self {
        Self {
            printed: vec![Printable::Json(value)],
            problems: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            printed: vec![Printable::Text(text.into())],
            problems: Vec::new(),
        }
    }

    pub fn with_problems(mut self, problems: Vec<String>) -> Self {
        self.problems.extend(problems);
        self
    }
}

/// Serialize with four-space indentation
pub fn to_pretty_json(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Flatten nested objects into `(dotted.key, leaf)` rows
///
/// Arrays, scalars and empty objects are leaves. A non-object input becomes a
/// single row with an empty key.
pub fn flatten(value: &Value) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    match value {
        Value::Object(map) if !map.is_empty() => flatten_into(map, "", &mut rows),
        other => rows.push((String::new(), other.clone())),
    }
    rows
}

fn flatten_into(map: &serde_json::Map<String, Value>, parent: &str, rows: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let path = if parent.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", parent, key)
        };

        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(inner, &path, rows),
            leaf => rows.push((path, leaf.clone())),
        }
    }
}

/// Table cell text for a leaf: strings unquoted, everything else as JSON
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

struct Rule {
    left: &'static str,
    fill: &'static str,
    cross: &'static str,
    right: &'static str,
}

struct Rules {
    top: Option<Rule>,
    header: Option<Rule>,
    between: Option<Rule>,
    bottom: Option<Rule>,
    /// Left border, column separator, right border
    cells: (&'static str, &'static str, &'static str),
    pad: usize,
}

const fn rule(left: &'static str, fill: &'static str, cross: &'static str, right: &'static str) -> Option<Rule> {
    Some(Rule {
        left,
        fill,
        cross,
        right,
    })
}

fn rules(style: TableStyle) -> Rules {
    match style {
        TableStyle::FancyGrid => Rules {
            top: rule("╒", "═", "╤", "╕"),
            header: rule("╞", "═", "╪", "╡"),
            between: rule("├", "─", "┼", "┤"),
            bottom: rule("╘", "═", "╧", "╛"),
            cells: ("│", "│", "│"),
            pad: 1,
        },
        TableStyle::Grid => Rules {
            top: rule("+", "-", "+", "+"),
            header: rule("+", "=", "+", "+"),
            between: rule("+", "-", "+", "+"),
            bottom: rule("+", "-", "+", "+"),
            cells: ("|", "|", "|"),
            pad: 1,
        },
        TableStyle::Simple => Rules {
            top: None,
            header: rule("", "-", "  ", ""),
            between: None,
            bottom: None,
            cells: ("", "  ", ""),
            pad: 0,
        },
        TableStyle::Plain => Rules {
            top: None,
            header: None,
            between: None,
            bottom: None,
            cells: ("", "  ", ""),
            pad: 0,
        },
    }
}

fn draw_rule(rule: &Rule, widths: [usize; 2], pad: usize) -> String {
    format!(
        "{}{}{}{}{}",
        rule.left,
        rule.fill.repeat(widths[0] + 2 * pad),
        rule.cross,
        rule.fill.repeat(widths[1] + 2 * pad),
        rule.right
    )
}

fn pad_to(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

/// Widest physical line of a cell, in terminal columns
fn cell_width(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Draw one logical row; multi-line cells span several physical lines
fn draw_row(rules: &Rules, widths: [usize; 2], key: &str, value: &str) -> Vec<String> {
    let pad = " ".repeat(rules.pad);
    let (left, sep, right) = rules.cells;
    let key_lines: Vec<&str> = key.lines().collect();
    let value_lines: Vec<&str> = value.lines().collect();
    let height = key_lines.len().max(value_lines.len()).max(1);

    (0..height)
        .map(|i| {
            let key = key_lines.get(i).copied().unwrap_or("");
            let value = value_lines.get(i).copied().unwrap_or("");
            let line = format!(
                "{left}{pad}{key}{pad}{sep}{pad}{value}{pad}{right}",
                key = pad_to(key, widths[0]),
                value = pad_to(value, widths[1]),
            );
            line.trim_end().to_string()
        })
        .collect()
}

/// Draw `rows` as a `Key | Value` table
pub fn render_table(rows: &[(String, Value)], style: TableStyle) -> String {
    let rules = rules(style);
    let cells: Vec<(String, String)> = rows.iter().map(|(k, v)| (k.clone(), cell(v))).collect();

    let widths = cells.iter().fold(["Key".len(), "Value".len()], |acc, (k, v)| {
        [acc[0].max(cell_width(k)), acc[1].max(cell_width(v))]
    });

    let mut lines = Vec::new();
    if let Some(top) = &rules.top {
        lines.push(draw_rule(top, widths, rules.pad));
    }
    lines.extend(draw_row(&rules, widths, "Key", "Value"));
    if !cells.is_empty() {
        if let Some(header) = &rules.header {
            lines.push(draw_rule(header, widths, rules.pad));
        }
    }
    for (i, (key, value)) in cells.iter().enumerate() {
        if i > 0 {
            if let Some(between) = &rules.between {
                lines.push(draw_rule(between, widths, rules.pad));
            }
        }
        lines.extend(draw_row(&rules, widths, key, value));
    }
    if let Some(bottom) = &rules.bottom {
        lines.push(draw_rule(bottom, widths, rules.pad));
    }

    lines.join("\n")
}

/// Render a JSON reply according to `mode`
///
/// Strings print unquoted in both modes. In table mode an array prints one
/// table per object element, separated by blank lines.
pub fn render_value(value: &Value, mode: OutputMode) -> Result<String, serde_json::Error> {
    match (value, mode) {
        (Value::String(s), _) => Ok(s.clone()),
        (_, OutputMode::Json) => to_pretty_json(value),
        (Value::Object(_), OutputMode::Table(style)) => Ok(render_table(&flatten(value), style)),
        (Value::Array(items), OutputMode::Table(style)) if !items.is_empty() => {
            let parts = items
                .iter()
                .map(|item| match item {
                    Value::Object(_) => Ok(render_table(&flatten(item), style)),
                    other => to_pretty_json(other),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join("\n\n"))
        }
        (other, OutputMode::Table(_)) => to_pretty_json(other),
    }
}

pub fn render(item: &Printable, mode: OutputMode) -> Result<String, serde_json::Error> {
    match item {
        Printable::Text(text) => Ok(text.clone()),
        Printable::Json(value) => render_value(value, mode),
    }
}

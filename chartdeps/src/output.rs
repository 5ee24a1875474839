// chartdeps/src/output.rs
//! Renders dependency reports and repository lists as tables, JSON or YAML.
use std::fmt;

use chartdeps_common::error::Result;
use chartdeps_common::model::RepositoryEntry;
use chartdeps_core::{DependencyStatus, DependencyStatusRow};
use clap::ValueEnum;
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn is_table(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

/// Presentation switches taken from the effective configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    pub colors: bool,
    pub emojis: bool,
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.add_row(Row::new(
        headers
            .iter()
            .map(|h| Cell::new(h).style_spec("b"))
            .collect(),
    ));
    table
}

fn status_cell(status: DependencyStatus, style: Style) -> Cell {
    let text = if style.emojis {
        let glyph = if status.is_satisfied() { "✔" } else { "✗" };
        format!("{glyph} {status}")
    } else {
        status.to_string()
    };
    let cell = Cell::new(&text);
    match (style.colors, status.is_satisfied()) {
        (false, _) => cell,
        (true, true) => cell.style_spec("Fg"),
        (true, false) => cell.style_spec("Fr"),
    }
}

/// Table of dependency rows. `with_namespace` adds the NAMESPACE column used
/// by the shared-dependency listing.
pub fn status_table(rows: &[DependencyStatusRow], with_namespace: bool, style: Style) -> Table {
    let headers: &[&str] = if with_namespace {
        &["NAME", "VERSION", "REPOSITORY", "NAMESPACE", "STATUS"]
    } else {
        &["NAME", "VERSION", "REPOSITORY", "STATUS"]
    };
    let mut table = new_table(headers);
    for row in rows {
        let mut cells = vec![
            Cell::new(&row.name),
            Cell::new(&row.version),
            Cell::new(row.repository.as_deref().unwrap_or_default()),
        ];
        if with_namespace {
            cells.push(Cell::new(row.namespace.as_deref().unwrap_or_default()));
        }
        cells.push(status_cell(row.status, style));
        table.add_row(Row::new(cells));
    }
    table
}

pub fn repository_table(entries: &[RepositoryEntry]) -> Table {
    let mut table = new_table(&["NAME", "URL"]);
    for entry in entries {
        table.add_row(Row::new(vec![Cell::new(&entry.name), Cell::new(&entry.url)]));
    }
    table
}

/// Serializes `items` for the machine-readable formats. An empty slice is
/// always `[]`.
pub fn serialize_list<T: Serialize>(items: &[T], format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(items)?,
        OutputFormat::Yaml => serde_yaml::to_string(items)?.trim_end().to_string(),
        OutputFormat::Table => {
            return Err(chartdeps_common::ChartDepsError::Render(
                "table output is not a serialization format".to_string(),
            ))
        }
    };
    Ok(rendered)
}

/// Writes dependency rows to stdout in the requested format.
pub fn print_rows(
    rows: &[DependencyStatusRow],
    with_namespace: bool,
    format: OutputFormat,
    style: Style,
) -> Result<()> {
    if format.is_table() {
        let table = status_table(rows, with_namespace, style);
        if style.colors {
            table.printstd();
        } else {
            print!("{table}");
        }
    } else {
        println!("{}", serialize_list(rows, format)?);
    }
    Ok(())
}

pub fn print_repositories(entries: &[RepositoryEntry], format: OutputFormat, style: Style) -> Result<()> {
    if format.is_table() {
        let table = repository_table(entries);
        if style.colors {
            table.printstd();
        } else {
            print!("{table}");
        }
    } else {
        println!("{}", serialize_list(entries, format)?);
    }
    Ok(())
}

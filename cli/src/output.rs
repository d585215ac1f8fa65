//! Output formatting

use std::str::FromStr;

use anyhow::Result;
use clap::ValueEnum;
use formsmith_core::{FormField, FormRecord, ValidationIssue};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

#[derive(Tabled)]
struct RecordRow {
    id: i64,
    title: String,
    description: String,
    updated: String,
}

impl From<&FormRecord> for RecordRow {
    fn from(r: &FormRecord) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            description: r.description.clone().unwrap_or_default(),
            updated: r.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "type")]
    kind: String,
    name: String,
    label: String,
    required: String,
    options: usize,
}

#[derive(Tabled)]
struct IssueRow {
    #[tabled(rename = "#")]
    index: usize,
    label: String,
    issue: String,
}

impl OutputFormat {
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        Ok(match self {
            OutputFormat::Yaml => serde_yaml::to_string(data)?,
            OutputFormat::Json | OutputFormat::Table => serde_json::to_string_pretty(data)?,
        })
    }

    pub fn print<T: Serialize>(&self, data: &T) -> Result<()> {
        println!("{}", self.render(data)?);
        Ok(())
    }

    pub fn print_records(&self, records: &[FormRecord]) -> Result<()> {
        match self {
            OutputFormat::Table => println!("{}", record_table(records)),
            _ => self.print(&records)?,
        }
        Ok(())
    }

    pub fn print_fields(&self, fields: &[FormField]) -> Result<()> {
        match self {
            OutputFormat::Table => println!("{}", field_table(fields)),
            _ => self.print(&fields)?,
        }
        Ok(())
    }

    pub fn print_issues(&self, issues: &[ValidationIssue]) -> Result<()> {
        match self {
            OutputFormat::Table => {
                let rows = issues.iter().map(|i| IssueRow {
                    index: i.index,
                    label: i.label.clone(),
                    issue: i.issue.clone(),
                });
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
            _ => self.print(&issues)?,
        }
        Ok(())
    }
}

pub fn record_table(records: &[FormRecord]) -> String {
    Table::new(records.iter().map(RecordRow::from))
        .with(Style::rounded())
        .to_string()
}

pub fn field_table(fields: &[FormField]) -> String {
    let rows = fields.iter().enumerate().map(|(index, f)| FieldRow {
        index,
        kind: f.kind.to_string(),
        name: f.name.clone(),
        label: f.label.clone(),
        required: if f.is_required() { "yes".into() } else { String::new() },
        options: f.options().len(),
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

//! Local draft commands
//!
//! A draft is an exported form document on disk. Each command loads it into
//! a [`SchemaEditor`], applies one edit and writes it back.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use colored::Colorize;
use formsmith_core::{
    export_document, import_document, render_html, FormField, FormsError, OptionIssue, SchemaEditor, SchemaMeta,
    Validator,
};

use super::Context;
use crate::{DraftCommands, FieldEdit};

pub async fn handle(action: DraftCommands, ctx: &Context) -> Result<()> {
    match action {
        DraftCommands::New { file, title, description, submit_label, force } => {
            if file.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", file.display());
            }
            let mut editor = SchemaEditor::new();
            editor.edit_meta(|meta| apply_meta(meta, Some(title), description, submit_label));
            store(&file, &editor)?;
            println!("{} {}", "Created".green(), file.display());
        }
        DraftCommands::Meta { file, title, description, submit_label } => {
            let mut editor = load(&file, ctx.validator())?;
            editor.edit_meta(|meta| apply_meta(meta, title, description, submit_label));
            store(&file, &editor)?;
        }
        DraftCommands::AddField { file, edit } => {
            let mut editor = load(&file, ctx.validator())?;
            let index = add_field(&mut editor, &edit);
            store(&file, &editor)?;
            println!("{} field {} ({})", "Added".green(), index, editor.fields()[index].name);
            report(&editor);
        }
        DraftCommands::SetField { file, index, edit } => {
            let mut editor = load(&file, ctx.validator())?;
            set_field(&mut editor, index, &edit)?;
            store(&file, &editor)?;
            report(&editor);
        }
        DraftCommands::RemoveField { file, index } => {
            let mut editor = load(&file, ctx.validator())?;
            if !editor.remove_field(index) {
                bail!("No field at index {}", index);
            }
            store(&file, &editor)?;
            println!("{} field {}", "Removed".green(), index);
        }
        DraftCommands::AddOption { file, field, label, value } => {
            let mut editor = load(&file, ctx.validator())?;
            let issues = edit_options(&mut editor, field, OptionEdit::Add { label, value })?;
            store(&file, &editor)?;
            warn_rows(&issues);
        }
        DraftCommands::SetOption { file, field, option, label, value } => {
            let mut editor = load(&file, ctx.validator())?;
            let issues = edit_options(&mut editor, field, OptionEdit::Set { index: option, label, value })?;
            store(&file, &editor)?;
            warn_rows(&issues);
        }
        DraftCommands::RemoveOption { file, field, option } => {
            let mut editor = load(&file, ctx.validator())?;
            let issues = edit_options(&mut editor, field, OptionEdit::Remove { index: option })?;
            store(&file, &editor)?;
            warn_rows(&issues);
        }
        DraftCommands::Validate { file } => {
            let editor = load(&file, ctx.validator())?;
            if editor.is_valid() {
                println!("{}", "No validation issues".green());
            } else {
                ctx.format.print_issues(editor.issues())?;
                bail!("{} validation issue(s)", editor.issues().len());
            }
        }
        DraftCommands::Save { file } => {
            let mut editor = load(&file, ctx.validator())?;
            match ctx.service.save(&mut editor).await {
                Ok(record) => {
                    store(&file, &editor)?;
                    println!("{} form {} ({})", "Form saved successfully!".green(), record.id, record.title);
                }
                Err(FormsError::Validation { issues }) => {
                    ctx.format.print_issues(&issues)?;
                    return Err(FormsError::Validation { issues }.into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        DraftCommands::Preview { file } => {
            let editor = load(&file, Validator::default())?;
            print!("{}", render_html(editor.schema()));
        }
    }
    Ok(())
}

fn load(path: &Path, validator: Validator) -> Result<SchemaEditor> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(SchemaEditor::from_schema(import_document(&text)?).with_validator(validator))
}

fn store(path: &Path, editor: &SchemaEditor) -> Result<()> {
    fs::write(path, export_document(editor.schema())?).with_context(|| format!("writing {}", path.display()))
}

fn report(editor: &SchemaEditor) {
    for issue in editor.issues() {
        eprintln!("{} field {}: {}", "warning:".yellow(), issue.index, issue);
    }
}

fn warn_rows(issues: &[(usize, OptionIssue)]) {
    for (row, issue) in issues {
        eprintln!("{} option {} not applied: {}", "warning:".yellow(), row, issue);
    }
}

fn apply_meta(
    meta: SchemaMeta,
    title: Option<String>,
    description: Option<String>,
    submit_label: Option<String>,
) -> SchemaMeta {
    SchemaMeta {
        title: title.unwrap_or(meta.title),
        description: description.or(meta.description),
        submit_label: submit_label.unwrap_or(meta.submit_label),
    }
}

fn apply_edit(field: FormField, edit: &FieldEdit) -> FormField {
    let mut field = field;
    if let Some(kind) = edit.kind {
        field = field.with_kind(kind);
    }
    if let Some(name) = &edit.name {
        field = field.with_name(name.as_str());
    }
    if let Some(label) = &edit.label {
        field = field.with_label(label.as_str());
    }
    if let Some(required) = edit.required {
        field = field.with_required(required);
    }
    if edit.placeholder.is_some() {
        field = field.with_placeholder(edit.placeholder.clone());
    }
    if edit.pattern.is_some() {
        field = field.with_pattern(edit.pattern.clone());
    }
    if edit.default_value.is_some() {
        field = field.with_default_value(edit.default_value);
    }
    field
}

/// Append a generated field, then apply any attributes given on the command line
fn add_field(editor: &mut SchemaEditor, edit: &FieldEdit) -> usize {
    let index = editor.add_field();
    let field = editor.fields()[index].clone();
    editor.update_field(index, apply_edit(field, edit));
    index
}

fn set_field(editor: &mut SchemaEditor, index: usize, edit: &FieldEdit) -> Result<()> {
    let Some(field) = editor.field(index).cloned() else {
        bail!("No field at index {}", index);
    };
    editor.update_field(index, apply_edit(field, edit));
    Ok(())
}

enum OptionEdit {
    Add { label: String, value: String },
    Set { index: usize, label: Option<String>, value: Option<String> },
    Remove { index: usize },
}

/// Edit one field's option rows. Returns the rows left out because of an issue.
fn edit_options(editor: &mut SchemaEditor, field: usize, edit: OptionEdit) -> Result<Vec<(usize, OptionIssue)>> {
    let Some(target) = editor.field(field) else {
        bail!("No field at index {}", field);
    };
    if !target.kind.has_options() {
        bail!("Field {} is a {} field and has no options", field, target.kind);
    }
    let Some(mut options) = editor.option_editor(field) else {
        bail!("No field at index {}", field);
    };
    // A field without options starts with one blank row to fill in
    let starts_blank = target.options().is_empty();

    match edit {
        OptionEdit::Add { label, value } => {
            if !starts_blank {
                options.add_option();
            }
            let row = options.rows().len() - 1;
            options.set_label(row, label);
            options.set_value(row, value);
        }
        OptionEdit::Set { index, label, value } => {
            if index >= target.options().len() {
                bail!("Field {} has no option at index {}", field, index);
            }
            if let Some(label) = label {
                options.set_label(index, label);
            }
            if let Some(value) = value {
                options.set_value(index, value);
            }
        }
        OptionEdit::Remove { index } => {
            if index >= target.options().len() {
                bail!("Field {} has no option at index {}", field, index);
            }
            options.remove_option(index);
        }
    }

    editor.apply_options(field, &options);
    Ok(options
        .issues()
        .iter()
        .enumerate()
        .filter_map(|(row, issue)| issue.map(|i| (row, i)))
        .collect())
}

//! Stored form commands

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use colored::Colorize;
use formsmith_core::{
    export_document, export_filename, import_document, render_html, FormRecord, FormService, SchemaEditor,
    Validator,
};

use super::Context;
use crate::FormCommands;

pub async fn handle(action: FormCommands, ctx: &Context) -> Result<()> {
    match action {
        FormCommands::List => {
            let records = ctx.service.list().await?;
            ctx.format.print_records(&records)?;
        }
        FormCommands::Get { id } => {
            let editor = ctx.service.open(id, ctx.validator()).await?;
            match ctx.format {
                crate::output::OutputFormat::Table => {
                    let schema = editor.schema();
                    println!("{} {}", schema.title.as_str().bold(), format!("#{}", id).as_str().dimmed());
                    if let Some(description) = schema.description.as_deref() {
                        println!("{}", description);
                    }
                    ctx.format.print_fields(editor.fields())?;
                    println!("submit: {}", schema.submit_label);
                }
                _ => ctx.format.print(editor.schema())?,
            }
        }
        FormCommands::Delete { id } => {
            ctx.service.delete(id).await?;
            println!("{} form {}", "Deleted".green(), id);
        }
        FormCommands::Export { id, out } => {
            let path = export_form(&ctx.service, id, &out).await?;
            println!("{} {}", "Exported".green(), path.display());
        }
        FormCommands::Import { file } => {
            let record = import_file(&ctx.service, &file, ctx.validator()).await?;
            println!("{} form {} ({})", "Saved".green(), record.id, record.title);
        }
        FormCommands::Preview { id } => {
            let editor = ctx.service.open(id, Validator::default()).await?;
            print!("{}", render_html(editor.schema()));
        }
    }
    Ok(())
}

/// Write the stored form `id` into `dir`, named after its title
pub async fn export_form(service: &FormService, id: i64, dir: &Path) -> Result<PathBuf> {
    let editor = service.open(id, Validator::default()).await?;
    let path = dir.join(export_filename(&editor.schema().title));
    fs::create_dir_all(dir)?;
    fs::write(&path, export_document(editor.schema())?).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Load a document from disk and save it; documents carrying an id update that form
pub async fn import_file(service: &FormService, path: &Path, validator: Validator) -> Result<FormRecord> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let schema = import_document(&text)?;
    let mut editor = SchemaEditor::from_schema(schema).with_validator(validator);
    Ok(service.save(&mut editor).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::{FormsError, GatewayCall, InMemoryFormGateway};
    use std::sync::Arc;

    const DOC: &str = r#"{
        "title": "Event signup",
        "fields": [
            {"type": "text", "name": "name", "label": "Name", "required": true},
            {"type": "select", "name": "meal", "label": "Meal", "options": [{"label": "Veggie", "value": "veg"}]}
        ],
        "submitLabel": "Register"
    }"#;

    fn service() -> (Arc<InMemoryFormGateway>, FormService) {
        let gateway = Arc::new(InMemoryFormGateway::new());
        (gateway.clone(), FormService::new(gateway))
    }

    #[tokio::test]
    async fn test_import_then_export() {
        let (gateway, service) = service();
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.json");
        fs::write(&source, DOC).unwrap();

        let record = import_file(&service, &source, Validator::strict()).await.unwrap();
        assert!(matches!(gateway.calls()[0], GatewayCall::Create(_)));

        let out = dir.path().join("out");
        let path = export_form(&service, record.id, &out).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "Event_signup.json");

        let exported = import_document(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported.id, Some(record.id));
        assert_eq!(exported.submit_label, "Register");
        assert_eq!(exported.fields.len(), 2);
    }

    #[tokio::test]
    async fn test_reimport_with_id_updates() {
        let (gateway, service) = service();
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.json");
        fs::write(&source, DOC).unwrap();
        let record = import_file(&service, &source, Validator::default()).await.unwrap();

        let path = export_form(&service, record.id, dir.path()).await.unwrap();
        let again = import_file(&service, &path, Validator::default()).await.unwrap();

        assert_eq!(again.id, record.id);
        assert!(matches!(gateway.calls().last(), Some(GatewayCall::Update(id, _)) if *id == record.id));
    }

    #[tokio::test]
    async fn test_import_rejects_bad_documents() {
        let (gateway, service) = service();
        let dir = tempfile::tempdir().unwrap();

        let malformed = dir.path().join("bad.json");
        fs::write(&malformed, "{ not json").unwrap();
        let err = import_file(&service, &malformed, Validator::default()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<FormsError>(), Some(FormsError::ImportParse(_))));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, r#"{"title":"Nothing here"}"#).unwrap();
        let err = import_file(&service, &empty, Validator::default()).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<FormsError>(), Some(FormsError::EmptyForm)));

        assert!(gateway.calls().is_empty());
    }
}

//! Subcommand implementations. All file I/O for the builder lives here.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use formgrid_api::{FormSchema, SavedForm, SCHEMA_FILE_NAME};
use formgrid_kernel::{BuilderError, SchemaBuilder};

use crate::render::render_layout;

/// Read a saved form (structured or flat) into a builder.
pub fn load_builder(path: &Path) -> Result<SchemaBuilder> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form: {:?}", path))?;
    let saved = SavedForm::from_json(&json)
        .with_context(|| format!("Failed to parse form: {:?}", path))?;
    tracing::debug!("Loaded {} fields from {:?}", saved.len(), path);
    Ok(SchemaBuilder::from_saved(saved))
}

/// Write the export unit as `form-schema.json` inside `dir`.
pub fn write_schema(form: &FormSchema, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {:?}", dir))?;
    let path = dir.join(SCHEMA_FILE_NAME);
    let json = form.to_json_pretty()?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write schema: {:?}", path))?;
    Ok(path)
}

pub fn layout(file: &Path) -> Result<()> {
    let builder = load_builder(file)?;
    print!("{}", render_layout(builder.fields()));
    Ok(())
}

pub fn check(file: &Path) -> Result<()> {
    let builder = load_builder(file)?;
    let issues = builder.validate();
    if issues.is_empty() {
        tracing::info!("{} fields, no issues", builder.len());
        return Ok(());
    }
    for issue in &issues {
        let level = if issue.is_blocking() { "error" } else { "warning" };
        println!("{}: {}", level, issue);
    }
    let blocking = issues.iter().filter(|i| i.is_blocking()).count();
    if blocking > 0 {
        bail!("{} blocking validation issue(s) in {:?}", blocking, file);
    }
    Ok(())
}

pub fn export(file: &Path, out: &Path, allow_invalid: bool) -> Result<()> {
    let builder = load_builder(file)?;
    let form = match builder.finalize() {
        Ok(form) => form,
        Err(BuilderError::Invalid(issues)) if allow_invalid => {
            for issue in &issues {
                tracing::warn!("{}", issue);
            }
            builder.export_schema()
        }
        Err(e) => return Err(e).context("Refusing to export an invalid schema"),
    };
    let path = write_schema(&form, out)?;
    tracing::info!("Wrote {} rows to {:?}", form.row_count(), path);
    Ok(())
}

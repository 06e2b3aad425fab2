//! Rules command implementation.
//!
//! This module implements the `rules` command, which infers validation
//! rules for a table from the live database schema or a YAML catalog
//! and prints them in `field: rule|rule` form or as JSON.

use crate::error::CliError;
use crate::utils::{open_database, GlobalOptions};
use clap::{Args, ValueEnum};
use serde_json::json;
use std::io::Write;
use std::path::PathBuf;
use ryokan::rules::{CrudValidator, FieldRules, Mode, NoFilter, Targets};
use ryokan::schema::{SchemaCatalog, SchemaProvider};

/// Show inferred validation rules for a table.
#[derive(Args)]
pub struct RulesCommand {
    /// Table to infer rules for
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Request mode the rules are for
    #[arg(long, value_enum, default_value = "create", ignore_case = true)]
    pub mode: RequestMode,

    /// Sub-entity saved in the same request, as RELATION=TABLE
    #[arg(long, value_name = "RELATION=TABLE")]
    pub sub: Vec<String>,

    /// Read schema metadata from a YAML catalog instead of the database
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Foreign key column to exclude from the inferred rules
    #[arg(long, value_name = "COLUMN")]
    pub exclude_key: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table", ignore_case = true)]
    pub format: OutputFormat,
}

/// Request mode for rule inference.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum RequestMode {
    /// Rules for creating a new record
    Create,
    /// Rules for updating an existing record
    Update,
}

/// Output format for rules command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `field: rules` line per field
    Table,
    /// JSON object keyed by field
    Json,
}

impl RulesCommand {
    /// Execute the rules command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut targets = Targets::new(&self.table);
        for sub in &self.sub {
            let (relation, table) = sub.split_once('=').ok_or_else(|| {
                CliError::InvalidArguments(format!("--sub expects RELATION=TABLE, got {sub}"))
            })?;
            targets = targets.with_sub(relation, table);
        }

        let mode = match self.mode {
            RequestMode::Create => Mode::Create,
            RequestMode::Update => Mode::Update,
        };

        let rules = match &self.catalog {
            Some(path) => {
                let catalog = SchemaCatalog::load(path)?;
                self.infer(&catalog, mode, &targets)?
            }
            None => {
                let db = open_database(global)?;
                self.infer(&db, mode, &targets)?
            }
        };

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        match self.format {
            OutputFormat::Table => {
                for (field, set) in rules.iter() {
                    writeln!(handle, "{field}: {set}")?;
                }
            }
            OutputFormat::Json => {
                let mut object = serde_json::Map::new();
                for (field, set) in rules.iter() {
                    object.insert(field.clone(), json!(set.to_string()));
                }
                writeln!(
                    handle,
                    "{}",
                    serde_json::to_string_pretty(&object)
                        .map_err(|e| CliError::Io(std::io::Error::other(e)))?
                )?;
            }
        }
        Ok(())
    }

    fn infer(
        &self,
        schema: &dyn SchemaProvider,
        mode: Mode,
        targets: &Targets,
    ) -> Result<FieldRules, CliError> {
        let mut validator = CrudValidator::new(schema, mode);
        if let Some(column) = &self.exclude_key {
            validator = validator.with_excluded_key(column.as_str());
        }
        Ok(validator.rules(targets, &NoFilter)?)
    }
}

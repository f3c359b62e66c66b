//! Command-line shell over `flowdesk_core`.
//!
//! # Responsibility
//! - Resolve configuration, open the store once, and dispatch one command.
//! - Print records as deterministic `key=value` lines for scripting.

use clap::{Parser, Subcommand};
use flowdesk_core::db::migrations::latest_version;
use flowdesk_core::demo::seed_demo_data;
use flowdesk_core::{
    core_version, init_logging, AppConfig, Database, DisplayRecord, FieldValue, FlowService,
    FlowUseCases, ProjectService, ProjectUseCases, SqliteFlowRepository, SqliteProjectRepository,
};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "flowdesk", version, about = "Track projects and their recurring flows")]
struct Cli {
    /// Database file (overrides FLOWDESK_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Log level (overrides FLOWDESK_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files (overrides FLOWDESK_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or migrate the database schema.
    Init,
    /// Insert demo projects and flows.
    Seed,
    /// List projects, newest first.
    Projects,
    /// List flows of one project, newest first.
    Flows { project_id: i64 },
    AddProject { name: String },
    /// Recurrence is one of Diaria|Semanal|Mensual|Personalizada.
    AddFlow {
        project_id: i64,
        name: String,
        recurrence: String,
        owner: String,
    },
    ToggleProject { id: i64 },
    ToggleFlow { id: i64 },
    /// Delete a project together with all of its flows.
    DeleteProject { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level.as_deref() {
        config.log_level = flowdesk_core::logging::normalize_level(level)?;
    }
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir;
    }

    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, log_dir)?;
    }
    config.ensure_data_dir()?;

    let mut database = Database::new(config.db_path.clone());
    let result = dispatch(&database, cli.command);
    database.close()?;
    result
}

fn dispatch(database: &Database, command: Command) -> Result<(), Box<dyn Error>> {
    let conn = database.connection()?;
    let projects = || -> Result<_, Box<dyn Error>> {
        Ok(ProjectUseCases::new(ProjectService::new(
            SqliteProjectRepository::try_new(conn)?,
        )))
    };
    let flows = || -> Result<_, Box<dyn Error>> {
        Ok(FlowUseCases::new(FlowService::new(
            SqliteFlowRepository::try_new(conn)?,
        )))
    };

    match command {
        Command::Init => {
            println!("flowdesk_core version={}", core_version());
            println!("schema_version={}", latest_version());
            if let Some(path) = database.path() {
                println!("db_path={}", path.display());
            }
        }
        Command::Seed => {
            let seed = seed_demo_data(conn)?;
            println!(
                "seeded active_project={} inactive_project={} flows={}",
                seed.active_project,
                seed.inactive_project,
                seed.flows.len()
            );
        }
        Command::Projects => projects()?.list_projects()?.iter().for_each(print_record),
        Command::Flows { project_id } => flows()?
            .list_flows_by_project(project_id)?
            .iter()
            .for_each(print_record),
        Command::AddProject { name } => print_record(&projects()?.add_new_project(&name)?),
        Command::AddFlow {
            project_id,
            name,
            recurrence,
            owner,
        } => print_record(&flows()?.add_new_flow(project_id, &name, &recurrence, &owner)?),
        Command::ToggleProject { id } => print_record(&projects()?.change_project_status(id)?),
        Command::ToggleFlow { id } => print_record(&flows()?.change_flow_status(id)?),
        Command::DeleteProject { id } => {
            let removed = projects()?.remove_project(id)?;
            println!("id={id} removed={removed}");
        }
    }

    Ok(())
}

fn print_record(record: &DisplayRecord) {
    println!("{}", format_record(record));
}

/// Renders one record as space-separated `key=value` pairs.
///
/// Text values are double-quoted and escaped.
fn format_record(record: &DisplayRecord) -> String {
    record
        .iter()
        .map(|(key, value)| match value {
            FieldValue::Text(text) => format!("{key}={text:?}"),
            other => format!("{key}={other}"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::format_record;
    use flowdesk_core::{DisplayRecord, FieldValue};

    #[test]
    fn text_values_are_quoted_and_escaped() {
        let mut record = DisplayRecord::new();
        record.insert("id", FieldValue::from(7_i64));
        record.insert("is_active", FieldValue::from(true));
        record.insert("name", FieldValue::from("Proyecto XYZ"));
        record.insert("owner", FieldValue::from("say \"hi\" a=b"));

        assert_eq!(
            format_record(&record),
            r#"id=7 is_active=true name="Proyecto XYZ" owner="say \"hi\" a=b""#
        );
    }

    #[test]
    fn empty_record_renders_empty_line() {
        assert_eq!(format_record(&DisplayRecord::new()), "");
    }
}

//! Flow repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `flows` table, scoped by owning project.
//!
//! # Invariants
//! - `project_id` must reference an existing project; the foreign key
//!   rejects orphans with a storage error.
//! - `project_id` and `created_at` are never rewritten by `update`.
//! - Lists are ordered by `created_at DESC, id DESC`.

use crate::model::flow::{Flow, FlowId, Recurrence};
use crate::model::project::ProjectId;
use crate::model::status::Status;
use crate::repo::{
    ensure_connection_ready, format_timestamp, parse_timestamp, EntityKind, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row, ToSql};

const FLOW_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    name,
    recurrence,
    created_at,
    owner,
    status
FROM flows";

const FLOW_COLUMNS: [&str; 7] = [
    "id",
    "project_id",
    "name",
    "recurrence",
    "created_at",
    "owner",
    "status",
];

/// Repository interface for flow persistence.
pub trait FlowRepository {
    /// Returns every flow across projects, newest first.
    fn get_all(&self) -> RepoResult<Vec<Flow>>;
    /// Returns flows owned by `project_id`, newest first.
    fn get_all_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Flow>>;
    fn get_by_id(&self, id: FlowId) -> RepoResult<Option<Flow>>;
    /// Persists a new row and returns the entity with its assigned id.
    fn create(&self, flow: &Flow) -> RepoResult<Flow>;
    /// Persists `name`, `recurrence`, `owner` and `status`, then returns the
    /// stored row.
    fn update(&self, flow: &Flow) -> RepoResult<Flow>;
    /// Returns whether a row was removed.
    fn delete(&self, id: FlowId) -> RepoResult<bool>;
}

impl<T: FlowRepository + ?Sized> FlowRepository for &T {
    fn get_all(&self) -> RepoResult<Vec<Flow>> {
        (**self).get_all()
    }

    fn get_all_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Flow>> {
        (**self).get_all_by_project(project_id)
    }

    fn get_by_id(&self, id: FlowId) -> RepoResult<Option<Flow>> {
        (**self).get_by_id(id)
    }

    fn create(&self, flow: &Flow) -> RepoResult<Flow> {
        (**self).create(flow)
    }

    fn update(&self, flow: &Flow) -> RepoResult<Flow> {
        (**self).update(flow)
    }

    fn delete(&self, id: FlowId) -> RepoResult<bool> {
        (**self).delete(id)
    }
}

/// SQLite-backed flow repository.
pub struct SqliteFlowRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFlowRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "flows", &FLOW_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_flows(&self, sql: &str, params: &[&dyn ToSql]) -> RepoResult<Vec<Flow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut flows = Vec::new();
        while let Some(row) = rows.next()? {
            flows.push(parse_flow_row(row)?);
        }
        Ok(flows)
    }
}

impl FlowRepository for SqliteFlowRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Flow>> {
        self.query_flows(
            &format!("{FLOW_SELECT_SQL} ORDER BY created_at DESC, id DESC;"),
            &[],
        )
    }

    fn get_all_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Flow>> {
        self.query_flows(
            &format!(
                "{FLOW_SELECT_SQL}
                 WHERE project_id = ?1
                 ORDER BY created_at DESC, id DESC;"
            ),
            &[&project_id],
        )
    }

    fn get_by_id(&self, id: FlowId) -> RepoResult<Option<Flow>> {
        let mut flows = self.query_flows(&format!("{FLOW_SELECT_SQL} WHERE id = ?1;"), &[&id])?;
        Ok(flows.pop())
    }

    fn create(&self, flow: &Flow) -> RepoResult<Flow> {
        self.conn.execute(
            "INSERT INTO flows (
                project_id,
                name,
                recurrence,
                created_at,
                owner,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                flow.project_id,
                flow.name.as_str(),
                flow.recurrence.label(),
                format_timestamp(&flow.created_at),
                flow.owner.as_str(),
                flow.status.as_str(),
            ],
        )?;

        Ok(Flow {
            id: Some(self.conn.last_insert_rowid()),
            ..flow.clone()
        })
    }

    fn update(&self, flow: &Flow) -> RepoResult<Flow> {
        let id = flow.id.ok_or(RepoError::MissingId(EntityKind::Flow))?;
        let changed = self.conn.execute(
            "UPDATE flows
             SET
                name = ?1,
                recurrence = ?2,
                owner = ?3,
                status = ?4
             WHERE id = ?5;",
            params![
                flow.name.as_str(),
                flow.recurrence.label(),
                flow.owner.as_str(),
                flow.status.as_str(),
                id,
            ],
        )?;

        let not_found = RepoError::NotFound {
            entity: EntityKind::Flow,
            id,
        };
        if changed == 0 {
            return Err(not_found);
        }

        self.get_by_id(id)?.ok_or(not_found)
    }

    fn delete(&self, id: FlowId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM flows WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_flow_row(row: &Row<'_>) -> RepoResult<Flow> {
    let recurrence_text: String = row.get("recurrence")?;
    let recurrence = Recurrence::parse_label(&recurrence_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid recurrence `{recurrence_text}` in flows.recurrence"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = Status::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in flows.status"))
    })?;

    let created_text: String = row.get("created_at")?;
    let created_at = parse_timestamp(&created_text, "flows.created_at")?;

    Ok(Flow {
        id: Some(row.get("id")?),
        project_id: row.get("project_id")?,
        name: row.get("name")?,
        recurrence,
        created_at,
        owner: row.get("owner")?,
        status,
    })
}

//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `projects` table.
//! - Keep SQL and row mapping inside the core persistence boundary.
//!
//! # Invariants
//! - Lists are ordered by `created_at DESC, id DESC`.
//! - Deleting a project removes its flows through the foreign-key cascade.
//! - Read paths reject undecodable rows instead of masking them.

use crate::model::project::{Project, ProjectId};
use crate::model::status::Status;
use crate::repo::{
    ensure_connection_ready, format_timestamp, parse_timestamp, EntityKind, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    created_at,
    status
FROM projects";

const PROJECT_COLUMNS: [&str; 4] = ["id", "name", "created_at", "status"];

/// Repository interface for project persistence.
pub trait ProjectRepository {
    /// Returns all projects, newest first.
    fn get_all(&self) -> RepoResult<Vec<Project>>;
    fn get_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Persists a new row and returns the entity with its assigned id.
    ///
    /// Any id already set on `project` is ignored.
    fn create(&self, project: &Project) -> RepoResult<Project>;
    /// Persists `name` and `status` for an existing project and returns the
    /// stored row.
    fn update(&self, project: &Project) -> RepoResult<Project>;
    /// Deletes a project and its flows. Returns whether a row was removed.
    fn delete(&self, id: ProjectId) -> RepoResult<bool>;
}

impl<T: ProjectRepository + ?Sized> ProjectRepository for &T {
    fn get_all(&self) -> RepoResult<Vec<Project>> {
        (**self).get_all()
    }

    fn get_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        (**self).get_by_id(id)
    }

    fn create(&self, project: &Project) -> RepoResult<Project> {
        (**self).create(project)
    }

    fn update(&self, project: &Project) -> RepoResult<Project> {
        (**self).update(project)
    }

    fn delete(&self, id: ProjectId) -> RepoResult<bool> {
        (**self).delete(id)
    }
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for foreign schemas.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "projects", &PROJECT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY created_at DESC, id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn get_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn create(&self, project: &Project) -> RepoResult<Project> {
        self.conn.execute(
            "INSERT INTO projects (name, created_at, status) VALUES (?1, ?2, ?3);",
            params![
                project.name.as_str(),
                format_timestamp(&project.created_at),
                project.status.as_str(),
            ],
        )?;

        Ok(Project {
            id: Some(self.conn.last_insert_rowid()),
            ..project.clone()
        })
    }

    fn update(&self, project: &Project) -> RepoResult<Project> {
        let id = project.id.ok_or(RepoError::MissingId(EntityKind::Project))?;
        let changed = self.conn.execute(
            "UPDATE projects SET name = ?1, status = ?2 WHERE id = ?3;",
            params![project.name.as_str(), project.status.as_str(), id],
        )?;

        let not_found = RepoError::NotFound {
            entity: EntityKind::Project,
            id,
        };
        if changed == 0 {
            return Err(not_found);
        }

        self.get_by_id(id)?.ok_or(not_found)
    }

    fn delete(&self, id: ProjectId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let status_text: String = row.get("status")?;
    let status = Status::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in projects.status"))
    })?;

    let created_text: String = row.get("created_at")?;
    let created_at = parse_timestamp(&created_text, "projects.created_at")?;

    Ok(Project {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        created_at,
        status,
    })
}

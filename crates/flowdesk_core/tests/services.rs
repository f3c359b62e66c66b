use flowdesk_core::db::open_db_in_memory;
use flowdesk_core::{
    EntityKind, ErrorKind, Flow, FlowService, Project, ProjectId, ProjectRepository,
    ProjectService, Recurrence, RepoError, RepoResult, ServiceError, SqliteFlowRepository,
    SqliteProjectRepository, Status, UseCaseError,
};
use std::cell::{Cell, RefCell};

/// In-memory repository that counts writes.
#[derive(Default)]
struct RecordingProjectRepo {
    rows: RefCell<Vec<Project>>,
    writes: Cell<usize>,
}

impl ProjectRepository for RecordingProjectRepo {
    fn get_all(&self) -> RepoResult<Vec<Project>> {
        Ok(self.rows.borrow().clone())
    }

    fn get_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        Ok(self.rows.borrow().iter().find(|p| p.id == Some(id)).cloned())
    }

    fn create(&self, project: &Project) -> RepoResult<Project> {
        self.writes.set(self.writes.get() + 1);
        let mut rows = self.rows.borrow_mut();
        let created = Project {
            id: Some(rows.len() as i64 + 1),
            ..project.clone()
        };
        rows.push(created.clone());
        Ok(created)
    }

    fn update(&self, project: &Project) -> RepoResult<Project> {
        self.writes.set(self.writes.get() + 1);
        let id = project.id.ok_or(RepoError::MissingId(EntityKind::Project))?;
        let mut rows = self.rows.borrow_mut();
        let slot = rows
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or(RepoError::NotFound {
                entity: EntityKind::Project,
                id,
            })?;
        *slot = project.clone();
        Ok(project.clone())
    }

    fn delete(&self, id: ProjectId) -> RepoResult<bool> {
        self.writes.set(self.writes.get() + 1);
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|p| p.id != Some(id));
        Ok(rows.len() != before)
    }
}

#[test]
fn create_project_forces_active_status() {
    let service = ProjectService::new(RecordingProjectRepo::default());

    let project = service.create_project("Proyecto XYZ").unwrap();
    assert_eq!(project.id, Some(1));
    assert_eq!(project.status, Status::Active);
}

#[test]
fn toggle_project_status_flips_both_ways() {
    let service = ProjectService::new(RecordingProjectRepo::default());
    let id = service.create_project("p").unwrap().id.unwrap();

    assert_eq!(service.toggle_project_status(id).unwrap().status, Status::Inactive);
    assert_eq!(service.toggle_project_status(id).unwrap().status, Status::Active);
    assert_eq!(
        service.get_project_by_id(id).unwrap().unwrap().status,
        Status::Active
    );
}

#[test]
fn toggle_missing_project_fails_without_writes() {
    let repo = RecordingProjectRepo::default();
    let service = ProjectService::new(repo);

    let err = service.toggle_project_status(31).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            entity: EntityKind::Project,
            id: 31
        }
    ));
    assert_eq!(err.to_string(), "project not found: 31");
    assert!(service.get_all_projects().unwrap().is_empty());
}

#[test]
fn toggle_missing_project_issues_no_storage_write() {
    let repo = RecordingProjectRepo::default();
    {
        let service = ProjectService::new(&repo);
        service.toggle_project_status(8).unwrap_err();
    }
    assert_eq!(repo.writes.get(), 0);
}

#[test]
fn update_project_maps_repository_not_found() {
    let service = ProjectService::new(RecordingProjectRepo::default());
    let mut project = Project::new("ghost");
    project.id = Some(3);

    assert!(matches!(
        service.update_project(&project).unwrap_err(),
        ServiceError::NotFound { id: 3, .. }
    ));
}

#[test]
fn update_unsaved_project_is_not_found_class() {
    let conn = open_db_in_memory().unwrap();
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());

    let err = service.update_project(&Project::new("unsaved")).unwrap_err();
    assert!(matches!(err, ServiceError::MissingId(EntityKind::Project)));
    assert!(err.is_not_found());
    assert_eq!(UseCaseError::from(err).kind(), ErrorKind::NotFound);
}

#[test]
fn update_unsaved_flow_is_not_found_class() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    let flows = FlowService::new(SqliteFlowRepository::try_new(&conn).unwrap());
    let project_id = projects.create_project("p").unwrap().id.unwrap();

    let unsaved = Flow::new(project_id, "f", Recurrence::Daily, "Ana");
    let err = flows.update_flow(&unsaved).unwrap_err();
    assert!(matches!(err, ServiceError::MissingId(EntityKind::Flow)));
    assert_eq!(UseCaseError::from(err).kind(), ErrorKind::NotFound);
    assert!(flows.get_all_flows().unwrap().is_empty());
}

#[test]
fn flow_service_toggles_against_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectService::new(SqliteProjectRepository::try_new(&conn).unwrap());
    let flows = FlowService::new(SqliteFlowRepository::try_new(&conn).unwrap());

    let project_id = projects.create_project("p").unwrap().id.unwrap();
    let flow = flows
        .create_flow(project_id, "f", Recurrence::Weekly, "Ana")
        .unwrap();
    assert!(flow.is_active());

    let toggled = flows.toggle_flow_status(flow.id.unwrap()).unwrap();
    assert_eq!(toggled.status, Status::Inactive);
    let reloaded = flows.get_flow_by_id(flow.id.unwrap()).unwrap().unwrap();
    assert_eq!(reloaded.status, Status::Inactive);
    assert_eq!(flows.get_flows_by_project(project_id).unwrap().len(), 1);
    assert_eq!(flows.get_all_flows().unwrap().len(), 1);
}

#[test]
fn toggle_missing_flow_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let flows = FlowService::new(SqliteFlowRepository::try_new(&conn).unwrap());

    assert!(matches!(
        flows.toggle_flow_status(12).unwrap_err(),
        ServiceError::NotFound {
            entity: EntityKind::Flow,
            id: 12
        }
    ));
}

#[test]
fn create_flow_for_unknown_project_surfaces_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let flows = FlowService::new(SqliteFlowRepository::try_new(&conn).unwrap());

    assert!(matches!(
        flows
            .create_flow(1234, "orphan", Recurrence::Daily, "o")
            .unwrap_err(),
        ServiceError::Repo(RepoError::Db(_))
    ));
}

use flowdesk_core::db::open_db_in_memory;
use flowdesk_core::demo::seed_demo_data;
use flowdesk_core::{
    FlowRepository, FlowService, FlowUseCases, ProjectRepository, ProjectService,
    ProjectUseCases, Recurrence, SqliteFlowRepository, SqliteProjectRepository, Status,
};

#[test]
fn project_with_two_flows_toggle_and_cascade_delete() {
    let conn = open_db_in_memory().unwrap();
    let projects = ProjectUseCases::new(ProjectService::new(
        SqliteProjectRepository::try_new(&conn).unwrap(),
    ));
    let flows = FlowUseCases::new(FlowService::new(
        SqliteFlowRepository::try_new(&conn).unwrap(),
    ));

    let project = projects.add_new_project("Proyecto XYZ").unwrap();
    assert_eq!(project["status"].as_text(), Some("active"));
    let project_id = project["id"].as_integer().unwrap();

    let first = flows
        .add_new_flow(project_id, "Mandar Forms TC Share Point", "Diaria", "Sebastián")
        .unwrap();
    let second = flows
        .add_new_flow(project_id, "Reminder Teams", "Diaria", "Sebastián")
        .unwrap();
    let first_id = first["id"].as_integer().unwrap();
    let second_id = second["id"].as_integer().unwrap();

    let toggled = flows.change_flow_status(first_id).unwrap();
    assert_eq!(toggled["is_active"].as_bool(), Some(false));

    let listed = flows.list_flows_by_project(project_id).unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed
        .iter()
        .all(|record| record["project_id"].as_integer() == Some(project_id)));
    let active = listed
        .iter()
        .filter(|record| record["is_active"].as_bool() == Some(true))
        .count();
    assert_eq!(active, 1);

    assert!(projects.remove_project(project_id).unwrap());
    assert!(flows.get_flow_details(first_id).unwrap().is_none());
    assert!(flows.get_flow_details(second_id).unwrap().is_none());
    assert!(flows.list_flows_by_project(project_id).unwrap().is_empty());
}

#[test]
fn demo_seed_creates_expected_projects_and_flows() {
    let conn = open_db_in_memory().unwrap();
    let seed = seed_demo_data(&conn).unwrap();

    let projects = SqliteProjectRepository::try_new(&conn).unwrap();
    let flows = SqliteFlowRepository::try_new(&conn).unwrap();

    let active = projects.get_by_id(seed.active_project).unwrap().unwrap();
    assert_eq!(active.name, "Proyecto XYZ");
    assert_eq!(active.status, Status::Active);

    let inactive = projects.get_by_id(seed.inactive_project).unwrap().unwrap();
    assert_eq!(inactive.name, "Proyecto ABC");
    assert_eq!(inactive.status, Status::Inactive);

    let owned = flows.get_all_by_project(seed.active_project).unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned
        .iter()
        .all(|flow| flow.recurrence == Recurrence::Daily && flow.is_active()));
    assert_eq!(seed.flows.len(), 2);
    assert!(flows.get_all_by_project(seed.inactive_project).unwrap().is_empty());
}

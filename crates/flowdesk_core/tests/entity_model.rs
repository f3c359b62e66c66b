use flowdesk_core::{Flow, Project, Recurrence, Status};

#[test]
fn project_new_sets_defaults() {
    let project = Project::new("Proyecto XYZ");

    assert_eq!(project.id, None);
    assert_eq!(project.name, "Proyecto XYZ");
    assert_eq!(project.status, Status::Active);
    assert!(project.is_active());
}

#[test]
fn flow_new_sets_defaults() {
    let flow = Flow::new(7, "Reminder Teams", Recurrence::Weekly, "Ana");

    assert_eq!(flow.id, None);
    assert_eq!(flow.project_id, 7);
    assert_eq!(flow.recurrence, Recurrence::Weekly);
    assert_eq!(flow.owner, "Ana");
    assert!(flow.is_active());
}

#[test]
fn activate_and_deactivate_are_idempotent() {
    let mut project = Project::new("p");
    project.activate();
    project.activate();
    assert_eq!(project.status, Status::Active);

    project.deactivate();
    project.deactivate();
    assert_eq!(project.status, Status::Inactive);
    assert!(!project.is_active());

    let mut flow = Flow::new(1, "f", Recurrence::Daily, "o");
    flow.deactivate();
    flow.activate();
    flow.activate();
    assert!(flow.is_active());
}

#[test]
fn entities_do_not_validate_names() {
    let project = Project::new("");
    assert!(project.name.is_empty());
}

#[test]
fn flow_serialization_uses_persisted_literals() {
    let mut flow = Flow::new(3, "Mandar Forms", Recurrence::Custom, "Luis");
    flow.id = Some(11);
    flow.deactivate();

    let json = serde_json::to_value(&flow).unwrap();
    assert_eq!(json["id"], 11);
    assert_eq!(json["project_id"], 3);
    assert_eq!(json["recurrence"], "Personalizada");
    assert_eq!(json["status"], "inactive");

    let decoded: Flow = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, flow);
}

#[test]
fn recurrence_deserialization_rejects_symbolic_codes() {
    let err = serde_json::from_value::<Recurrence>(serde_json::json!("Daily"));
    assert!(err.is_err());
    let ok: Recurrence = serde_json::from_value(serde_json::json!("Mensual")).unwrap();
    assert_eq!(ok, Recurrence::Monthly);
}

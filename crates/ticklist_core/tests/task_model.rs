use ticklist_core::model::task::normalize_task_title;
use ticklist_core::model::task_list::normalize_list_title;
use ticklist_core::{Task, ValidationError};
use uuid::Uuid;

#[test]
fn task_title_is_trimmed() {
    let title = normalize_task_title("  Buy milk  ").unwrap();
    assert_eq!(title, "Buy milk");
}

#[test]
fn blank_task_title_is_rejected() {
    let err = normalize_task_title("   ").unwrap_err();
    assert_eq!(err, ValidationError::BlankTaskTitle);
    assert_eq!(err.to_string(), "task title must not be blank");
}

#[test]
fn blank_list_title_is_rejected() {
    let err = normalize_list_title("\t\n").unwrap_err();
    assert_eq!(err, ValidationError::BlankListTitle);
    assert_eq!(err.to_string(), "list title must not be blank");
}

#[test]
fn list_title_keeps_inner_whitespace() {
    let title = normalize_list_title(" Weekly shopping ").unwrap();
    assert_eq!(title, "Weekly shopping");
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let list_id = Uuid::parse_str("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").unwrap();
    let task = Task {
        uuid: task_id,
        list_uuid: list_id,
        title: "Buy milk".to_string(),
        note: "2%".to_string(),
        is_complete: false,
        sort_order: 3,
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_360_000,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["uuid"], task_id.to_string());
    assert_eq!(json["list_uuid"], list_id.to_string());
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["note"], "2%");
    assert_eq!(json["is_complete"], false);
    assert_eq!(json["sort_order"], 3);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

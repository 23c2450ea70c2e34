use ticklist_core::db::open_db_in_memory;
use ticklist_core::{
    ListRepository, ListService, ListSort, RepoError, SqliteListRepository, SqliteTaskRepository,
    TaskRepository, ValidationError,
};
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();

    let list = repo.create_list("  Groceries  ").unwrap();
    assert_eq!(list.title, "Groceries");

    let loaded = repo.get_list(list.uuid).unwrap().unwrap();
    assert_eq!(loaded, list);
    assert!(repo.get_list(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn create_with_blank_title_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();

    let err = repo.create_list("   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankListTitle)
    ));
    assert!(repo.list_lists(ListSort::CreatedAt).unwrap().is_empty());
}

#[test]
fn rename_updates_title_and_rejects_stale_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();

    let list = repo.create_list("Groceries").unwrap();
    repo.rename_list(list.uuid, "Weekly shopping").unwrap();
    assert_eq!(
        repo.get_list(list.uuid).unwrap().unwrap().title,
        "Weekly shopping"
    );

    let missing = Uuid::new_v4();
    let err = repo.rename_list(missing, "ghost").unwrap_err();
    assert!(matches!(err, RepoError::ListNotFound(id) if id == missing));
}

#[test]
fn delete_list_cascades_to_owned_tasks() {
    let conn = open_db_in_memory().unwrap();
    let list = {
        let lists = SqliteListRepository::try_new(&conn).unwrap();
        lists.create_list("Groceries").unwrap()
    };
    {
        let tasks = SqliteTaskRepository::try_new(&conn).unwrap();
        tasks.create_task(list.uuid, "milk", "").unwrap();
        tasks.create_task(list.uuid, "bread", "").unwrap();
    }

    let lists = SqliteListRepository::try_new(&conn).unwrap();
    lists.delete_list(list.uuid).unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);

    let err = lists.delete_list(list.uuid).unwrap_err();
    assert!(matches!(err, RepoError::ListNotFound(id) if id == list.uuid));
}

#[test]
fn list_lists_supports_both_sort_modes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();

    let zoo = repo.create_list("zoo trip").unwrap();
    let chores = repo.create_list("Chores").unwrap();
    let groceries = repo.create_list("groceries").unwrap();

    // Identical created_at values are possible within one test run, so
    // pin them to distinct values before asserting creation order.
    for (uuid, created_at) in [(zoo.uuid, 1_000), (chores.uuid, 2_000), (groceries.uuid, 3_000)]
    {
        conn.execute(
            "UPDATE task_lists SET created_at = ?2 WHERE uuid = ?1;",
            rusqlite::params![uuid.to_string(), created_at],
        )
        .unwrap();
    }

    let by_date: Vec<_> = repo
        .list_lists(ListSort::CreatedAt)
        .unwrap()
        .into_iter()
        .map(|list| list.uuid)
        .collect();
    assert_eq!(by_date, vec![zoo.uuid, chores.uuid, groceries.uuid]);

    let by_title: Vec<_> = repo
        .list_lists(ListSort::Title)
        .unwrap()
        .into_iter()
        .map(|list| list.title)
        .collect();
    assert_eq!(by_title, vec!["Chores", "groceries", "zoo trip"]);
}

#[test]
fn complete_all_flips_every_remaining_task_once() {
    let conn = open_db_in_memory().unwrap();
    let lists = SqliteListRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let list = lists.create_list("Groceries").unwrap();
    tasks.create_task(list.uuid, "milk", "").unwrap();
    let bread = tasks.create_task(list.uuid, "bread", "").unwrap();
    tasks.create_task(list.uuid, "eggs", "").unwrap();
    tasks.toggle_complete(bread.uuid).unwrap();

    let flipped = lists.complete_all(list.uuid).unwrap();
    assert_eq!(flipped, 2);
    assert!(tasks
        .list_tasks(list.uuid)
        .unwrap()
        .iter()
        .all(|task| task.is_complete));

    // Second pass has nothing left to flip.
    assert_eq!(lists.complete_all(list.uuid).unwrap(), 0);
}

#[test]
fn complete_all_on_missing_list_fails() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo.complete_all(missing).unwrap_err();
    assert!(matches!(err, RepoError::ListNotFound(id) if id == missing));
}

#[test]
fn completion_summary_reports_counts() {
    let conn = open_db_in_memory().unwrap();
    let lists = SqliteListRepository::try_new(&conn).unwrap();
    let tasks = SqliteTaskRepository::try_new(&conn).unwrap();

    let list = lists.create_list("Groceries").unwrap();
    let summary = lists.completion_summary(list.uuid).unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.remaining, 0);
    assert!(!summary.all_done());

    let milk = tasks.create_task(list.uuid, "milk", "").unwrap();
    tasks.create_task(list.uuid, "bread", "").unwrap();
    tasks.toggle_complete(milk.uuid).unwrap();

    let summary = lists.completion_summary(list.uuid).unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.remaining, 1);
    assert!(!summary.all_done());

    lists.complete_all(list.uuid).unwrap();
    let summary = lists.completion_summary(list.uuid).unwrap();
    assert!(summary.all_done());
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteListRepository::try_new(&conn).unwrap();
    let service = ListService::new(repo);

    let list = service.create_list("From service").unwrap();
    service.rename_list(list.uuid, "Renamed").unwrap();
    assert_eq!(
        service.get_list(list.uuid).unwrap().unwrap().title,
        "Renamed"
    );

    let all = service.list_lists(ListSort::default()).unwrap();
    assert_eq!(all.len(), 1);

    service.delete_list(list.uuid).unwrap();
    assert!(service.list_lists(ListSort::default()).unwrap().is_empty());
}

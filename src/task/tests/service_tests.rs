//! Service orchestration tests over the in-memory repository.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::support::SteppingClock;
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::{TaskDraft, TaskId, TaskTitle};
use crate::task::ports::StatusFilter;
use crate::task::services::{BoardQuery, TaskBoardError, TaskBoardService};

#[fixture]
fn service() -> TaskBoardService {
    TaskBoardService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(SteppingClock::new()),
    )
}

fn draft(title: &str, description: Option<&str>, completed: bool) -> TaskDraft {
    TaskDraft::new(
        TaskTitle::new(title).expect("valid title"),
        description.map(ToOwned::to_owned),
        completed,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_list_shows_newest_first(service: TaskBoardService) {
    service
        .create(draft("First", None, false))
        .await
        .expect("create should succeed");
    service
        .create(draft("Second", None, false))
        .await
        .expect("create should succeed");

    let board = service
        .page(BoardQuery::default())
        .await
        .expect("page should succeed");

    let titles: Vec<&str> = board
        .tasks
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_returns_created_task(service: TaskBoardService) {
    let created = service
        .create(draft("Buy milk", Some("Two litres"), false))
        .await
        .expect("create should succeed");

    let fetched = service.get(created.id()).await.expect("get should succeed");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_id_is_not_found(service: TaskBoardService) {
    let result = service.get(TaskId::new(404)).await;
    assert!(matches!(
        result,
        Err(TaskBoardError::NotFound(id)) if id == TaskId::new(404)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_updates_fields_and_timestamp(service: TaskBoardService) {
    let created = service
        .create(draft("Draft title", None, false))
        .await
        .expect("create should succeed");

    let edited = service
        .edit(created.id(), draft("Final title", Some("Details"), true))
        .await
        .expect("edit should succeed");

    assert_eq!(edited.title().as_str(), "Final title");
    assert_eq!(edited.description(), Some("Details"));
    assert!(edited.completed());
    assert!(edited.updated_at() > created.updated_at());

    let fetched = service.get(created.id()).await.expect("get should succeed");
    assert_eq!(fetched, edited);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_unknown_id_is_not_found(service: TaskBoardService) {
    let result = service.edit(TaskId::new(99), draft("Anything", None, false)).await;
    assert!(matches!(result, Err(TaskBoardError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn toggle_persists_the_flipped_flag(service: TaskBoardService) {
    let created = service
        .create(draft("Walk the dog", None, false))
        .await
        .expect("create should succeed");

    let toggled = service
        .toggle(created.id())
        .await
        .expect("toggle should succeed");
    assert!(toggled.completed());

    let fetched = service.get(created.id()).await.expect("get should succeed");
    assert!(fetched.completed());

    let restored = service
        .toggle(created.id())
        .await
        .expect("second toggle should succeed");
    assert!(!restored.completed());
    assert!(restored.updated_at() > toggled.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_the_task(service: TaskBoardService) {
    let created = service
        .create(draft("Temporary", None, false))
        .await
        .expect("create should succeed");

    let removed = service
        .delete(created.id())
        .await
        .expect("delete should succeed");
    assert_eq!(removed.id(), created.id());

    let result = service.get(created.id()).await;
    assert!(matches!(result, Err(TaskBoardError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_unknown_id_is_not_found(service: TaskBoardService) {
    let result = service.delete(TaskId::new(7)).await;
    assert!(matches!(result, Err(TaskBoardError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_title_or_description_case_insensitively(service: TaskBoardService) {
    service
        .create(draft("Buy groceries", None, false))
        .await
        .expect("create should succeed");
    service
        .create(draft("Call mum", Some("Ask about GROCERIES list"), false))
        .await
        .expect("create should succeed");
    service
        .create(draft("Water plants", None, false))
        .await
        .expect("create should succeed");

    let board = service
        .page(BoardQuery {
            search: "groceries".to_owned(),
            status: None,
            page: None,
        })
        .await
        .expect("page should succeed");

    assert_eq!(board.tasks.len(), 2);
    let notice = board.search_notice.expect("search should emit a notice");
    assert_eq!(notice.matches, 2);
    assert_eq!(notice.query, "groceries");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_with_no_matches_reports_zero(service: TaskBoardService) {
    service
        .create(draft("Water plants", None, false))
        .await
        .expect("create should succeed");

    let board = service
        .page(BoardQuery {
            search: "groceries".to_owned(),
            status: None,
            page: None,
        })
        .await
        .expect("page should succeed");

    assert!(board.tasks.is_empty());
    let notice = board.search_notice.expect("search should emit a notice");
    assert_eq!(notice.matches, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_filter_narrows_results_but_not_stats(service: TaskBoardService) {
    service
        .create(draft("Done thing", None, true))
        .await
        .expect("create should succeed");
    service
        .create(draft("Open thing", None, false))
        .await
        .expect("create should succeed");

    let board = service
        .page(BoardQuery {
            search: String::new(),
            status: Some(StatusFilter::Completed),
            page: None,
        })
        .await
        .expect("page should succeed");

    assert_eq!(board.tasks.len(), 1);
    assert!(board.tasks.iter().all(|task| task.completed()));
    // Aggregate counts always cover the whole store.
    assert_eq!(board.stats.total, 2);
    assert_eq!(board.stats.completed, 1);
    assert_eq!(board.stats.pending, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_notice_counts_before_status_filter(service: TaskBoardService) {
    service
        .create(draft("Buy groceries", None, true))
        .await
        .expect("create should succeed");
    service
        .create(draft("Plan groceries run", None, false))
        .await
        .expect("create should succeed");

    let board = service
        .page(BoardQuery {
            search: "groceries".to_owned(),
            status: Some(StatusFilter::Pending),
            page: None,
        })
        .await
        .expect("page should succeed");

    assert_eq!(board.tasks.len(), 1);
    let notice = board.search_notice.expect("search should emit a notice");
    assert_eq!(notice.matches, 2);
}

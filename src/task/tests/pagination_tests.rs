//! Pagination behaviour over a populated store.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::support::SteppingClock;
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::{TaskDraft, TaskTitle};
use crate::task::services::{BoardQuery, PAGE_SIZE, TaskBoardService};

#[fixture]
fn service() -> TaskBoardService {
    TaskBoardService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(SteppingClock::new()),
    )
}

async fn seed(service: &TaskBoardService, count: usize) {
    for index in 1..=count {
        let draft = TaskDraft::new(
            TaskTitle::new(format!("Task {index}")).expect("valid title"),
            None,
            false,
        );
        service.create(draft).await.expect("create should succeed");
    }
}

fn page_query(page: Option<i64>) -> BoardQuery {
    BoardQuery {
        search: String::new(),
        status: None,
        page,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn thirteen_tasks_split_six_six_one(service: TaskBoardService) {
    seed(&service, 13).await;

    let first = service
        .page(page_query(Some(1)))
        .await
        .expect("page should succeed");
    assert_eq!(first.tasks.len(), 6);
    assert_eq!(first.num_pages, 3);
    assert!(!first.has_previous());
    assert!(first.has_next());

    let second = service
        .page(page_query(Some(2)))
        .await
        .expect("page should succeed");
    assert_eq!(second.tasks.len(), 6);
    assert!(second.has_previous());
    assert!(second.has_next());

    let third = service
        .page(page_query(Some(3)))
        .await
        .expect("page should succeed");
    assert_eq!(third.tasks.len(), 1);
    assert!(third.has_previous());
    assert!(!third.has_next());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pages_do_not_overlap(service: TaskBoardService) {
    seed(&service, 13).await;

    let mut seen = Vec::new();
    for page in 1..=3 {
        let board = service
            .page(page_query(Some(page)))
            .await
            .expect("page should succeed");
        seen.extend(board.tasks.iter().map(|task| task.id()));
    }

    let mut deduplicated = seen.clone();
    deduplicated.sort_unstable();
    deduplicated.dedup();
    assert_eq!(seen.len(), 13);
    assert_eq!(deduplicated.len(), 13);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_page_defaults_to_first(service: TaskBoardService) {
    seed(&service, 13).await;

    let board = service
        .page(page_query(None))
        .await
        .expect("page should succeed");
    assert_eq!(board.page_number, 1);
    assert_eq!(board.tasks.len(), 6);
}

#[rstest]
#[case(0)]
#[case(-3)]
#[case(99)]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_page_clamps_to_last(service: TaskBoardService, #[case] page: i64) {
    seed(&service, 13).await;

    let board = service
        .page(page_query(Some(page)))
        .await
        .expect("page should succeed");
    assert_eq!(board.page_number, 3);
    assert_eq!(board.tasks.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_still_reports_one_page(service: TaskBoardService) {
    let board = service
        .page(page_query(None))
        .await
        .expect("page should succeed");
    assert!(board.tasks.is_empty());
    assert_eq!(board.num_pages, 1);
    assert_eq!(board.page_number, 1);
    assert!(!board.has_previous());
    assert!(!board.has_next());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn exact_multiple_of_page_size_has_no_trailing_page(service: TaskBoardService) {
    let count = usize::try_from(PAGE_SIZE * 2).expect("page size fits usize");
    seed(&service, count).await;

    let board = service
        .page(page_query(Some(2)))
        .await
        .expect("page should succeed");
    assert_eq!(board.num_pages, 2);
    assert_eq!(board.tasks.len(), 6);
    assert!(!board.has_next());
}

//! Domain-focused tests for task field validation and lifecycle rules.

use crate::task::domain::{NewTask, Task, TaskDomainError, TaskDraft, TaskId, TaskTitle};
use rstest::rstest;

use super::support::SteppingClock;

fn draft(title: &str) -> TaskDraft {
    TaskDraft::new(
        TaskTitle::new(title).expect("valid title"),
        None,
        false,
    )
}

fn persisted_task(clock: &SteppingClock) -> Task {
    let new_task = NewTask::from_draft(draft("Water the plants"), clock);
    Task::from_persisted(crate::task::domain::PersistedTaskData {
        id: TaskId::new(1),
        title: new_task.title,
        description: new_task.description,
        completed: new_task.completed,
        created_at: new_task.created_at,
        updated_at: new_task.updated_at,
    })
}

#[rstest]
fn title_accepts_and_trims_valid_input() {
    let title = TaskTitle::new("  Buy milk  ").expect("valid title");
    assert_eq!(title.as_str(), "Buy milk");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn title_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(TaskTitle::new(raw), Err(TaskDomainError::EmptyTitle));
}

#[rstest]
fn title_accepts_exactly_max_length() {
    let raw = "x".repeat(TaskTitle::MAX_LENGTH);
    let title = TaskTitle::new(raw).expect("boundary length is valid");
    assert_eq!(title.as_str().chars().count(), TaskTitle::MAX_LENGTH);
}

#[rstest]
fn title_rejects_over_max_length() {
    let raw = "x".repeat(TaskTitle::MAX_LENGTH + 1);
    assert_eq!(
        TaskTitle::new(raw),
        Err(TaskDomainError::TitleTooLong {
            max: TaskTitle::MAX_LENGTH,
            actual: TaskTitle::MAX_LENGTH + 1,
        })
    );
}

#[rstest]
fn title_length_counts_characters_not_bytes() {
    // 100 two-byte characters fit even though the byte length is 200.
    let raw = "é".repeat(TaskTitle::MAX_LENGTH);
    assert!(TaskTitle::new(raw).is_ok());
}

#[rstest]
fn new_task_stamps_equal_timestamps() {
    let clock = SteppingClock::new();
    let new_task = NewTask::from_draft(draft("Buy milk"), &clock);
    assert_eq!(new_task.created_at, new_task.updated_at);
    assert!(!new_task.completed);
}

#[rstest]
fn apply_replaces_fields_and_refreshes_updated_at() {
    let clock = SteppingClock::new();
    let mut task = persisted_task(&clock);
    let before = task.updated_at();

    task.apply(
        TaskDraft::new(
            TaskTitle::new("Water the garden").expect("valid title"),
            Some("Front beds only".to_owned()),
            true,
        ),
        &clock,
    );

    assert_eq!(task.title().as_str(), "Water the garden");
    assert_eq!(task.description(), Some("Front beds only"));
    assert!(task.completed());
    assert!(task.updated_at() > before);
    assert!(task.updated_at() > task.created_at());
}

#[rstest]
fn toggle_twice_restores_flag_with_strictly_increasing_timestamps() {
    let clock = SteppingClock::new();
    let mut task = persisted_task(&clock);
    let original = task.completed();
    let t0 = task.updated_at();

    task.toggle_completed(&clock);
    let t1 = task.updated_at();
    assert_eq!(task.completed(), !original);
    assert!(t1 > t0);

    task.toggle_completed(&clock);
    let t2 = task.updated_at();
    assert_eq!(task.completed(), original);
    assert!(t2 > t1);
}

#[rstest]
fn status_label_reflects_completion() {
    let clock = SteppingClock::new();
    let mut task = persisted_task(&clock);
    assert_eq!(task.status_label(), "Pending");
    task.toggle_completed(&clock);
    assert_eq!(task.status_label(), "Completed");
}

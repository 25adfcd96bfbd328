//! Application services for the task board.

mod board;

pub use board::{
    BoardPage, BoardQuery, BoardStats, PAGE_SIZE, SearchNotice, TaskBoardError, TaskBoardResult,
    TaskBoardService,
};

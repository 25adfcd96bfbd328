//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};

#[cfg(test)]
mod tests {
    //! Unit tests for pure query helpers.

    use super::repository::like_pattern;

    #[test]
    fn like_pattern_wraps_term_in_wildcards() {
        assert_eq!(like_pattern("groceries"), "%groceries%");
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_done\\"), "%50\\%\\_done\\\\%");
    }
}

//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, one row per task.
    tasks (id) {
        /// Store-assigned identifier (`BIGSERIAL`).
        id -> BigInt,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

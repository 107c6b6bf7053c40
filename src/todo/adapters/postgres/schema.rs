//! Diesel schema for project and task persistence.

diesel::table! {
    /// Projects keyed by identifier; names are unique ignoring case.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Free-form description.
        description -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks, removed together with their project.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Title.
        title -> Text,
        /// Free-form description.
        description -> Text,
        /// Lifecycle status (`TODO`, `DOING`, `DONE`).
        status -> Text,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Completion timestamp, set while done.
        closed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);

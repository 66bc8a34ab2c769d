//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Course-management accounts: admins, instructors and students.
    accounts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed display name, at least three characters.
        name -> Varchar,
        /// Lower-cased email address; unique.
        email -> Varchar,
        /// bcrypt hash of the account password.
        password_hash -> Varchar,
        /// One of `admin`, `instructor` or `student`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
        /// Insertion order; breaks ties between equal `created_at` values.
        seq -> Int8,
    }
}

diesel::table! {
    /// Courses owned by a single instructor.
    courses (id) {
        id -> Uuid,
        title -> Varchar,
        /// Absent rather than blank.
        description -> Nullable<Text>,
        /// Owning instructor; not a foreign key.
        instructor_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        seq -> Int8,
    }
}

diesel::table! {
    /// Student to course relation with a completion flag.
    enrollments (student_id, course_id) {
        student_id -> Uuid,
        course_id -> Uuid,
        completed -> Bool,
        enrolled_at -> Timestamptz,
        /// Identity column breaking ties between equal `enrolled_at` values.
        seq -> Int8,
    }
}

diesel::table! {
    /// Employee directory records.
    employees (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Varchar,
        department -> Varchar,
        /// Whole currency units; always positive.
        salary -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        seq -> Int8,
    }
}

diesel::joinable!(enrollments -> accounts (student_id));

diesel::allow_tables_to_appear_in_same_query!(accounts, courses, enrollments, employees);

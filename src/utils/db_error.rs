//! Classification of database errors.

/// Returns `true` if `e` is a uniqueness violation on `links.code`.
///
/// SQLite reports the offending column in the message
/// (`UNIQUE constraint failed: links.code`) rather than a constraint name.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.message().contains("links.code")
}

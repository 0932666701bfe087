use rusqlite::Connection;

/// Creates the subjects and grades tables when they do not exist yet.
/// Returns whether anything was created.
pub fn ensure(conn: &Connection) -> rusqlite::Result<bool> {
    let existing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('subjects', 'grades')",
        [],
        |row| row.get(0),
    )?;
    if existing == 2 {
        return Ok(false);
    }

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS subjects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS grades (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id INTEGER NOT NULL REFERENCES subjects (id),
            subject_type TEXT NOT NULL,
            grade TEXT NOT NULL,
            date TEXT NOT NULL,
            UNIQUE (subject_id, subject_type, grade, date)
        );",
    )?;
    Ok(true)
}

//! The ledger of every grade seen so far, used to turn a snapshot into the
//! list of grades that are new since the last check.
mod schema;

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::grade::GradeRecord;

#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database at `p`. The connection is closed when
    /// the store is dropped.
    pub fn open(p: impl AsRef<Path>) -> crate::Result<Self> {
        Self::init(Connection::open(p)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> crate::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> crate::Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        if schema::ensure(&conn)? {
            log::info!("Initialized the grade database");
        }
        Ok(Self { conn })
    }

    /// Stores every graded record of `snapshot` not seen before and returns
    /// those records, in snapshot order.
    ///
    /// Runs as one transaction: a storage error rolls back the whole batch so
    /// the next check sees the same grades as new again.
    pub fn reconcile(&mut self, snapshot: &[GradeRecord]) -> crate::Result<Vec<GradeRecord>> {
        let tx = self.conn.transaction()?;
        let mut new_grades = Vec::new();
        let mut duplicates = 0;

        for record in snapshot.iter().filter(|r| r.is_graded()) {
            let subject_id = subject_id(&tx, record.subject())?;
            let result = tx.execute(
                "INSERT INTO grades (subject_id, subject_type, grade, date)
                 VALUES (?1, ?2, ?3, ?4)",
                params![subject_id, record.subject_type(), record.grade(), record.date()],
            );
            match result {
                Ok(_) => new_grades.push(record.clone()),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == ErrorCode::ConstraintViolation =>
                {
                    duplicates += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit()?;
        log::debug!(
            "Reconciled {} records: {} new, {duplicates} already known",
            snapshot.len(),
            new_grades.len()
        );
        if !new_grades.is_empty() {
            log::info!("Stored {} new grades", new_grades.len());
        }
        Ok(new_grades)
    }

    /// The `limit` most recently stored grades, newest first.
    pub fn recent(&self, limit: usize) -> crate::Result<Vec<GradeRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(
            "SELECT s.name, g.subject_type, g.grade, g.date
             FROM grades g
             JOIN subjects s ON g.subject_id = s.id
             ORDER BY g.id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit], |row| {
            Ok(GradeRecord::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

/// Looks the subject up by exact name, creating it on first sight.
fn subject_id(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
    let existing = conn
        .query_row("SELECT id FROM subjects WHERE name = ?1", [name], |row| {
            row.get(0)
        })
        .optional()?;
    if let Some(id) = existing {
        return Ok(id);
    }
    conn.execute("INSERT INTO subjects (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

#[cfg(test)]
impl Store {
    fn count(&self, table: &str) -> i64 {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .unwrap()
    }

    pub fn subject_count(&self) -> i64 {
        self.count("subjects")
    }

    pub fn grade_count(&self) -> i64 {
        self.count("grades")
    }
}

use crate::models::{MeetingLogRow, UserRow};
use crate::Database;
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    /// Insert a user and return its id. Fails if the username is taken.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Meeting logs --

    pub fn insert_meeting_log(&self, room_name: &str, user_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO meeting_logs (room_name, user_id) VALUES (?1, ?2)",
                rusqlite::params![room_name, user_id],
            )?;
            Ok(())
        })
    }

    pub fn count_meeting_logs(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM meeting_logs", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Join history for a room, oldest first.
    pub fn get_meeting_logs_for_room(&self, room_name: &str) -> Result<Vec<MeetingLogRow>> {
        self.with_conn(|conn| query_meeting_logs(conn, room_name))
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn
        .prepare("SELECT id, username, password_hash, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_meeting_logs(conn: &Connection, room_name: &str) -> Result<Vec<MeetingLogRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, room_name, user_id, created_at
         FROM meeting_logs
         WHERE room_name = ?1
         ORDER BY id ASC",
    )?;

    let rows = stmt
        .query_map([room_name], |row| {
            Ok(MeetingLogRow {
                id: row.get(0)?,
                room_name: row.get(1)?,
                user_id: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

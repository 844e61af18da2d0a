/// Database row types. These map directly to SQLite rows.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

pub struct MeetingLogRow {
    pub id: i64,
    pub room_name: String,
    pub user_id: i64,
    pub created_at: String,
}

use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS items (
            idx INTEGER PRIMARY KEY,
            title TEXT NOT NULL UNIQUE,
            vector BLOB NOT NULL
        );

        CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "
    ).map_err(|e| format!("Migration failed: {e}"))
}

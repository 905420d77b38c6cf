use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "recordbook.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE_NAME);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id TEXT PRIMARY KEY,
            registration_number TEXT NOT NULL,
            doc TEXT NOT NULL
        )",
        [],
    )?;

    // Workspaces created before creation stamps were kept lack created_at.
    ensure_students_created_at(&conn)?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_registration ON students(registration_number)",
        [],
    )?;

    Ok(conn)
}

fn ensure_students_created_at(conn: &Connection) -> anyhow::Result<()> {
    if table_has_column(conn, "students", "created_at")? {
        return Ok(());
    }
    conn.execute("ALTER TABLE students ADD COLUMN created_at TEXT", [])?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> anyhow::Result<bool> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    #[test]
    fn created_at_is_added_to_older_workspaces() {
        let workspace = temp_dir("recordbook-db-migrate");
        {
            let conn = Connection::open(workspace.join(DB_FILE_NAME)).expect("open raw db");
            conn.execute(
                "CREATE TABLE students(
                    id TEXT PRIMARY KEY,
                    registration_number TEXT NOT NULL,
                    doc TEXT NOT NULL
                )",
                [],
            )
            .expect("create old table");
            conn.execute(
                "INSERT INTO students(id, registration_number, doc) VALUES('a', '7', '{}')",
                [],
            )
            .expect("insert old row");
        }

        let conn = open_db(&workspace).expect("open_db migrates");
        assert!(table_has_column(&conn, "students", "created_at").expect("pragma"));
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))
            .expect("count");
        assert_eq!(n, 1);

        let _ = std::fs::remove_dir_all(workspace);
    }
}

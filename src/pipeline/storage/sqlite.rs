use crate::config::is_sql_identifier;
use crate::error::{CricketError, Result};
use crate::pipeline::storage::csv_sink::read_rows;
use crate::types::{FlatRow, FLAT_COLUMNS};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

const COLUMN_DEFS: &str = r#"
    match_type   TEXT,
    date         TEXT,
    venue        TEXT,
    team1        TEXT,
    team2        TEXT,
    batting_team TEXT,
    "over"       INTEGER,
    batter       TEXT,
    bowler       TEXT,
    runs_batter  INTEGER,
    runs_extras  INTEGER,
    runs_total   INTEGER,
    extras_type  TEXT,
    wicket_kind  TEXT,
    player_out   TEXT,
    winner       TEXT
"#;

/// SQLite store holding one delivery table per category
pub struct CricketDb {
    conn: Connection,
}

impl CricketDb {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Drop and recreate `table`, then insert every row in one transaction.
    pub fn replace_table(&mut self, table: &str, rows: &[FlatRow]) -> Result<usize> {
        if !is_sql_identifier(table) {
            return Err(CricketError::Config(format!(
                "refusing to create table with name '{}'",
                table
            )));
        }

        let columns = FLAT_COLUMNS
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=FLAT_COLUMNS.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};\nCREATE TABLE {table} ({COLUMN_DEFS});"
        ))?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} ({columns}) VALUES ({placeholders})"
            ))?;
            for row in rows {
                stmt.execute(params![
                    row.match_type,
                    row.date,
                    row.venue,
                    row.team1,
                    row.team2,
                    row.batting_team,
                    row.over,
                    row.batter,
                    row.bowler,
                    row.runs_batter,
                    row.runs_extras,
                    row.runs_total,
                    row.extras_type,
                    row.wicket_kind,
                    row.player_out,
                    row.winner,
                ])?;
            }
        }
        tx.commit()?;

        info!("Loaded {} rows into {}", rows.len(), table);
        Ok(rows.len())
    }

    /// Load a flattened CSV into `table`, replacing its contents.
    /// Empty fields in nullable columns become SQL NULL.
    pub fn load_csv(&mut self, table: &str, csv_path: &Path) -> Result<usize> {
        let rows = read_rows(csv_path)?;
        self.replace_table(table, &rows)
    }

    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn row_count(&self, table: &str) -> Result<i64> {
        if !is_sql_identifier(table) {
            return Err(CricketError::Config(format!("invalid table name '{}'", table)));
        }
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(batter: &str, bowler: &str, runs: i64, wicket: Option<&str>, winner: Option<&str>) -> FlatRow {
        FlatRow {
            match_type: "T20".to_string(),
            date: "2022-11-13".to_string(),
            venue: "Melbourne Cricket Ground".to_string(),
            team1: "Pakistan".to_string(),
            team2: "England".to_string(),
            batting_team: "England".to_string(),
            over: Some(0),
            batter: batter.to_string(),
            bowler: bowler.to_string(),
            runs_batter: runs,
            runs_extras: 0,
            runs_total: runs,
            extras_type: None,
            wicket_kind: wicket.map(str::to_string),
            player_out: wicket.map(|_| batter.to_string()),
            winner: winner.map(str::to_string),
        }
    }

    #[test]
    fn test_replace_table_and_null_semantics() {
        let mut db = CricketDb::open_in_memory().unwrap();
        let rows = vec![
            row("JC Buttler", "Shaheen Shah Afridi", 4, None, Some("England")),
            row("AD Hales", "Shaheen Shah Afridi", 0, Some("bowled"), None),
        ];
        assert!(!db.table_exists("t20_matches").unwrap());
        assert_eq!(db.replace_table("t20_matches", &rows).unwrap(), 2);
        assert!(db.table_exists("t20_matches").unwrap());
        assert_eq!(db.row_count("t20_matches").unwrap(), 2);

        let wickets: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM t20_matches WHERE wicket_kind IS NOT NULL",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(wickets, 1);

        let null_winners: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM t20_matches WHERE winner IS NULL", [], |r| r.get(0))
            .unwrap();
        assert_eq!(null_winners, 1);

        // Replacing drops the old contents
        db.replace_table("t20_matches", &rows[..1]).unwrap();
        assert_eq!(db.row_count("t20_matches").unwrap(), 1);
    }

    #[test]
    fn test_unquoted_over_column_is_queryable() {
        let mut db = CricketDb::open_in_memory().unwrap();
        db.replace_table("test_matches", &[row("a", "b", 0, None, None)]).unwrap();

        let over: i64 = db
            .connection()
            .query_row("SELECT bowler, over FROM test_matches", [], |r| r.get(1))
            .unwrap();
        assert_eq!(over, 0);
    }

    #[test]
    fn test_rejects_bad_table_name() {
        let mut db = CricketDb::open_in_memory().unwrap();
        assert!(db.replace_table("x; DROP TABLE y", &[]).is_err());
    }
}

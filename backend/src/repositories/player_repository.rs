use std::path::{Path, PathBuf};

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OpenFlags};
use serde_json::{Map, Value};

/// One result row, keyed by column name.
pub type Record = Map<String, Value>;

const STAT_COLUMNS: [&str; 7] = [
    "passing_yards",
    "rushing_yards",
    "receiving_yards",
    "passing_tds",
    "rushing_tds",
    "receiving_tds",
    "fantasy_points_ppr",
];

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Columns found in the stats tables when the repository was opened.
///
/// Loader versions disagree on whether the team lives in `recent_team` or `team`,
/// so queries are built against what is actually there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSchema {
    pub players: Vec<String>,
    pub weekly_stats: Vec<String>,
}

impl TableSchema {
    pub fn detect(conn: &Connection) -> rusqlite::Result<Self> {
        Ok(Self {
            players: table_columns(conn, "players")?,
            weekly_stats: table_columns(conn, "weekly_stats")?,
        })
    }

    pub fn players_team(&self) -> Option<&'static str> {
        team_column(&self.players)
    }

    pub fn weekly_team(&self) -> Option<&'static str> {
        team_column(&self.weekly_stats)
    }

    pub fn has_player_column(&self, column: &str) -> bool {
        self.players.iter().any(|c| c == column)
    }

    pub fn has_weekly_column(&self, column: &str) -> bool {
        self.weekly_stats.iter().any(|c| c == column)
    }

    pub fn stat_columns(&self) -> Vec<&'static str> {
        STAT_COLUMNS
            .into_iter()
            .filter(|c| self.has_weekly_column(c))
            .collect()
    }
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn team_column(columns: &[String]) -> Option<&'static str> {
    ["recent_team", "team"]
        .into_iter()
        .find(|candidate| columns.iter().any(|c| c == *candidate))
}

fn team_select(column: Option<&str>) -> String {
    match column {
        Some(column) => format!("{} AS team", column),
        None => "NULL AS team".to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    /// Substring of the player name.
    pub name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub limit: i64,
}

/// Read-only access to the player and weekly stats tables.
pub struct PlayerRepository {
    db_path: PathBuf,
    schema: TableSchema,
}

impl PlayerRepository {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let db_path = db_path.as_ref().to_path_buf();
        let schema = TableSchema::detect(&connect(&db_path)?)?;
        Ok(Self { db_path, schema })
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn search_players(&self, filter: &PlayerFilter) -> Result<Vec<Record>, RepositoryError> {
        let team_col = self.schema.players_team();
        let mut sql = format!(
            "SELECT player_id, player_name, {}, position FROM players WHERE 1=1",
            team_select(team_col)
        );
        let mut params: Vec<SqlValue> = Vec::new();

        if let Some(name) = non_empty(&filter.name) {
            sql.push_str(" AND player_name LIKE ?");
            params.push(SqlValue::Text(format!("%{}%", name)));
        }
        if let Some(position) = non_empty(&filter.position) {
            if self.schema.has_player_column("position") {
                sql.push_str(" AND position = ?");
                params.push(SqlValue::Text(position.to_uppercase()));
            }
        }
        if let (Some(team), Some(column)) = (non_empty(&filter.team), team_col) {
            sql.push_str(&format!(" AND {} = ?", column));
            params.push(SqlValue::Text(team.to_uppercase()));
        }

        sql.push_str(" ORDER BY player_name LIMIT ?");
        params.push(SqlValue::Integer(filter.limit));

        self.query(&sql, params)
    }

    pub fn find_player(&self, player_id: &str) -> Result<Option<Record>, RepositoryError> {
        let sql = format!(
            "SELECT player_id, player_name, {}, position FROM players WHERE player_id = ?",
            team_select(self.schema.players_team())
        );
        let mut rows = self.query(&sql, vec![SqlValue::Text(player_id.to_string())])?;
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    /// Most recent games first.
    pub fn last_games(&self, player_id: &str, limit: i64) -> Result<Vec<Record>, RepositoryError> {
        let schema = &self.schema;
        let mut select = Vec::new();
        let mut order = Vec::new();
        for column in ["season", "week"] {
            if schema.has_weekly_column(column) {
                select.push(column.to_string());
                order.push(format!("{} DESC", column));
            } else {
                select.push(format!("NULL AS {}", column));
            }
        }
        select.push(team_select(schema.weekly_team()));
        select.extend(schema.stat_columns().into_iter().map(str::to_string));

        let mut sql = format!(
            "SELECT {} FROM weekly_stats WHERE player_id = ?",
            select.join(", ")
        );
        if !order.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", order.join(", ")));
        }
        sql.push_str(" LIMIT ?");

        self.query(
            &sql,
            vec![SqlValue::Text(player_id.to_string()), SqlValue::Integer(limit)],
        )
    }

    fn query(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Record>, RepositoryError> {
        let conn = connect(&self.db_path)?;
        let mut stmt = conn.prepare(sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::new();
            for (i, name) in names.iter().enumerate() {
                record.insert(name.clone(), json_value(row.get_ref(i)?));
            }
            records.push(record);
        }
        Ok(records)
    }
}

fn connect(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn json_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::TempDb;
    use super::*;

    fn filter(limit: i64) -> PlayerFilter {
        PlayerFilter {
            limit,
            ..Default::default()
        }
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r["player_name"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn detects_recent_team_and_stat_columns() {
        let db = TempDb::seeded();
        let repo = PlayerRepository::open(&db.path).unwrap();
        let schema = repo.schema();

        assert_eq!(schema.players_team(), Some("recent_team"));
        assert_eq!(schema.weekly_team(), Some("recent_team"));
        assert_eq!(
            schema.stat_columns(),
            vec!["passing_yards", "rushing_yards", "receiving_yards", "fantasy_points_ppr"]
        );
    }

    #[test]
    fn falls_back_to_team_column_or_none() {
        let db = TempDb::new(
            "CREATE TABLE players (player_id TEXT, player_name TEXT, team TEXT, position TEXT);
             CREATE TABLE weekly_stats (player_id TEXT, season INTEGER);",
        );
        let repo = PlayerRepository::open(&db.path).unwrap();
        assert_eq!(repo.schema().players_team(), Some("team"));
        assert_eq!(repo.schema().weekly_team(), None);
        assert!(repo.schema().stat_columns().is_empty());
    }

    #[test]
    fn search_orders_by_name_and_limits() {
        let db = TempDb::seeded();
        let repo = PlayerRepository::open(&db.path).unwrap();

        let all = repo.search_players(&filter(50)).unwrap();
        assert_eq!(
            names(&all),
            vec!["Drake Maye", "Jahmyr Gibbs", "Jayden Reed", "Myles Garrett", "Romeo Doubs"]
        );
        assert_eq!(all[0]["team"], "NE");

        assert_eq!(repo.search_players(&filter(2)).unwrap().len(), 2);
    }

    #[test]
    fn search_filters_combine_and_uppercase() {
        let db = TempDb::seeded();
        let repo = PlayerRepository::open(&db.path).unwrap();

        let receivers = repo
            .search_players(&PlayerFilter {
                team: Some("gb".to_string()),
                position: Some("wr".to_string()),
                ..filter(50)
            })
            .unwrap();
        assert_eq!(names(&receivers), vec!["Jayden Reed", "Romeo Doubs"]);

        let by_name = repo
            .search_players(&PlayerFilter {
                name: Some("ay".to_string()),
                ..filter(50)
            })
            .unwrap();
        assert_eq!(names(&by_name), vec!["Drake Maye", "Jayden Reed"]);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let db = TempDb::seeded();
        let repo = PlayerRepository::open(&db.path).unwrap();
        let result = repo
            .search_players(&PlayerFilter {
                name: Some("  ".to_string()),
                team: Some(String::new()),
                ..filter(50)
            })
            .unwrap();
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn team_filter_is_skipped_without_a_team_column() {
        let db = TempDb::new(
            "CREATE TABLE players (player_id TEXT, player_name TEXT, position TEXT);
             INSERT INTO players VALUES ('1', 'A', 'QB'), ('2', 'B', 'RB');
             CREATE TABLE weekly_stats (player_id TEXT);",
        );
        let repo = PlayerRepository::open(&db.path).unwrap();
        let result = repo
            .search_players(&PlayerFilter {
                team: Some("KC".to_string()),
                ..filter(50)
            })
            .unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0]["team"], Value::Null);
    }

    #[test]
    fn finds_single_player() {
        let db = TempDb::seeded();
        let repo = PlayerRepository::open(&db.path).unwrap();

        let player = repo.find_player("00-0033077").unwrap().unwrap();
        assert_eq!(player["player_name"], "Myles Garrett");
        assert_eq!(player["position"], "DE");
        assert!(repo.find_player("nobody").unwrap().is_none());
    }

    #[test]
    fn last_games_newest_first() {
        let db = TempDb::seeded();
        let repo = PlayerRepository::open(&db.path).unwrap();

        let games = repo.last_games("00-0039075", 3).unwrap();
        let weeks: Vec<(i64, i64)> = games
            .iter()
            .map(|g| (g["season"].as_i64().unwrap(), g["week"].as_i64().unwrap()))
            .collect();
        assert_eq!(weeks, vec![(2024, 3), (2024, 2), (2024, 1)]);
        assert_eq!(games[0]["rushing_yards"], 110.0);
        assert_eq!(games[0]["team"], "DET");
        assert!(!games[0].contains_key("passing_tds"));
    }

    #[test]
    fn last_games_for_unknown_player_is_empty() {
        let db = TempDb::seeded();
        let repo = PlayerRepository::open(&db.path).unwrap();
        assert!(repo.last_games("nobody", 5).unwrap().is_empty());
    }
}

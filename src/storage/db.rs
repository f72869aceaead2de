use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::Serialize;

use crate::core::config;
use crate::core::error::AppResult;
use crate::storage::migrations::run_migrations;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Одно измерение пользователя.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
    /// Telegram ID пользователя
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Имя пользователя (username) в Telegram, если доступно
    pub username: Option<String>,
    /// Размер после бонуса за VIP
    pub size: i64,
}

/// Спонсор из списка `/sponsors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sponsor {
    pub name: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Create a new database connection pool
///
/// Initializes a pool of up to `config::database::POOL_MAX_SIZE` connections and
/// applies pending migrations on the first one.
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
pub fn create_pool(database_path: &str) -> AppResult<DbPool> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder().max_size(config::database::POOL_MAX_SIZE).build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Сохраняет измерение.
pub fn insert_stats(conn: &Connection, stats: &StatsRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO stats (user_id, first_name, last_name, username, size) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            stats.user_id,
            stats.first_name,
            stats.last_name,
            stats.username,
            stats.size
        ],
    )?;
    Ok(())
}

/// Средний размер пользователя за всё время, округлённый к ближайшему целому
/// (половина округляется вверх).
///
/// Возвращает `Ok(None)`, если у пользователя ещё нет измерений.
pub fn average_size_for_user(conn: &Connection, user_id: i64) -> Result<Option<i64>> {
    let (total, count): (i64, i64) = conn.query_row(
        "SELECT COALESCE(SUM(size), 0), COUNT(*) FROM stats WHERE user_id = ?1",
        params![user_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    if count == 0 {
        return Ok(None);
    }
    Ok(Some(round_half_up(total as f64 / count as f64)))
}

/// Number of measurements stored for a user.
pub fn count_stats_for_user(conn: &Connection, user_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM stats WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Добавляет спонсора или обновляет ссылку существующего.
pub fn upsert_sponsor(conn: &Connection, name: &str, url: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO sponsors (name, url) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET url = excluded.url",
        params![name, url],
    )?;
    Ok(())
}

/// Удаляет спонсора. Возвращает `true`, если запись была.
pub fn delete_sponsor(conn: &Connection, name: &str) -> Result<bool> {
    let affected = conn.execute("DELETE FROM sponsors WHERE name = ?1", params![name])?;
    Ok(affected > 0)
}

pub fn get_sponsor(conn: &Connection, name: &str) -> Result<Option<Sponsor>> {
    conn.query_row(
        "SELECT name, url, created_at FROM sponsors WHERE name = ?1",
        params![name],
        |row| {
            Ok(Sponsor {
                name: row.get(0)?,
                url: row.get(1)?,
                created_at: row.get(2)?,
            })
        },
    )
    .optional()
}

/// Все спонсоры в порядке добавления.
pub fn get_all_sponsors(conn: &Connection) -> Result<Vec<Sponsor>> {
    let mut stmt = conn.prepare("SELECT name, url, created_at FROM sponsors ORDER BY created_at, name")?;
    let rows = stmt.query_map([], |row| {
        Ok(Sponsor {
            name: row.get(0)?,
            url: row.get(1)?,
            created_at: row.get(2)?,
        })
    })?;

    rows.collect()
}

//! libSQL backend — async `ProfileStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DatabaseError;
use crate::onboarding::catalog::{ColorKey, Gender, LookingFor, Trait};
use crate::onboarding::model::{PersistedProfile, ProfileUpdate, VibeAnswerRecord};
use crate::store::migrations;
use crate::store::traits::ProfileStore;

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use
/// as long as no explicit transaction is opened on it, so every write here is
/// a single statement.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        Ok(backend)
    }

    /// Get the connection.
    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an RFC 3339 or SQLite datetime string into DateTime<Utc>.
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return ndt.and_utc();
    }
    if let Ok(ndt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return ndt.and_utc();
    }
    DateTime::<Utc>::MIN_UTC
}

/// Convert `Option<String>` to libsql Value.
fn opt_text_owned(s: Option<String>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s),
        None => libsql::Value::Null,
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, DatabaseError> {
    serde_json::to_string(value).map_err(|e| DatabaseError::Serialization(e.to_string()))
}

/// Map a libsql Row to a PersistedProfile.
///
/// Column order matches PROFILE_COLUMNS:
/// 0:id, 1:display_name, 2:birthday, 3:gender, 4:looking_for, 5:bio,
/// 6:aura_colors, 7:traits, 8:onboarding_completed, 9:updated_at
fn row_to_profile(row: &libsql::Row) -> Result<PersistedProfile, DatabaseError> {
    let parse = |e: libsql::Error| DatabaseError::Query(format!("profile row parse: {e}"));

    let id_str: String = row.get(0).map_err(parse)?;
    let display_name: String = row.get(1).map_err(parse)?;
    let birthday_str: Option<String> = row.get::<String>(2).ok();
    let gender_str: Option<String> = row.get::<String>(3).ok();
    let looking_for_str: Option<String> = row.get::<String>(4).ok();
    let bio: String = row.get(5).map_err(parse)?;
    let colors_str: String = row.get(6).map_err(parse)?;
    let traits_str: String = row.get(7).map_err(parse)?;
    let completed: i64 = row.get(8).map_err(parse)?;
    let updated_str: String = row.get(9).map_err(parse)?;

    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DatabaseError::Serialization(format!("profile id {id_str}: {e}")))?;
    let aura_colors: Vec<ColorKey> = serde_json::from_str(&colors_str)
        .map_err(|e| DatabaseError::Serialization(format!("aura_colors: {e}")))?;
    let traits: Vec<Trait> = serde_json::from_str(&traits_str)
        .map_err(|e| DatabaseError::Serialization(format!("traits: {e}")))?;
    let birthday = birthday_str
        .map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT))
        .transpose()
        .map_err(|e| DatabaseError::Serialization(format!("birthday: {e}")))?;
    let gender = gender_str
        .map(|s| s.parse::<Gender>())
        .transpose()
        .map_err(|e| DatabaseError::Serialization(format!("gender: {e}")))?;
    let looking_for = looking_for_str
        .map(|s| s.parse::<LookingFor>())
        .transpose()
        .map_err(|e| DatabaseError::Serialization(format!("looking_for: {e}")))?;

    Ok(PersistedProfile {
        id,
        display_name,
        birthday,
        gender,
        looking_for,
        bio,
        aura_colors,
        traits,
        onboarding_completed: completed != 0,
        updated_at: parse_datetime(&updated_str),
    })
}

fn row_to_answer(row: &libsql::Row) -> Result<VibeAnswerRecord, DatabaseError> {
    let parse = |e: libsql::Error| DatabaseError::Query(format!("answer row parse: {e}"));

    let profile_str: String = row.get(0).map_err(parse)?;
    let key_str: String = row.get(1).map_err(parse)?;
    let answer: String = row.get(2).map_err(parse)?;

    Ok(VibeAnswerRecord {
        profile_id: Uuid::parse_str(&profile_str)
            .map_err(|e| DatabaseError::Serialization(format!("profile id {profile_str}: {e}")))?,
        question_key: key_str.parse().map_err(DatabaseError::Serialization)?,
        answer,
    })
}

// ── Trait implementation ────────────────────────────────────────────

/// Bound parameters per `vibe_answers` row in the batch insert.
const ANSWER_PARAMS: usize = 5;

const PROFILE_COLUMNS: &str = "id, display_name, birthday, gender, looking_for, bio, aura_colors, traits, onboarding_completed, updated_at";

#[async_trait]
impl ProfileStore for LibSqlBackend {
    async fn init_schema(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    // ── Profiles ────────────────────────────────────────────────────

    async fn ensure_profile(&self, id: Uuid) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO profiles (id, created_at, updated_at) VALUES (?1, ?2, ?2)",
                params![id.to_string(), now],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("ensure_profile: {e}")))?;
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<PersistedProfile>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
                params![id.to_string()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_profile: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(row_to_profile(&row)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_profile: {e}"))),
        }
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let count = self
            .conn()
            .execute(
                "UPDATE profiles SET display_name = ?1, birthday = ?2, gender = ?3, looking_for = ?4, bio = ?5, aura_colors = ?6, traits = ?7, onboarding_completed = ?8, updated_at = ?9 WHERE id = ?10",
                params![
                    update.display_name.clone(),
                    opt_text_owned(update.birthday.map(|d| d.format(DATE_FORMAT).to_string())),
                    opt_text_owned(update.gender.map(|g| g.label().to_string())),
                    opt_text_owned(update.looking_for.map(|l| l.label().to_string())),
                    update.bio.clone(),
                    to_json(&update.aura_colors)?,
                    to_json(&update.traits)?,
                    update.onboarding_completed as i64,
                    now,
                    id.to_string(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("update_profile: {e}")))?;

        if count == 0 {
            return Err(DatabaseError::NotFound {
                entity: "profile".into(),
                id: id.to_string(),
            });
        }

        debug!(profile_id = %id, completed = update.onboarding_completed, "Profile updated");
        Ok(())
    }

    // ── Vibe answers ────────────────────────────────────────────────

    async fn insert_answers(&self, rows: &[VibeAnswerRecord]) -> Result<(), DatabaseError> {
        if rows.is_empty() {
            return Ok(());
        }

        // One statement so the batch is atomic without holding a transaction
        // open on the shared connection.
        let now = Utc::now().to_rfc3339();
        let mut placeholders = Vec::with_capacity(rows.len());
        let mut values: Vec<libsql::Value> = Vec::with_capacity(rows.len() * ANSWER_PARAMS);
        for (i, row) in rows.iter().enumerate() {
            let base = i * ANSWER_PARAMS;
            placeholders.push(format!(
                "(?{}, ?{}, ?{}, ?{}, ?{})",
                base + 1,
                base + 2,
                base + 3,
                base + 4,
                base + 5
            ));
            values.push(libsql::Value::Text(Uuid::new_v4().to_string()));
            values.push(libsql::Value::Text(row.profile_id.to_string()));
            values.push(libsql::Value::Text(row.question_key.as_str().to_string()));
            values.push(libsql::Value::Text(row.answer.clone()));
            values.push(libsql::Value::Text(now.clone()));
        }

        let sql = format!(
            "INSERT INTO vibe_answers (id, profile_id, question_key, answer, created_at) VALUES {}
             ON CONFLICT (profile_id, question_key) DO UPDATE SET answer = excluded.answer",
            placeholders.join(", ")
        );
        self.conn()
            .execute(&sql, values)
            .await
            .map_err(|e| DatabaseError::Query(format!("insert_answers: {e}")))?;

        debug!(count = rows.len(), "Vibe answers stored");
        Ok(())
    }

    async fn list_answers(&self, profile_id: Uuid) -> Result<Vec<VibeAnswerRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT profile_id, question_key, answer FROM vibe_answers WHERE profile_id = ?1",
                params![profile_id.to_string()],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_answers: {e}")))?;

        let mut answers = Vec::new();
        loop {
            match rows.next().await {
                Ok(Some(row)) => answers.push(row_to_answer(&row)?),
                Ok(None) => break,
                Err(e) => return Err(DatabaseError::Query(format!("list_answers: {e}"))),
            }
        }
        answers.sort_by_key(|a| a.question_key);
        Ok(answers)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

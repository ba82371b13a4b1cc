//! [`SqliteStore`]: the SQLite implementation of [`FavoritesStore`] and
//! [`PreferenceStore`].

use std::{path::Path, sync::Arc};

use rusqlite::OptionalExtension as _;

use unifest_core::{
  booth::BoothDetail,
  festival::LikedFestival,
  live::{LiveSequence, Publisher},
  preference::OnboardingFlag,
  store::{FavoritesStore, PreferenceStore},
};

use crate::{
  encode::{in_call, RawLikedBooth, RawLikedFestival},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The liked collections and preference slots, backed by a single SQLite file.
///
/// Cloning is cheap; the connection and both publishers are
/// reference-counted, so every clone observes the same collections.
#[derive(Clone)]
pub struct SqliteStore {
  conn:      tokio_rusqlite::Connection,
  festivals: Arc<Publisher<Vec<LikedFestival>>>,
  booths:    Arc<Publisher<Vec<BoothDetail>>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    let (festivals, booths) = conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok((select_festivals(conn)?, select_booths(conn)?))
      })
      .await?;

    tracing::debug!(
      festivals = festivals.len(),
      booths = booths.len(),
      "liked collections loaded"
    );

    Ok(Self {
      conn,
      festivals: Arc::new(Publisher::new(festivals)),
      booths: Arc::new(Publisher::new(booths)),
    })
  }
}

// ─── Queries (run on the connection thread) ──────────────────────────────────

fn select_festivals(
  conn: &rusqlite::Connection,
) -> tokio_rusqlite::Result<Vec<LikedFestival>> {
  let sql = format!(
    "SELECT {} FROM liked_festival ORDER BY festival_id",
    RawLikedFestival::COLUMNS
  );
  let mut stmt = conn.prepare(&sql)?;
  let raws = stmt
    .query_map([], RawLikedFestival::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  raws
    .into_iter()
    .map(|raw| raw.into_record().map_err(in_call))
    .collect()
}

fn select_booths(
  conn: &rusqlite::Connection,
) -> tokio_rusqlite::Result<Vec<BoothDetail>> {
  let sql = format!(
    "SELECT {} FROM liked_booth ORDER BY booth_id",
    RawLikedBooth::COLUMNS
  );
  let mut stmt = conn.prepare(&sql)?;
  let raws = stmt
    .query_map([], RawLikedBooth::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  raws
    .into_iter()
    .map(|raw| raw.into_record().map_err(in_call))
    .collect()
}

// ─── FavoritesStore impl ─────────────────────────────────────────────────────

// Each write re-reads its collection inside the same transaction and
// publishes from the connection thread, so snapshots go out in commit order.

impl FavoritesStore for SqliteStore {
  type Error = crate::Error;

  // ── Festivals ─────────────────────────────────────────────────────────────

  async fn upsert_festival(&self, record: LikedFestival) -> Result<()> {
    let festival_id = record.festival_id;
    let raw = RawLikedFestival::from_record(&record)?;
    let publisher = Arc::clone(&self.festivals);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR REPLACE INTO liked_festival (
             festival_id, school_id, school_name, festival_name, thumbnail,
             region, begin_date, end_date, star_list, latitude, longitude
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            raw.festival_id,
            raw.school_id,
            raw.school_name,
            raw.festival_name,
            raw.thumbnail,
            raw.region,
            raw.begin_date,
            raw.end_date,
            raw.star_list,
            raw.latitude,
            raw.longitude,
          ],
        )?;
        let all = select_festivals(&tx)?;
        tx.commit()?;
        publisher.publish(all);
        Ok(())
      })
      .await?;

    tracing::debug!(festival_id, "liked festival upserted");
    Ok(())
  }

  async fn delete_festival(&self, festival_id: i64) -> Result<bool> {
    let publisher = Arc::clone(&self.festivals);

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "DELETE FROM liked_festival WHERE festival_id = ?1",
          rusqlite::params![festival_id],
        )?;
        if n == 0 {
          return Ok(false);
        }
        let all = select_festivals(&tx)?;
        tx.commit()?;
        publisher.publish(all);
        Ok(true)
      })
      .await?;

    tracing::debug!(festival_id, removed, "liked festival delete");
    Ok(removed)
  }

  async fn clear_festivals(&self) -> Result<usize> {
    let publisher = Arc::clone(&self.festivals);

    let n = self
      .conn
      .call(move |conn| {
        let n = conn.execute("DELETE FROM liked_festival", [])?;
        publisher.publish(Vec::new());
        Ok(n)
      })
      .await?;

    tracing::debug!(removed = n, "liked festivals cleared");
    Ok(n)
  }

  async fn list_festivals(&self) -> Result<Vec<LikedFestival>> {
    Ok(self.conn.call(|conn| select_festivals(conn)).await?)
  }

  fn watch_festivals(&self) -> LiveSequence<Vec<LikedFestival>> {
    self.festivals.subscribe()
  }

  // ── Booths ────────────────────────────────────────────────────────────────

  async fn upsert_booth(&self, booth: BoothDetail) -> Result<()> {
    let booth_id = booth.id;
    let raw = RawLikedBooth::from_record(&booth)?;
    let publisher = Arc::clone(&self.booths);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT OR REPLACE INTO liked_booth (
             booth_id, name, category, description, thumbnail, warning,
             location, latitude, longitude, menus, like_count
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            raw.booth_id,
            raw.name,
            raw.category,
            raw.description,
            raw.thumbnail,
            raw.warning,
            raw.location,
            raw.latitude,
            raw.longitude,
            raw.menus,
            raw.like_count,
          ],
        )?;
        let all = select_booths(&tx)?;
        tx.commit()?;
        publisher.publish(all);
        Ok(())
      })
      .await?;

    tracing::debug!(booth_id, "liked booth upserted");
    Ok(())
  }

  async fn delete_booth(&self, booth_id: i64) -> Result<bool> {
    let publisher = Arc::clone(&self.booths);

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "DELETE FROM liked_booth WHERE booth_id = ?1",
          rusqlite::params![booth_id],
        )?;
        if n == 0 {
          return Ok(false);
        }
        let all = select_booths(&tx)?;
        tx.commit()?;
        publisher.publish(all);
        Ok(true)
      })
      .await?;

    tracing::debug!(booth_id, removed, "liked booth delete");
    Ok(removed)
  }

  async fn contains_booth(&self, booth_id: i64) -> Result<bool> {
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT 1 FROM liked_booth WHERE booth_id = ?1",
                rusqlite::params![booth_id],
                |_| Ok(true),
              )
              .optional()?
              .unwrap_or(false),
          )
        })
        .await?,
    )
  }

  async fn list_booths(&self) -> Result<Vec<BoothDetail>> {
    Ok(self.conn.call(|conn| select_booths(conn)).await?)
  }

  fn watch_booths(&self) -> LiveSequence<Vec<BoothDetail>> {
    self.booths.subscribe()
  }
}

// ─── PreferenceStore impl ────────────────────────────────────────────────────

impl PreferenceStore for SqliteStore {
  type Error = crate::Error;

  async fn get_flag(&self, flag: OnboardingFlag) -> Result<bool> {
    let value = self.get_string(flag.as_ref()).await?;
    Ok(value.as_deref() == Some("true"))
  }

  async fn set_flag(&self, flag: OnboardingFlag, value: bool) -> Result<()> {
    self.set_string(flag.as_ref(), value.to_string()).await
  }

  async fn get_string(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();
    Ok(
      self
        .conn
        .call(move |conn| {
          Ok(
            conn
              .query_row(
                "SELECT value FROM preference WHERE key = ?1",
                rusqlite::params![key],
                |r| r.get(0),
              )
              .optional()?,
          )
        })
        .await?,
    )
  }

  async fn set_string(&self, key: &str, value: String) -> Result<()> {
    let key = key.to_owned();
    tracing::debug!(%key, "preference written");
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO preference (key, value) VALUES (?1, ?2)",
          rusqlite::params![key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

use super::{number_column, timestamp_column, to_millis, LookupStore};
use crate::{
    error::TrackResult,
    records::{OwnerInfo, TrackedRecord},
    types::MobileNumber,
};
use rusqlite::{params, OptionalExtension};

fn tracked_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<TrackedRecord> {
    Ok(TrackedRecord {
        number: number_column(row, 0)?,
        operator: row.get(1)?,
        circle: row.get(2)?,
        owner_name: row.get(3)?,
        owner_address: row.get(4)?,
        tracked_at: timestamp_column(row, 5)?,
    })
}

impl LookupStore {
    // ── Tracked numbers ────────────────────────────────────────────

    /// Insert or replace by number. Always leaves exactly one row per number;
    /// a replaced row gets a fresh id, so it sorts as the most recent.
    pub fn upsert_tracked(&self, record: &TrackedRecord) -> TrackResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO tracked_numbers
                (number, operator, circle, owner_name, owner_address, tracked_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.number.as_str(),
                &record.operator,
                &record.circle,
                &record.owner_name,
                &record.owner_address,
                to_millis(&record.tracked_at),
            ],
        )?;
        Ok(())
    }

    pub fn get_tracked(&self, number: &MobileNumber) -> TrackResult<Option<TrackedRecord>> {
        self.conn
            .query_row(
                "SELECT number, operator, circle, owner_name, owner_address, tracked_at
                 FROM tracked_numbers WHERE number = ?1",
                params![number.as_str()],
                tracked_row_mapper,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Stored owner pair, or ("Not available", "Not available") for an
    /// unknown number.
    pub fn get_owner_info(&self, number: &MobileNumber) -> TrackResult<OwnerInfo> {
        let owner = self
            .conn
            .query_row(
                "SELECT owner_name, owner_address FROM tracked_numbers WHERE number = ?1",
                params![number.as_str()],
                |row| {
                    Ok(OwnerInfo {
                        name: row.get(0)?,
                        address: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(owner.unwrap_or_default())
    }

    /// Most recently tracked first.
    pub fn recent_tracked(&self, limit: usize) -> TrackResult<Vec<TrackedRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT number, operator, circle, owner_name, owner_address, tracked_at
             FROM tracked_numbers
             ORDER BY tracked_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], tracked_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // ── Summary helpers ────────────────────────────────────────────

    pub fn tracked_count(&self) -> TrackResult<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM tracked_numbers", [], |row| row.get(0))?;
        Ok(count)
    }
}

use super::{number_column, timestamp_column, to_millis, LookupStore};
use crate::{
    error::TrackResult,
    records::Complaint,
    types::{MobileNumber, NOT_AVAILABLE},
};
use rusqlite::params;

// Helper function for mapping complaint rows
fn complaint_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<Complaint> {
    Ok(Complaint {
        id: Some(row.get(0)?),
        number: number_column(row, 1)?,
        reporter_name: row.get(2)?,
        complaint_text: row.get(3)?,
        owner_name: row.get(4)?,
        owner_address: row.get(5)?,
        reported_at: timestamp_column(row, 6)?,
    })
}

impl LookupStore {
    // ── Complaints ─────────────────────────────────────────────────

    /// Append a complaint and return its id.
    ///
    /// When the complaint carries owner info, the matching tracked row's
    /// owner fields are overwritten in the same transaction; a missing half
    /// is stored as "Not available". An untracked number gets no new row:
    /// the update simply matches nothing.
    pub fn insert_complaint(&self, c: &Complaint) -> TrackResult<i64> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO complaints (
                number, reporter_name, complaint_text, owner_name, owner_address, reported_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                c.number.as_str(),
                &c.reporter_name,
                &c.complaint_text,
                c.owner_name.as_deref(),
                c.owner_address.as_deref(),
                to_millis(&c.reported_at),
            ],
        )?;
        let id = tx.last_insert_rowid();

        if c.carries_owner_info() {
            let updated = tx.execute(
                "UPDATE tracked_numbers SET owner_name = ?1, owner_address = ?2
                 WHERE number = ?3",
                params![
                    c.owner_name.as_deref().unwrap_or(NOT_AVAILABLE),
                    c.owner_address.as_deref().unwrap_or(NOT_AVAILABLE),
                    c.number.as_str(),
                ],
            )?;
            if updated == 0 {
                log::debug!(
                    "complaint {id}: {} not tracked yet, owner info kept on complaint only",
                    c.number
                );
            }
        }

        tx.commit()?;
        Ok(id)
    }

    pub fn count_complaints(&self, number: &MobileNumber) -> TrackResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM complaints WHERE number = ?1",
            params![number.as_str()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Most recently reported first.
    pub fn recent_complaints(&self, limit: usize) -> TrackResult<Vec<Complaint>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, number, reporter_name, complaint_text, owner_name, owner_address,
                    reported_at
             FROM complaints
             ORDER BY reported_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], complaint_row_mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn complaint_total(&self) -> TrackResult<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM complaints", [], |row| row.get(0))?;
        Ok(count)
    }
}

//! Record store client: create / list / delete for analysis records.
//!
//! The public surface is three owner-scoped server functions. The server side
//! keeps rows in an in-process table that mirrors the hosted row store's
//! behaviour: recommendations are persisted as an opaque JSON text column and
//! decoded exactly once on the way back out, and row-level access control
//! fails closed on cross-owner access.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Fault;
use crate::records::AnalysisRecord;

/// What the browser submits after a completed analysis. Recommendations are
/// derived server-side, not accepted from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalysis {
    pub image_url: String,
    pub label: String,
    pub confidence: f64,
}

/// Persist a completed analysis for the signed-in user.
#[server]
pub async fn save_analysis(token: String, analysis: NewAnalysis) -> Result<AnalysisRecord, ServerFnError> {
    let user = crate::auth::provider::resolve(&token).ok_or(Fault::AuthenticationRequired)?;
    let record = table::shared().insert(&user.id, analysis)?;
    tracing::info!(record = %record.id, owner = %record.owner_id, "analysis saved");
    Ok(record)
}

/// The signed-in user's records, newest first, capped at `limit` when given.
#[server]
pub async fn list_analyses(token: String, limit: Option<usize>) -> Result<Vec<AnalysisRecord>, ServerFnError> {
    let user = crate::auth::provider::resolve(&token).ok_or(Fault::AuthenticationRequired)?;
    Ok(table::shared().list_desc(&user.id, limit)?)
}

/// Delete one of the signed-in user's records. Another owner's record is an
/// authorization fault, never a silent no-op.
#[server]
pub async fn delete_analysis(token: String, id: String) -> Result<(), ServerFnError> {
    let user = crate::auth::provider::resolve(&token).ok_or(Fault::AuthenticationRequired)?;
    table::shared().delete(&user.id, &id)?;
    tracing::info!(record = %id, owner = %user.id, "analysis deleted");
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod table {
    use std::sync::{Mutex, MutexGuard};

    use once_cell::sync::Lazy;
    use time::{format_description::well_known::Rfc3339, OffsetDateTime};

    use crate::advice;
    use crate::error::Fault;
    use crate::records::{AnalysisRecord, Recommendations};

    use super::NewAnalysis;

    /// Row shape as the hosted store keeps it: recommendations are raw text.
    #[derive(Debug, Clone)]
    struct StoredRow {
        id: String,
        owner_id: String,
        image_url: String,
        label: String,
        confidence: f64,
        recommendations: Option<String>,
        created_at: String,
        updated_at: String,
    }

    impl StoredRow {
        fn decode(&self) -> AnalysisRecord {
            AnalysisRecord {
                id: self.id.clone(),
                owner_id: self.owner_id.clone(),
                image_url: self.image_url.clone(),
                label: self.label.clone(),
                confidence: self.confidence,
                recommendations: self
                    .recommendations
                    .as_deref()
                    .and_then(Recommendations::from_stored),
                created_at: self.created_at.clone(),
                updated_at: self.updated_at.clone(),
            }
        }
    }

    #[derive(Debug, Default)]
    pub(super) struct AnalysisTable {
        rows: Mutex<Vec<StoredRow>>,
    }

    static SHARED: Lazy<AnalysisTable> = Lazy::new(AnalysisTable::default);

    pub(super) fn shared() -> &'static AnalysisTable {
        &SHARED
    }

    impl AnalysisTable {
        fn rows(&self) -> Result<MutexGuard<'_, Vec<StoredRow>>, Fault> {
            self.rows
                .lock()
                .map_err(|_| Fault::Store("record table unavailable".into()))
        }

        pub(super) fn insert(&self, owner_id: &str, analysis: NewAnalysis) -> Result<AnalysisRecord, Fault> {
            let payload =
                advice::recommendations_for(&analysis.label, analysis.confidence).to_stored();
            let now = OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .map_err(|err| Fault::Store(format!("timestamp: {err}")))?;
            let row = StoredRow {
                id: uuid::Uuid::new_v4().to_string(),
                owner_id: owner_id.to_string(),
                image_url: analysis.image_url,
                label: analysis.label,
                confidence: analysis.confidence,
                recommendations: Some(payload),
                created_at: now.clone(),
                updated_at: now,
            };
            let record = row.decode();
            self.rows()?.push(row);
            Ok(record)
        }

        pub(super) fn list_desc(
            &self,
            owner_id: &str,
            limit: Option<usize>,
        ) -> Result<Vec<AnalysisRecord>, Fault> {
            let rows = self.rows()?;
            let mut mine: Vec<&StoredRow> =
                rows.iter().filter(|row| row.owner_id == owner_id).collect();
            // RFC 3339 UTC strings order lexicographically; stable sort keeps
            // insertion order for identical timestamps.
            mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            if let Some(limit) = limit {
                mine.truncate(limit);
            }
            Ok(mine.into_iter().map(StoredRow::decode).collect())
        }

        pub(super) fn delete(&self, owner_id: &str, id: &str) -> Result<(), Fault> {
            let mut rows = self.rows()?;
            match rows.iter().position(|row| row.id == id) {
                Some(index) if rows[index].owner_id == owner_id => {
                    rows.remove(index);
                    Ok(())
                }
                Some(_) => Err(Fault::NotAuthorized),
                None => Err(Fault::Store("no such record".into())),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn analysis(label: &str, confidence: f64) -> NewAnalysis {
            NewAnalysis {
                image_url: "data:image/png;base64,".into(),
                label: label.into(),
                confidence,
            }
        }

        #[test]
        fn insert_attaches_decoded_recommendations() {
            let table = AnalysisTable::default();
            let record = table
                .insert("owner-a", analysis("Apple Scab", 0.87))
                .expect("insert");
            let payload = record.recommendations.expect("payload attached");
            assert_eq!(payload.status(), "diseased");
            assert_eq!(payload.actions().len(), 5);
        }

        #[test]
        fn listing_is_scoped_to_the_owner() {
            let table = AnalysisTable::default();
            table.insert("owner-a", analysis("Healthy Leaf", 0.92)).expect("insert");
            table.insert("owner-b", analysis("Apple Rust", 0.79)).expect("insert");

            let mine = table.list_desc("owner-a", None).expect("list");
            assert_eq!(mine.len(), 1);
            assert_eq!(mine[0].label, "Healthy Leaf");
        }

        #[test]
        fn listing_caps_at_limit_newest_first() {
            let table = AnalysisTable::default();
            for i in 0..4 {
                table
                    .insert("owner-a", analysis(&format!("Run {i}"), 0.5))
                    .expect("insert");
            }
            let listed = table.list_desc("owner-a", Some(2)).expect("list");
            assert_eq!(listed.len(), 2);
            assert!(listed[0].created_at >= listed[1].created_at);
        }

        #[test]
        fn cross_owner_delete_fails_closed() {
            let table = AnalysisTable::default();
            let record = table
                .insert("owner-a", analysis("Apple Scab", 0.87))
                .expect("insert");

            assert_eq!(
                table.delete("owner-b", &record.id),
                Err(Fault::NotAuthorized)
            );
            // Row is still there for its owner.
            assert_eq!(table.list_desc("owner-a", None).expect("list").len(), 1);
            assert_eq!(table.delete("owner-a", &record.id), Ok(()));
        }

        #[test]
        fn deleting_a_missing_row_is_a_store_fault() {
            let table = AnalysisTable::default();
            assert!(matches!(
                table.delete("owner-a", "missing"),
                Err(Fault::Store(_))
            ));
        }
    }
}

//! Analysis record model shared by the browser and the backend.

use serde::{Deserialize, Serialize};

/// One persisted analysis outcome. Immutable after creation except deletion;
/// no update path is exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// The authenticated user the record belongs to.
    pub owner_id: String,
    /// Opaque locator for the analysed image (a data URL in practice).
    pub image_url: String,
    /// Classification outcome, e.g. "Healthy Leaf" or "Apple Scab".
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub confidence: f64,
    /// Derived advice, decoded once at the store boundary. `None` when the
    /// stored payload was absent or malformed.
    pub recommendations: Option<Recommendations>,
    /// RFC 3339, set by the store on insert.
    pub created_at: String,
    pub updated_at: String,
}

impl AnalysisRecord {
    /// Whether the classification indicates a healthy leaf.
    pub fn is_healthy(&self) -> bool {
        crate::advice::is_healthy_label(&self.label)
    }
}

/// Advice payload attached to a record. Derived from the label at save time,
/// never independently editable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Recommendations {
    Healthy {
        actions: Vec<String>,
    },
    Diseased {
        disease: String,
        confidence: f64,
        actions: Vec<String>,
    },
}

impl Recommendations {
    /// The `status` tag as stored, handy for tabular output.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Healthy { .. } => "healthy",
            Self::Diseased { .. } => "diseased",
        }
    }

    pub fn actions(&self) -> &[String] {
        match self {
            Self::Healthy { actions } | Self::Diseased { actions, .. } => actions,
        }
    }

    /// Decode the opaque JSON text column the row store keeps.
    ///
    /// Legacy rows may hold anything; a payload that fails to parse is treated
    /// as "no recommendations" rather than failing the read.
    pub fn from_stored(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Encode for the row store's text column.
    pub fn to_stored(&self) -> String {
        // A struct of strings and numbers cannot fail to serialise.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_payload_round_trips() {
        let payload = Recommendations::Diseased {
            disease: "Apple Scab".into(),
            confidence: 0.87,
            actions: vec!["Remove affected leaves".into()],
        };
        let raw = payload.to_stored();
        assert_eq!(Recommendations::from_stored(&raw), Some(payload));
    }

    #[test]
    fn stored_tag_matches_status() {
        let payload = Recommendations::Healthy { actions: vec![] };
        assert!(payload.to_stored().contains("\"status\":\"healthy\""));
        assert_eq!(payload.status(), "healthy");
    }

    #[test]
    fn legacy_blob_decodes() {
        // Exact shape the previous frontend wrote.
        let raw = r#"{"status":"diseased","disease":"Apple Rust","confidence":0.65,"actions":["Consult an extension office"]}"#;
        let decoded = Recommendations::from_stored(raw).expect("legacy payload decodes");
        assert_eq!(decoded.status(), "diseased");
        assert_eq!(decoded.actions().len(), 1);
    }

    #[test]
    fn malformed_blob_is_none_not_fatal() {
        assert_eq!(Recommendations::from_stored(""), None);
        assert_eq!(Recommendations::from_stored("not json"), None);
        assert_eq!(Recommendations::from_stored(r#"{"status":"??"}"#), None);
    }
}

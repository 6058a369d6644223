//! Classification boundary.
//!
//! The real model runs in a separate service; this crate's contract with it is
//! a single request/response pair. The current implementation is a stub that
//! picks one of the model's four classes by a deterministic fold over the
//! uploaded bytes, so re-analysing the same image agrees with itself.

use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Fault;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    pub label: String,
    pub confidence: f64,
}

/// The four classes the apple-leaf model was trained on, with the canned
/// confidences the stub reports for each.
const MOCK_OUTCOMES: [(&str, f64); 4] = [
    ("Healthy Leaf", 0.92),
    ("Apple Scab", 0.87),
    ("Apple Rust", 0.79),
    ("Multiple Diseases", 0.65),
];

/// Pure stub used by the server function. Total for any byte slice.
pub fn mock_outcome(image: &[u8]) -> ClassificationOutcome {
    let digest = image
        .iter()
        .fold(image.len(), |acc, byte| acc.wrapping_add(*byte as usize));
    let (label, confidence) = MOCK_OUTCOMES[digest % MOCK_OUTCOMES.len()];
    ClassificationOutcome {
        label: label.to_string(),
        confidence,
    }
}

/// Classify an uploaded leaf image for the signed-in user.
#[server]
pub async fn classify_image(token: String, image: Vec<u8>) -> Result<ClassificationOutcome, ServerFnError> {
    let user = crate::auth::provider::resolve(&token).ok_or(Fault::AuthenticationRequired)?;
    tracing::debug!(user = %user.id, bytes = image.len(), "classifying leaf image");
    Ok(mock_outcome(&image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_image_same_outcome() {
        let image = vec![1u8, 2, 3, 4, 5];
        assert_eq!(mock_outcome(&image), mock_outcome(&image));
    }

    #[test]
    fn empty_image_still_classifies() {
        let outcome = mock_outcome(&[]);
        assert_eq!(outcome.label, "Healthy Leaf");
        assert!((0.0..=1.0).contains(&outcome.confidence));
    }

    #[test]
    fn confidences_stay_in_unit_interval() {
        for (_, confidence) in MOCK_OUTCOMES {
            assert!((0.0..=1.0).contains(&confidence));
        }
    }
}

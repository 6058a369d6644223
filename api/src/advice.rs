//! Recommendation generator: classification label → canned advice payload.
//!
//! The two action lists are fixed; advice does not yet vary by specific
//! disease name even though the UI implies it might (kept as-is pending
//! product input).

use crate::records::Recommendations;

const HEALTHY_ACTIONS: [&str; 4] = [
    "Continue regular monitoring and maintain good orchard practices",
    "Maintain proper spacing between trees for air circulation",
    "Regular pruning to remove dead or diseased branches",
    "Monitor for early signs of disease during growing season",
];

const DISEASED_ACTIONS: [&str; 5] = [
    "Consult with a local agricultural extension office",
    "Consider appropriate fungicide treatment",
    "Remove and dispose of affected leaves properly",
    "Monitor surrounding trees for similar symptoms",
    "Improve air circulation around affected trees",
];

/// A label counts as healthy when it contains "healthy", case-insensitively.
pub fn is_healthy_label(label: &str) -> bool {
    label.to_lowercase().contains("healthy")
}

/// Total for any label and confidence; no failure modes.
pub fn recommendations_for(label: &str, confidence: f64) -> Recommendations {
    if is_healthy_label(label) {
        Recommendations::Healthy {
            actions: HEALTHY_ACTIONS.iter().map(|s| s.to_string()).collect(),
        }
    } else {
        Recommendations::Diseased {
            disease: label.to_string(),
            confidence,
            actions: DISEASED_ACTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_label_yields_four_actions_and_nothing_else() {
        let payload = recommendations_for("Healthy Leaf", 0.92);
        match payload {
            Recommendations::Healthy { actions } => assert_eq!(actions.len(), 4),
            other => panic!("expected healthy payload, got {other:?}"),
        }
    }

    #[test]
    fn diseased_label_echoes_disease_and_confidence() {
        let payload = recommendations_for("Apple Rust", 0.65);
        match payload {
            Recommendations::Diseased {
                disease,
                confidence,
                actions,
            } => {
                assert_eq!(disease, "Apple Rust");
                assert_eq!(confidence, 0.65);
                assert_eq!(actions.len(), 5);
            }
            other => panic!("expected diseased payload, got {other:?}"),
        }
    }

    #[test]
    fn healthy_detection_is_case_insensitive_substring() {
        assert!(is_healthy_label("Healthy Leaf"));
        assert!(is_healthy_label("leaf looks HEALTHY"));
        assert!(!is_healthy_label("Apple Scab"));
        assert!(!is_healthy_label(""));
    }

    #[test]
    fn status_tracks_healthy_substring_for_any_confidence() {
        for confidence in [0.0, 0.5, 1.0] {
            assert_eq!(
                recommendations_for("Healthy Leaf", confidence).status(),
                "healthy"
            );
            assert_eq!(
                recommendations_for("Apple Scab", confidence).status(),
                "diseased"
            );
        }
    }
}

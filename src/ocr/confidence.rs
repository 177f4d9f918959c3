use log::debug;

use crate::ocr::engine::OcrResult;

/// A result passes when its confidence is at or above the threshold.
pub fn is_confident(result: &OcrResult, threshold: f64) -> bool {
    if result.confidence < threshold {
        debug!(
            "ocr confidence {:.1} below threshold {:.1}, rejecting '{:.50}'",
            result.confidence, threshold, result.text
        );
        return false;
    }
    true
}

/// Keeps only results at or above the threshold, preserving order.
pub fn filter_confident(results: Vec<OcrResult>, threshold: f64) -> Vec<OcrResult> {
    results
        .into_iter()
        .filter(|result| is_confident(result, threshold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str, confidence: f64) -> OcrResult {
        OcrResult {
            text: text.into(),
            confidence,
        }
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(is_confident(&result("a", 60.0), 60.0));
        assert!(!is_confident(&result("a", 59.9), 60.0));
        assert!(is_confident(&result("a", 60.1), 60.0));
    }

    #[test]
    fn filter_preserves_order_and_drops_failures() {
        let results = vec![
            result("keep-1", 80.0),
            result("drop", 10.0),
            result("keep-2", 60.0),
        ];
        let kept = filter_confident(results, 60.0);
        let texts: Vec<&str> = kept.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["keep-1", "keep-2"]);
    }
}

//! Review submission model.

use serde_json::Value;

use crate::errors::AppError;
use crate::marketplace::coerce;

/// A validated review submission.
///
/// [`ReviewRequest::from_payload`] is the only constructor, so an instance
/// existing means its invariants hold: rating within 1..=5, review text
/// non-empty after trimming.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    rating: i64,
    review: String,
}

impl ReviewRequest {
    /// Validate a decoded request body into a `ReviewRequest`.
    ///
    /// The rating is coerced permissively (numeric strings accepted) before
    /// the range check, matching what lenient form clients send.
    pub fn from_payload(payload: &Value) -> Result<Self, AppError> {
        let rating = coerce::to_int(payload.get("rating")).unwrap_or(0);
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(
                "Rating must be between 1 and 5.".to_string(),
            ));
        }

        let review = payload
            .get("review")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        if review.is_empty() {
            return Err(AppError::Validation("Review text is required.".to_string()));
        }

        Ok(Self {
            rating,
            review: review.to_string(),
        })
    }

    pub fn rating(&self) -> i64 {
        self.rating
    }

    pub fn review(&self) -> &str {
        &self.review
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expect_validation_message(payload: Value, expected: &str) {
        match ReviewRequest::from_payload(&payload) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, expected),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_valid_payload() {
        let request =
            ReviewRequest::from_payload(&json!({"rating": 5, "review": "Great plugin!"})).unwrap();
        assert_eq!(request.rating(), 5);
        assert_eq!(request.review(), "Great plugin!");
    }

    #[test]
    fn test_numeric_string_rating_accepted() {
        let request =
            ReviewRequest::from_payload(&json!({"rating": "4", "review": "Solid"})).unwrap();
        assert_eq!(request.rating(), 4);
    }

    #[test]
    fn test_review_is_trimmed() {
        let request =
            ReviewRequest::from_payload(&json!({"rating": 3, "review": "  okay  "})).unwrap();
        assert_eq!(request.review(), "okay");
    }

    #[test]
    fn test_rating_out_of_range() {
        expect_validation_message(
            json!({"rating": 0, "review": "Great plugin!"}),
            "Rating must be between 1 and 5.",
        );
        expect_validation_message(
            json!({"rating": 6, "review": "Great plugin!"}),
            "Rating must be between 1 and 5.",
        );
    }

    #[test]
    fn test_missing_rating_rejected() {
        expect_validation_message(
            json!({"review": "Great plugin!"}),
            "Rating must be between 1 and 5.",
        );
    }

    #[test]
    fn test_blank_review_rejected() {
        expect_validation_message(
            json!({"rating": 4, "review": ""}),
            "Review text is required.",
        );
        expect_validation_message(
            json!({"rating": 4, "review": "   "}),
            "Review text is required.",
        );
        expect_validation_message(json!({"rating": 4}), "Review text is required.");
    }
}

use serde::Deserialize;

/// Request body for book creation. `isbn` must be an integer on the wire;
/// serde rejects anything else before the handler runs.
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub isbn: i64,
    pub label: String,
}

impl CreateBookRequest {
    /// Label must be non-empty after trimming whitespace.
    pub fn validated_label(&self) -> Option<&str> {
        let label = self.label.trim();
        (!label.is_empty()).then_some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_trimmed() {
        let req: CreateBookRequest =
            serde_json::from_str(r#"{"isbn": 2324324, "label": "  Book No1  "}"#).unwrap();
        assert_eq!(req.validated_label(), Some("Book No1"));
    }

    #[test]
    fn whitespace_only_label_is_rejected() {
        let req: CreateBookRequest =
            serde_json::from_str(r#"{"isbn": 2324324, "label": "   "}"#).unwrap();
        assert_eq!(req.validated_label(), None);
    }

    #[test]
    fn non_integer_isbn_fails_deserialization() {
        let res = serde_json::from_str::<CreateBookRequest>(
            r#"{"isbn": "2324324", "label": "Book No1"}"#,
        );
        assert!(res.is_err());
    }
}

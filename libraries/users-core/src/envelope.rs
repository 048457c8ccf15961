/// Uniform JSON wrapper used by every API response
use serde::{Deserialize, Serialize};

/// `{success, message, data?, errors?}` plus the optional extras some
/// endpoints attach (`total` for lists, `path` for routing misses, `error`
/// for internal fault detail).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
            total: None,
            path: None,
            error: None,
        }
    }

    /// Failed response without data
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
            total: None,
            path: None,
            error: None,
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    #[must_use]
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_omits_empty_fields() {
        let env: Envelope<()> = Envelope::failure("User not found");
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({"success": false, "message": "User not found"})
        );
    }

    #[test]
    fn test_validation_failure_lists_errors() {
        let env: Envelope<()> = Envelope::failure("Invalid data")
            .with_errors(vec!["Email must be valid".to_string()]);
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["errors"], json!(["Email must be valid"]));
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_list_envelope_deserializes_without_extras() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"message":"ok","data":[3,2,1],"total":3}"#)
                .unwrap();
        assert_eq!(env.data, Some(vec![3, 2, 1]));
        assert_eq!(env.total, Some(3));
        assert!(env.errors.is_none());
    }
}

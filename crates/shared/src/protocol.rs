use serde::{Deserialize, Deserializer, Serialize};

pub const LOGIN_ROUTE: &str = "login";
pub const GENERATE_REPORT_ROUTE: &str = "generate-report";
pub const SUBMIT_FEEDBACK_ROUTE: &str = "submit-feedback";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Body returned by the report generation service.
///
/// A present `error` marks the request as failed even on a 2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub report: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chart_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub report: String,
    pub rating: String,
    pub comment: String,
    pub sources: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body any collaborator may return with a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_result_without_error_field_parses() {
        let parsed: ReportResult = serde_json::from_str(
            r#"{"report":"<p>OK</p>","chart_url":"/c.png","sources":["KB1","KB2"]}"#,
        )
        .expect("parse");
        assert_eq!(parsed.chart_url, "/c.png");
        assert_eq!(parsed.sources, ["KB1", "KB2"]);
        assert!(parsed.error.is_none());
    }

    #[test]
    fn error_only_report_body_parses() {
        let parsed: ReportResult = serde_json::from_str(r#"{"error":"busy"}"#).expect("parse");
        assert_eq!(parsed.error.as_deref(), Some("busy"));
        assert!(parsed.sources.is_empty());
    }

    #[test]
    fn null_fields_read_as_empty() {
        let parsed: ReportResult = serde_json::from_str(
            r#"{"report":"<p>OK</p>","chart_url":null,"sources":null,"error":null}"#,
        )
        .expect("parse");
        assert_eq!(parsed.report, "<p>OK</p>");
        assert!(parsed.chart_url.is_empty());
        assert!(parsed.sources.is_empty());
        assert!(parsed.error.is_none());

        let parsed: FeedbackResponse =
            serde_json::from_str(r#"{"success":null,"error":"x"}"#).expect("parse");
        assert!(!parsed.success);
    }

    #[test]
    fn rejected_login_body_has_no_role() {
        let parsed: LoginResponse = serde_json::from_str(r#"{"success":false}"#).expect("parse");
        assert!(!parsed.success);
        assert!(parsed.role.is_none());
    }
}

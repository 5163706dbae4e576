use serde::Serialize;

/// Body of every failed request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    /// Milliseconds until a rate-limited client may retry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<u64>,
    /// Machine-readable verification failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_left: Option<u32>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            remaining_time: None,
            error_code: None,
            attempts_left: None,
        }
    }

    pub fn with_remaining_time(mut self, remaining_time_ms: u64) -> Self {
        self.remaining_time = Some(remaining_time_ms);
        self
    }

    pub fn with_error_code(mut self, code: &'static str, attempts_left: Option<u32>) -> Self {
        self.error_code = Some(code);
        self.attempts_left = attempts_left;
        self
    }
}

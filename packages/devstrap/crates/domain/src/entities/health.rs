use serde::Serialize;

/// Result of one post-install smoke test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResult {
    pub tool: String,
    pub ok: bool,
    pub detail: String,
}

impl HealthResult {
    pub fn healthy(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            ok: true,
            detail: detail.into(),
        }
    }

    pub fn unhealthy(tool: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            ok: false,
            detail: detail.into(),
        }
    }
}

use crate::tokens::CanonicalToken;
use serde::{Deserialize, Serialize};

/// Serializable pipeline output for machine consumers
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub tokens: Vec<CanonicalToken>,
}

impl PipelineOutput {
    pub fn new(tokens: Vec<CanonicalToken>) -> Self {
        Self { tokens }
    }

    /// Serialize as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render canonical tokens in the line-oriented text form, one per line:
/// `<name> [b0, b1, ...] <line>:<column>`
pub fn render_tokens(tokens: &[CanonicalToken]) -> String {
    let mut output = String::new();
    for token in tokens {
        output.push_str(&token.render());
        output.push('\n');
    }
    output
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid UTF-8 after {valid_up_to} bytes")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("Unknown invalid-input policy: {0}")]
    UnknownPolicy(String),
}

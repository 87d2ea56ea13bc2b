use thiserror::Error;

/// Failure reported by the external expression evaluator.
///
/// The message is user-visible: log template rendering substitutes it in
/// place of the value it could not produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EvalError(pub String);

impl EvalError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

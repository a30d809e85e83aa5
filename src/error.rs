use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabsimError {
    /// Malformed input, raised before any tableau work.
    #[error("validation fault: {0}")]
    Validation(String),

    /// Near-zero pivot element or a singular system during dual recovery.
    #[error("numeric fault: {0}")]
    Numeric(String),
}

impl TabsimError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn numeric(msg: impl Into<String>) -> Self {
        Self::Numeric(msg.into())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PvpcError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Error fetching ESIOS data: {status_text}")]
    Remote { status: u16, status_text: String },

    #[error("Invalid response format from ESIOS: {0}")]
    Schema(String),

    #[error("No data available")]
    EmptyData,
}

impl PvpcError {
    /// Stable tag for the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PvpcError::Network(_) => "network",
            PvpcError::Remote { .. } => "remote",
            PvpcError::Schema(_) => "schema",
            PvpcError::EmptyData => "empty_data",
        }
    }
}

pub type Result<T> = std::result::Result<T, PvpcError>;

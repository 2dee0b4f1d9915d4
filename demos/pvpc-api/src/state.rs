use std::path::PathBuf;

/// Shared application state, handed to every route through Axum's `State`
/// extractor.
pub struct AppState {
    /// The PVPC client. Every request performs its own upstream fetch.
    pub client: pvpc_sdk::PvpcClient,

    /// Path of the OpenAI apps verification file, read on each request.
    pub challenge_file: PathBuf,
}

use thiserror::Error;

/// Errors talking to the Supabase backend.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The project URL or anon key was never supplied.
    #[error("Supabase URL or anon key is not configured")]
    NotConfigured,

    #[error("Invalid Supabase endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Supabase responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

//! Application state for the PDF toolbox API

/// Upload limits, resolved once at startup from the environment.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Request body cap in bytes (`MAX_UPLOAD_MB`, default 50 MB).
    pub max_upload_bytes: usize,
    /// Max file parts per request (`MAX_FILES`, default 20).
    pub max_files: usize,
}

impl Limits {
    pub fn from_env() -> Self {
        let max_upload_mb: usize = std::env::var("MAX_UPLOAD_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50);
        let max_files: usize = std::env::var("MAX_FILES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(20);

        Self {
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            max_files,
        }
    }
}

pub struct AppState {
    pub limits: Limits,
}

impl AppState {
    pub fn from_env() -> Self {
        let limits = Limits::from_env();
        tracing::info!(
            "Upload limits: {} bytes per request, {} files",
            limits.max_upload_bytes,
            limits.max_files
        );
        Self { limits }
    }
}

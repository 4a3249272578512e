// Crate error type. The surface itself never fails; these cover the edges
// around it (config files, PNG export, the host window).
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A config value is out of range or inconsistent.
    #[error("Config error: {0}")]
    Config(String),
    /// Reading a config file or writing an export failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for `SurfaceConfig`.
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Encoding or writing the signature image failed.
    #[error("Image export error: {0}")]
    Image(#[from] image::ImageError),
    /// Creating the window failed.
    #[error("Window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed.
    #[error("Window update error: {0}")]
    WindowUpdate(String),
}

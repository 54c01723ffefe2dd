//! Engine construction errors

/// Errors that prevent an engine from being built
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("Invalid canvas size {width}x{height}: must fit the paddle and one brick column")]
    InvalidConfig { width: f32, height: f32 },
}

use thiserror::Error;

/// Reasons a [`BackdropConfig`](crate::BackdropConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("dot spacing must be a finite number of at least 1px, got {0}")]
    DotSpacing(f32),
    #[error("dot radius must be a non-negative finite number, got {0}")]
    DotRadius(f32),
    #[error("cloud speed must be a non-negative finite number, got {0}")]
    CloudSpeed(f32),
    #[error("mouse attraction strength must be a non-negative finite number, got {0}")]
    AttractionStrength(f32),
}

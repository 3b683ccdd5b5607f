use thiserror::Error;

/// Errors raised by the viewer core and its browser collaborators.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid hex color {0:?}: expected six hex digits with an optional leading '#'")]
    InvalidHex(String),

    #[error("color slot {index} out of range (scheme holds {len} colors)")]
    SlotOutOfRange { index: usize, len: usize },

    #[error("canvas has zero size ({width}x{height})")]
    ZeroSizeCanvas { width: u32, height: u32 },

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("graphics backend: {0}")]
    Graphics(String),

    #[error("invalid viewer configuration: {0}")]
    Config(String),

    #[error("could not parse viewer configuration")]
    ConfigJson(#[source] serde_json::Error),

    #[error("malformed color picker message")]
    PickerMessage(#[source] serde_json::Error),

    #[error("color picker sent {colors} colors for {semantics} slots")]
    PickerMismatch { colors: usize, semantics: usize },
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;

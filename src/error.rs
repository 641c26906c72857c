use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Missing element: {0}")]
    MissingElement(&'static str),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl GameError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Wrap a `JsValue` thrown by a web-sys call, keeping its string form when it has one.
    pub fn dom(context: &str, err: JsValue) -> Self {
        let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
        Self::Dom(format!("{context}: {detail}"))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

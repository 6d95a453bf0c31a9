use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while mounting the card or reading its configuration. Nothing
/// after mount is fatal: image and audio failures are recovered in place.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no document body")]
    NoBody,
    #[error("card is already running")]
    AlreadyRunning,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("dom error: {0}")]
    Dom(String),
}

impl From<JsValue> for CardError {
    fn from(value: JsValue) -> Self {
        CardError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<CardError> for JsValue {
    fn from(err: CardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type CardResult<T> = Result<T, CardError>;

//! Error type shared by the page glue and the config loader.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum GreetingError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error("element {0} has an unexpected type")]
    WrongElementType(&'static str),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("could not parse config: {0}")]
    ConfigJson(#[from] serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for GreetingError {
    fn from(value: JsValue) -> Self {
        GreetingError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<GreetingError> for JsValue {
    fn from(err: GreetingError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = GreetingError> = std::result::Result<T, E>;

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("failed to find element with id: {0}")]
    ElementNotFound(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("breakpoint table is empty")]
    EmptyBreakpoints,

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("frame scheduler is already running")]
    AlreadyRunning,

    #[error("carousel has been torn down")]
    TornDown,

    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for CarouselError {
    fn from(value: JsValue) -> Self {
        CarouselError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<serde_wasm_bindgen::Error> for CarouselError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        CarouselError::InvalidOptions(err.to_string())
    }
}

impl From<serde_json::Error> for CarouselError {
    fn from(err: serde_json::Error) -> Self {
        CarouselError::InvalidOptions(err.to_string())
    }
}

impl From<CarouselError> for JsValue {
    fn from(err: CarouselError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

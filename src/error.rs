use thiserror::Error;

/// Why a page module did not install.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A required element is not on the page; the module stays inactive.
    #[error("missing element `{0}`")]
    MissingElement(&'static str),
    /// The element exists but is not of the expected type.
    #[error("element `{0}` has an unexpected type")]
    UnexpectedElement(&'static str),
    #[error("window or document is unavailable")]
    NoDocument,
    #[error("browser call failed: {0}")]
    Browser(String),
}

impl SiteError {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingElement(_))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &wasm_bindgen::JsValue::from_str("message"))
                    .ok()
                    .and_then(|message| message.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        Self::Browser(message)
    }
}

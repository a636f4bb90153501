//! Crate error type. Runtime validation that survives the move to static types
//! (DOM lookups, numeric ranges, config parsing) reports through `GameError`.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no global `{0}` available")]
    MissingGlobal(&'static str),

    #[error("element `#{0}` not found in document")]
    MissingElement(String),

    #[error("element `#{id}` must be an instance of {expected}")]
    WrongElementType { id: String, expected: &'static str },

    #[error("provided min ({min}) must be smaller than max ({max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("provided {0} must be a finite number")]
    NotFinite(&'static str),

    #[error("font size must be positive, got {0}")]
    InvalidFontSize(f64),

    #[error("max_cats must be in 1..={limit}, got {value}")]
    InvalidCatLimit { value: usize, limit: usize },

    #[error("game is already running; call stop_game first")]
    AlreadyRunning,

    #[error("javascript error: {0}")]
    Js(String),

    #[cfg(feature = "serde_json")]
    #[error("invalid game config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Reject NaN / infinities for values that arrive from the host.
pub fn ensure_finite(value: f64, name: &'static str) -> Result<f64, GameError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GameError::NotFinite(name))
    }
}

/// Clamp `value` into `[min, max]`. `min` must be strictly smaller than `max`.
pub fn clamp(value: f64, min: f64, max: f64) -> Result<f64, GameError> {
    ensure_finite(value, "number")?;
    ensure_finite(min, "min")?;
    ensure_finite(max, "max")?;
    if min >= max {
        return Err(GameError::InvalidRange { min, max });
    }
    Ok(value.clamp(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limits_value_into_range() {
        assert_eq!(clamp(1.5, 0.0, 1.0).unwrap(), 1.0);
        assert_eq!(clamp(-3.0, 0.0, 1.0).unwrap(), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0).unwrap(), 0.25);
    }

    #[test]
    fn clamp_rejects_inverted_or_empty_range() {
        assert!(matches!(
            clamp(0.5, 1.0, 1.0),
            Err(GameError::InvalidRange { .. })
        ));
        assert!(matches!(
            clamp(0.5, 2.0, 1.0),
            Err(GameError::InvalidRange { .. })
        ));
    }

    #[test]
    fn clamp_rejects_nan() {
        assert!(matches!(clamp(f64::NAN, 0.0, 1.0), Err(GameError::NotFinite("number"))));
    }
}

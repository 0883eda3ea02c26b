use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::animation::SpinUpOptions;
use crate::error::CarouselError;
use crate::geometry::{default_breakpoints, Breakpoint, BreakpointTable};
use crate::wheel::DEFAULT_VISIBILITY_THRESHOLD;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Dom,
    Canvas,
}

/// Tuning knobs accepted from the host page. Every field is optional on the
/// JS side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselOptions {
    /// Cards further than this many degrees from the top are not painted.
    pub visibility_threshold: f64,
    pub breakpoints: Vec<Breakpoint>,
    pub spin_up: SpinUpOptions,
    pub renderer: RendererKind,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
            breakpoints: default_breakpoints(),
            spin_up: SpinUpOptions::default(),
            renderer: RendererKind::Dom,
        }
    }
}

impl CarouselOptions {
    /// `undefined` and `null` yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, CarouselError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let options: Self = serde_wasm_bindgen::from_value(value)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        if !(self.visibility_threshold.is_finite() && self.visibility_threshold >= 0.0) {
            return Err(CarouselError::InvalidOptions(format!(
                "visibilityThreshold must be a non-negative number, got {}",
                self.visibility_threshold
            )));
        }
        let spin_up = &self.spin_up;
        let timings = [
            ("spinUp.durationSecs", spin_up.duration_secs),
            ("spinUp.fadeSecs", spin_up.fade_secs),
            ("spinUp.blurPx", spin_up.blur_px),
        ];
        for (name, value) in timings {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CarouselError::InvalidOptions(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !(spin_up.start_speed.is_finite() && spin_up.cruise_speed.is_finite()) {
            return Err(CarouselError::InvalidOptions(
                "spin-up speeds must be finite".to_string(),
            ));
        }
        self.breakpoint_table().map(|_| ())
    }

    pub fn breakpoint_table(&self) -> Result<BreakpointTable, CarouselError> {
        BreakpointTable::new(self.breakpoints.clone())
    }
}

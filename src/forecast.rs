//! Next-step generation forecast backed by an optional regression model.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::ModelError;
use crate::model::{Features, ModelArtifact, Regressor};

/// State of charge assumed when a request omits it.
pub const DEFAULT_BATTERY_SOC: f64 = 0.5;

/// Forecast request features.
///
/// The three generation fields are required; `battery_soc` defaults to
/// [`DEFAULT_BATTERY_SOC`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ForecastInput {
    pub solar_kw: f64,
    pub wind_kw: f64,
    pub hydro_kw: f64,
    #[serde(default = "default_battery_soc")]
    pub battery_soc: f64,
}

fn default_battery_soc() -> f64 {
    DEFAULT_BATTERY_SOC
}

impl From<ForecastInput> for Features {
    fn from(input: ForecastInput) -> Self {
        Self {
            solar_kw: input.solar_kw,
            wind_kw: input.wind_kw,
            hydro_kw: input.hydro_kw,
            battery_soc: input.battery_soc,
        }
    }
}

/// Forecast value, tagged with the path that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prediction {
    /// Output of the loaded regression model.
    Model(f64),
    /// Sum of current generation; no model was loaded.
    Fallback(f64),
}

impl Prediction {
    /// Forecast generation (kW), whichever path produced it.
    pub fn gen_kw(&self) -> f64 {
        match *self {
            Self::Model(kw) | Self::Fallback(kw) => kw,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Self::Model(_) => "model",
            Self::Fallback(_) => "fallback",
        }
    }
}

/// Generation forecaster.
///
/// Either model-backed or in fallback mode; which one is fixed at
/// construction and never changes afterwards.
pub struct Forecaster {
    model: Option<Box<dyn Regressor>>,
}

impl Forecaster {
    /// Forecaster with no model: predictions are the generation sum.
    pub fn fallback() -> Self {
        Self { model: None }
    }

    /// Forecaster backed by the given model.
    pub fn with_model(model: impl Regressor + 'static) -> Self {
        Self {
            model: Some(Box::new(model)),
        }
    }

    /// Loads a model artifact from `path`.
    ///
    /// A missing file is not an error: the forecaster runs in fallback mode.
    ///
    /// # Errors
    ///
    /// Returns a `ModelError` if the file exists but cannot be read or is
    /// not a valid model artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            info!(path = %path.display(), "No model artifact found, using fallback forecast");
            return Ok(Self::fallback());
        }

        let artifact = ModelArtifact::from_file(path)?;
        info!(path = %path.display(), model = artifact.name(), "Model artifact loaded");
        Ok(Self::with_model(artifact))
    }

    /// Name of the loaded model, if any.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.name())
    }

    /// Forecasts next-step generation.
    ///
    /// Without a model this returns `solar_kw + wind_kw + hydro_kw` and
    /// ignores `battery_soc`.
    pub fn predict(&self, input: &ForecastInput) -> Prediction {
        match &self.model {
            Some(model) => Prediction::Model(model.predict(&Features::from(*input))),
            None => Prediction::Fallback(input.solar_kw + input.wind_kw + input.hydro_kw),
        }
    }
}

impl fmt::Debug for Forecaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forecaster")
            .field("model", &self.model_name())
            .finish()
    }
}

use std::collections::HashMap;
use std::fs;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::error::{Result, RiskError};

/// Points at a JSON file that replaces the built-in weight tables.
pub const WEIGHTS_OVERRIDE_ENV: &str = "SITE_RISK_WEIGHTS_OVERRIDE";

const BASE_WEIGHT: i32 = 2;

lazy_static! {
    pub static ref DEFAULT_WEIGHTS: WeightTables = builtin_weights();
}

// Parse the shipped tables with error propagation
pub(crate) fn builtin_weights_result() -> Result<WeightTables> {
    let raw = include_str!("../../rules/risk_weights.json");
    WeightTables::from_json(raw)
}

// Shipped tables, falling back to base and defaults only
fn builtin_weights() -> WeightTables {
    builtin_weights_result().unwrap_or_else(|e| {
        log::error!("{}; using empty weight tables", e);
        WeightTables::empty()
    })
}

/// Category weights feeding the weighted risk sum.
///
/// Lookups never fail: values missing from a table fall back to that table's
/// default weight.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeightTables {
    pub base: i32,
    pub weather: HashMap<String, i32>,
    pub construction: HashMap<String, i32>,
    pub process: HashMap<String, i32>,
    #[serde(default)]
    pub default_weather: i32,
    #[serde(default)]
    pub default_construction: i32,
    #[serde(default = "default_process_weight")]
    pub default_process: i32,
}

fn default_process_weight() -> i32 {
    1
}

impl Default for WeightTables {
    fn default() -> Self {
        DEFAULT_WEIGHTS.clone()
    }
}

impl WeightTables {
    /// Base weight and table defaults with no categories mapped.
    pub fn empty() -> Self {
        WeightTables {
            base: BASE_WEIGHT,
            weather: HashMap::new(),
            construction: HashMap::new(),
            process: HashMap::new(),
            default_weather: 0,
            default_construction: 0,
            default_process: default_process_weight(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| RiskError::Weights(format!("Failed to parse weight tables: {}", e)))
    }

    /// Built-in tables, unless `SITE_RISK_WEIGHTS_OVERRIDE` names a file.
    pub fn load() -> Result<Self> {
        match std::env::var(WEIGHTS_OVERRIDE_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let raw = fs::read_to_string(&path).map_err(|e| RiskError::io(&path, e))?;
                log::info!("Using weight tables from {}", path);
                Self::from_json(&raw)
            }
            _ => builtin_weights_result(),
        }
    }

    pub fn weather_weight(&self, label: &str) -> i32 {
        let key = Weather::from_label(label)
            .map(Weather::korean_name)
            .unwrap_or(label);
        self.weather
            .get(key)
            .copied()
            .unwrap_or(self.default_weather)
    }

    pub fn construction_weight(&self, construction_type: &str) -> i32 {
        self.construction
            .get(construction_category(construction_type))
            .copied()
            .unwrap_or(self.default_construction)
    }

    pub fn process_weight(&self, process: &str) -> i32 {
        self.process
            .get(process)
            .copied()
            .unwrap_or(self.default_process)
    }
}

/// The major category of a `category/sub-type` construction label.
pub fn construction_category(construction_type: &str) -> &str {
    construction_type
        .split('/')
        .next()
        .unwrap_or(construction_type)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    Clear,
    Cloud,
    Fog,
    Downpour,
    Wind,
    Blizzard,
}

impl Weather {
    pub const ALL: [Weather; 6] = [
        Weather::Clear,
        Weather::Cloud,
        Weather::Fog,
        Weather::Downpour,
        Weather::Wind,
        Weather::Blizzard,
    ];

    pub fn korean_name(self) -> &'static str {
        match self {
            Weather::Clear => "맑음",
            Weather::Cloud => "흐림",
            Weather::Fog => "안개",
            Weather::Downpour => "강우",
            Weather::Wind => "강풍",
            Weather::Blizzard => "강설",
        }
    }

    /// Label used by the prediction model's `weather` input.
    pub fn model_value(self) -> &'static str {
        match self {
            Weather::Clear => "sunny",
            Weather::Cloud => "cloudy",
            Weather::Fog => "foggy",
            Weather::Downpour => "rainy",
            Weather::Wind => "windy",
            Weather::Blizzard => "snowy",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Cloud => "Cloud",
            Weather::Fog => "Fog",
            Weather::Downpour => "Downpour",
            Weather::Wind => "Wind",
            Weather::Blizzard => "Blizzard",
        }
    }

    /// Accepts the Korean name, the model value, or the display name.
    pub fn from_label(label: &str) -> Option<Self> {
        Weather::ALL.into_iter().find(|weather| {
            label == weather.korean_name()
                || label == weather.model_value()
                || label == weather.display_name()
        })
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use crate::series::TimeSeries;

/// Relevant subset of a POWER point response
#[derive(Deserialize)]
pub struct PowerResponse {
    pub properties: PowerProperties,
}

#[derive(Deserialize)]
pub struct PowerProperties {
    pub parameter: IndexMap<String, TimeSeries>,
}

/// Temporal resolution of a POWER point request
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temporal {
    Daily,
    Monthly,
    Climatology,
}

impl Temporal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Temporal::Daily       => "daily",
            Temporal::Monthly     => "monthly",
            Temporal::Climatology => "climatology",
        }
    }
}

#[derive(Serialize)]
pub struct ClearSkyAverages {
    pub daily_average: f64,
    pub monthly_average: f64,
    pub climatology_average: f64,
}

#[derive(Serialize)]
pub struct AverageResult {
    pub average_irradiance: f64,
    pub average_clear_sky: ClearSkyAverages,
    pub average_cloud_amount: f64,
    pub total_average: f64,
}

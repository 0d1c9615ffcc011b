pub mod errors;
pub mod models;

use std::time::Duration;
use indexmap::IndexMap;
use log::info;
use reqwest::Client;
use crate::initialization::PowerApi;
use crate::manager_power::errors::PowerError;
use crate::manager_power::models::{AverageResult, ClearSkyAverages, PowerResponse, Temporal};
use crate::series::{
    average, merge, total_average, zip_mean,
    MergedSeries, TimeSeries, ANNUAL_KEY, IRRADIANCE_ADJUSTMENT,
};

const COMMUNITY: &str = "RE";

// Paired POWER parameter identifiers, in fetch order
const ANGLE_PARAMETERS: [&str; 2] = ["SG_SAA", "SG_SZA"];
const SKY_PARAMETERS: [&str; 2] = ["CLRSKY_DAYS", "CLOUD_AMT"];

const IRRADIANCE_PARAMETER: &str = "SI_EF_TILTED_SURFACE";
const IRRADIANCE_SERIES: [&str; 2] = [
    "SI_EF_TILTED_SURFACE_HORIZONTAL",
    "SI_EF_TILTED_SURFACE_VERTICAL",
];

/// Geographic point to query, with an optional start/end year range
struct PointQuery {
    latitude: f64,
    longitude: f64,
    years: Option<(i64, i64)>,
}

/// NASA POWER manager
///
pub struct Power {
    client: Client,
    base_url: String,
}

impl Power {

    /// Returns a new instance of the Power struct
    ///
    /// # Arguments
    ///
    /// * 'config' - POWER api configuration struct
    pub fn new(config: &PowerApi) -> Result<Self, PowerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, base_url: config.base_url.to_string() })
    }

    /// Returns the solar angle series for a point, one record per
    /// period holding the zenith angle as vertical and the azimuth
    /// angle as horizontal
    ///
    /// # Arguments
    ///
    /// * 'latitude' - latitude of the point
    /// * 'longitude' - longitude of the point
    pub async fn get_solar_angle(&self, latitude: f64, longitude: f64) -> Result<MergedSeries, PowerError> {
        let point = PointQuery { latitude, longitude, years: None };

        let azimuth = self
            .fetch_series(Temporal::Climatology, ANGLE_PARAMETERS[0], &point, "Azimuth API Failure")
            .await?;
        let zenith = self
            .fetch_series(Temporal::Climatology, ANGLE_PARAMETERS[1], &point, "Zenith API Failure")
            .await?;

        Ok(merge(&zenith, &azimuth, "vertical", "horizontal")?)
    }

    /// Returns the tilted surface irradiance series for a point, one
    /// record per period holding the horizontal and vertical components
    ///
    /// # Arguments
    ///
    /// * 'latitude' - latitude of the point
    /// * 'longitude' - longitude of the point
    /// * 'start' - start year
    /// * 'end' - end year
    pub async fn get_solar_irradiance(&self, latitude: f64, longitude: f64, start: i64, end: i64) -> Result<MergedSeries, PowerError> {
        let point = PointQuery { latitude, longitude, years: Some((start, end)) };

        let mut parameters = self
            .fetch_parameters(Temporal::Climatology, IRRADIANCE_PARAMETER, &point, "Solar Irradiance API Failure")
            .await?;

        let horizontal = take_series(&mut parameters, IRRADIANCE_SERIES[0])?;
        let vertical = take_series(&mut parameters, IRRADIANCE_SERIES[1])?;

        Ok(merge(&horizontal, &vertical, "horizontal", "vertical")?)
    }

    /// Returns the clear sky days and cloud amount series for a point
    /// at the given temporal resolution, one record per period
    ///
    /// # Arguments
    ///
    /// * 'temporal' - temporal resolution to query
    /// * 'latitude' - latitude of the point
    /// * 'longitude' - longitude of the point
    /// * 'start' - start year
    /// * 'end' - end year
    pub async fn get_clear_sky_and_amount(&self, temporal: Temporal, latitude: f64, longitude: f64, start: i64, end: i64) -> Result<MergedSeries, PowerError> {
        let point = PointQuery { latitude, longitude, years: Some((start, end)) };

        let clear_sky = self
            .fetch_series(temporal, SKY_PARAMETERS[0], &point, "Clear Sky API Failure")
            .await?;
        let cloud_amount = self
            .fetch_series(temporal, SKY_PARAMETERS[1], &point, "Sky Amount API Failure")
            .await?;

        Ok(merge(&clear_sky, &cloud_amount, "clear_sky", "cloud_amount")?)
    }

    /// Returns the aggregate averages for a point over a span of years,
    /// along with the weighted composite score
    ///
    /// Each upstream series is fetched once and reused for the
    /// composite, calls are sequential in declared order.
    ///
    /// # Arguments
    ///
    /// * 'latitude' - latitude of the point
    /// * 'longitude' - longitude of the point
    /// * 'start' - start year
    /// * 'end' - end year
    pub async fn calculate_averages(&self, latitude: f64, longitude: f64, start: i64, end: i64) -> Result<AverageResult, PowerError> {
        let year_span = end - start;
        let climatology_point = PointQuery { latitude, longitude, years: None };
        let ranged_point = PointQuery { latitude, longitude, years: Some((start, end)) };

        let mut irradiance = self
            .fetch_parameters(Temporal::Climatology, IRRADIANCE_PARAMETER, &climatology_point, "Solar Irradiance API Failure")
            .await?;
        let horizontal = take_series(&mut irradiance, IRRADIANCE_SERIES[0])?;
        let vertical = take_series(&mut irradiance, IRRADIANCE_SERIES[1])?;

        let average_irradiance = average(
            &zip_mean(&horizontal, &vertical)?,
            &[ANNUAL_KEY],
            year_span,
            IRRADIANCE_ADJUSTMENT,
        )?;

        let daily = self
            .fetch_series(Temporal::Daily, SKY_PARAMETERS[0], &ranged_point, "Clear Sky Daily API Failure")
            .await?;
        let monthly = self
            .fetch_series(Temporal::Monthly, SKY_PARAMETERS[0], &ranged_point, "Clear Sky Monthly API Failure")
            .await?;
        let climatology = self
            .fetch_series(Temporal::Climatology, SKY_PARAMETERS[0], &ranged_point, "Clear Sky Climatology API Failure")
            .await?;

        let average_clear_sky = ClearSkyAverages {
            daily_average: average(&daily, &[], year_span, 0)?,
            monthly_average: average(&monthly, &[], year_span, 0)?,
            climatology_average: average(&climatology, &[], year_span, 0)?,
        };

        let cloud_amount = self
            .fetch_series(Temporal::Monthly, SKY_PARAMETERS[1], &ranged_point, "Cloud Amount API Failure")
            .await?;
        let average_cloud_amount = average(&cloud_amount, &[], year_span, 0)?;

        let total = total_average(
            average_irradiance,
            average_clear_sky.climatology_average,
            average_cloud_amount,
        );

        Ok(AverageResult {
            average_irradiance,
            average_clear_sky,
            average_cloud_amount,
            total_average: total,
        })
    }

    /// Fetches one named series from a POWER point response
    ///
    /// # Arguments
    ///
    /// * 'temporal' - temporal resolution to query
    /// * 'parameter' - POWER parameter identifier to request
    /// * 'point' - point and year range to query
    /// * 'failure' - description used when the upstream call fails
    async fn fetch_series(&self, temporal: Temporal, parameter: &str, point: &PointQuery, failure: &str) -> Result<TimeSeries, PowerError> {
        let mut parameters = self.fetch_parameters(temporal, parameter, point, failure).await?;

        take_series(&mut parameters, parameter)
    }

    /// Performs a GET against the POWER point endpoint and returns the
    /// parameter map of the response
    ///
    /// A non-success status aborts with the given failure description,
    /// there are no retries.
    ///
    /// # Arguments
    ///
    /// * 'temporal' - temporal resolution to query
    /// * 'parameter' - POWER parameter identifier to request
    /// * 'point' - point and year range to query
    /// * 'failure' - description used when the upstream call fails
    async fn fetch_parameters(&self, temporal: Temporal, parameter: &str, point: &PointQuery, failure: &str) -> Result<IndexMap<String, TimeSeries>, PowerError> {
        let url = format!("{}/temporal/{}/point", self.base_url, temporal.as_str());

        let mut query: Vec<(&str, String)> = vec![
            ("parameters", parameter.to_string()),
            ("community", COMMUNITY.to_string()),
            ("latitude", point.latitude.to_string()),
            ("longitude", point.longitude.to_string()),
        ];
        if let Some((start, end)) = point.years {
            query.push(("start", start.to_string()));
            query.push(("end", end.to_string()));
        }
        query.push(("format", "JSON".to_string()));

        info!("fetching {} {} from POWER", temporal.as_str(), parameter);

        let req = self.client.get(&url)
            .query(&query)
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(PowerError::Api(failure.to_string()));
        }

        let json = req.text().await?;
        let response: PowerResponse = serde_json::from_str(&json)?;

        Ok(response.properties.parameter)
    }
}

/// Removes a named series from a parameter map, failing when the
/// response did not carry it
///
/// # Arguments
///
/// * 'parameters' - parameter map taken from a POWER response
/// * 'key' - name of the series to take
fn take_series(parameters: &mut IndexMap<String, TimeSeries>, key: &str) -> Result<TimeSeries, PowerError> {
    parameters.shift_remove(key)
        .ok_or_else(|| PowerError::Document(format!("{} series missing from POWER response", key)))
}

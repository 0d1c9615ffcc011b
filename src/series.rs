use std::fmt;
use std::fmt::Formatter;
use indexmap::IndexMap;

/// Named numeric time-series as returned by the POWER api, keyed by
/// period identifier in document order (month abbreviations plus "ANN"
/// for climatology data, date strings for daily and monthly data)
pub type TimeSeries = IndexMap<String, f64>;

/// Two series zipped into labeled per-period records
pub type MergedSeries = IndexMap<String, IndexMap<String, f64>>;

/// Annual summary key, excluded from per-period averaging
pub const ANNUAL_KEY: &str = "ANN";

/// Weight applied to the irradiance and clear sky averages in the
/// composite score
pub const TOTAL_AVERAGE_WEIGHT: f64 = 3.3;

/// Denominator adjustment used by the solar irradiance average only.
/// The other averages use no adjustment, the inconsistency is kept
/// as-is pending product review.
pub const IRRADIANCE_ADJUSTMENT: i64 = 1;

#[derive(Debug)]
pub enum SeriesError {
    KeyMismatch(String),
    ZeroDenominator(String),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::KeyMismatch(e)     => write!(f, "SeriesError::KeyMismatch: {}", e),
            SeriesError::ZeroDenominator(e) => write!(f, "SeriesError::ZeroDenominator: {}", e),
        }
    }
}

/// Zips two series into per-period records labeled with the given
/// labels, in call order
///
/// Keys are visited as an ordered union, series_a first, so callers
/// pass the series in the order matching the desired label assignment.
/// A key that does not occur in both series is an error.
///
/// # Arguments
///
/// * 'series_a' - series providing the first value of each record
/// * 'series_b' - series providing the second value of each record
/// * 'label_a' - field name given to values from series_a
/// * 'label_b' - field name given to values from series_b
pub fn merge(
    series_a: &TimeSeries,
    series_b: &TimeSeries,
    label_a: &str,
    label_b: &str,
) -> Result<MergedSeries, SeriesError> {
    let mut zipped: IndexMap<String, Vec<f64>> = IndexMap::new();

    for (key, value) in series_a.iter().chain(series_b.iter()) {
        zipped.entry(key.clone()).or_insert_with(Vec::new).push(*value);
    }

    let mut result: MergedSeries = IndexMap::new();
    for (key, values) in zipped {
        if values.len() != 2 {
            return Err(SeriesError::KeyMismatch(
                format!("period {} is missing from one of the series", key)
            ));
        }

        let mut record: IndexMap<String, f64> = IndexMap::new();
        record.insert(label_a.to_string(), values[0]);
        record.insert(label_b.to_string(), values[1]);
        result.insert(key, record);
    }

    Ok(result)
}

/// Returns the per-period arithmetic mean of two series, keyed in
/// series_a order
///
/// # Arguments
///
/// * 'series_a' - first series
/// * 'series_b' - second series, must have the same key set
pub fn zip_mean(series_a: &TimeSeries, series_b: &TimeSeries) -> Result<TimeSeries, SeriesError> {
    if series_a.len() != series_b.len() {
        return Err(SeriesError::KeyMismatch(
            "series have diverging period keys".to_string()
        ));
    }

    let mut result = TimeSeries::new();
    for (key, a) in series_a {
        let b = series_b.get(key).ok_or_else(|| SeriesError::KeyMismatch(
            format!("period {} is missing from one of the series", key)
        ))?;

        result.insert(key.clone(), (a + b) / 2.0);
    }

    Ok(result)
}

/// Returns the aggregate average of a series over a span of years
///
/// The sum of all values whose key is not excluded is divided by
/// year_span * included-key-count - adjustment. A zero denominator
/// is an error.
///
/// # Arguments
///
/// * 'series' - series to average
/// * 'exclude_keys' - period keys left out of both sum and count
/// * 'year_span' - end year minus start year
/// * 'adjustment' - denominator adjustment, 0 or IRRADIANCE_ADJUSTMENT
pub fn average(
    series: &TimeSeries,
    exclude_keys: &[&str],
    year_span: i64,
    adjustment: i64,
) -> Result<f64, SeriesError> {
    let included: Vec<f64> = series.iter()
        .filter(|(key, _)| !exclude_keys.contains(&key.as_str()))
        .map(|(_, value)| *value)
        .collect();

    let denominator = year_span * included.len() as i64 - adjustment;
    if denominator == 0 {
        return Err(SeriesError::ZeroDenominator(
            "Averaging denominator is zero for the given start and end years.".to_string()
        ));
    }

    Ok(included.iter().sum::<f64>() / denominator as f64)
}

/// Returns the weighted composite score over the three aggregate
/// averages
pub fn total_average(
    average_irradiance: f64,
    climatology_clear_sky: f64,
    average_cloud_amount: f64,
) -> f64 {
    (average_irradiance * TOTAL_AVERAGE_WEIGHT + climatology_clear_sky * TOTAL_AVERAGE_WEIGHT)
        - average_cloud_amount
}

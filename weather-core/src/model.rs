use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

use crate::error::LookupError;

/// Unit system requested from the provider.
///
/// Unknown values are kept verbatim in `Other` and forwarded as-is; the
/// provider decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
    Other(String),
}

impl Units {
    pub fn as_str(&self) -> &str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
            Units::Other(raw) => raw.as_str(),
        }
    }

    /// Parse a query parameter. Missing or blank input means metric.
    pub fn from_param(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
            return Units::Metric;
        };

        match raw.to_lowercase().as_str() {
            "metric" => Units::Metric,
            "imperial" => Units::Imperial,
            "standard" => Units::Standard,
            _ => Units::Other(raw.to_string()),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated inbound weather query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub city: String,
    pub units: Units,
}

impl LookupRequest {
    /// Surrounding whitespace is stripped from `city` before it is sent
    /// upstream or echoed back, so a whitespace-only city counts as missing.
    pub fn new(city: Option<&str>, units: Option<&str>) -> Result<Self, LookupError> {
        let city = city
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LookupError::InvalidRequest("City parameter is required".to_string()))?;

        Ok(Self {
            city: city.to_string(),
            units: Units::from_param(units),
        })
    }
}

/// Normalized payload returned to callers.
///
/// Numbers are passed through exactly as the provider sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub city: String,
    pub weather_description: String,
    pub temperature: Number,
    pub humidity: Number,
    pub wind_speed: Number,
    pub pressure: Number,
    pub weather_icon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_empty_or_whitespace_only_city_is_rejected() {
        for city in [None, Some(""), Some("   ")] {
            let err = LookupRequest::new(city, None).unwrap_err();
            assert!(matches!(err, LookupError::InvalidRequest(_)), "city {city:?}");
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn units_default_to_metric() {
        let req = LookupRequest::new(Some("London"), None).unwrap();
        assert_eq!(req.units, Units::Metric);

        let req = LookupRequest::new(Some("London"), Some("")).unwrap();
        assert_eq!(req.units, Units::Metric);
    }

    #[test]
    fn known_units_parse_case_insensitively() {
        assert_eq!(Units::from_param(Some("Imperial")), Units::Imperial);
        assert_eq!(Units::from_param(Some("STANDARD")), Units::Standard);
        assert_eq!(Units::from_param(Some("metric")), Units::Metric);
    }

    #[test]
    fn unknown_units_pass_through_verbatim() {
        let units = Units::from_param(Some("Kelvinish"));
        assert_eq!(units, Units::Other("Kelvinish".to_string()));
        assert_eq!(units.as_str(), "Kelvinish");
    }

    #[test]
    fn city_is_trimmed_before_lookup_and_echo() {
        let req = LookupRequest::new(Some("  Paris "), Some("imperial")).unwrap();
        assert_eq!(req.city, "Paris");
        assert_eq!(req.units.to_string(), "imperial");
    }
}

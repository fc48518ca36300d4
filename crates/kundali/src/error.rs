use thiserror::Error;

/// Errors that can occur while casting a chart
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid moment: {field} {value} {reason}")]
    InvalidMoment {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid location: {field} {value} out of range [{min}, {max}]")]
    InvalidLocation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("unsupported latitude {latitude}: houses are undefined beyond ±{limit}°")]
    UnsupportedLatitude { latitude: f64, limit: f64 },
    #[error("ephemeris {ephemeris} unavailable at JD {julian_day}: {message}")]
    EphemerisUnavailable {
        ephemeris: String,
        julian_day: f64,
        message: String,
    },
    #[error("invalid ayanamsa: {ayanamsa}, expected one of {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("invalid house system: {system}, expected one of {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
}

impl ChartError {
    pub(crate) fn invalid_moment(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ChartError::InvalidMoment {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_field() {
        let err = ChartError::InvalidLocation {
            field: "latitude",
            value: 97.0,
            min: -90.0,
            max: 90.0,
        };
        assert_eq!(err.to_string(), "invalid location: latitude 97 out of range [-90, 90]");

        let err = ChartError::invalid_moment("month", 13, "out of range 1..=12");
        assert_eq!(err.to_string(), "invalid moment: month 13 out of range 1..=12");
    }

    #[test]
    fn test_unknown_names_list_the_choices() {
        let err = ChartError::InvalidHouseSystem {
            system: "placidus".to_string(),
            valid: vec!["whole_sign".to_string(), "sign_aligned".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid house system: placidus, expected one of [\"whole_sign\", \"sign_aligned\"]"
        );

        let err = ChartError::InvalidAyanamsa {
            ayanamsa: "tropical".to_string(),
            valid: vec!["lahiri".to_string()],
        };
        assert!(err.to_string().starts_with("invalid ayanamsa: tropical"));
    }
}

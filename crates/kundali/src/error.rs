use thiserror::Error;

/// Errors that stop a chart from being generated at all
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}

impl ChartError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ChartError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// Errors that can occur inside an ephemeris provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Ephemeris unavailable for {object} at JD {jd_ut}: {message}")]
    Unavailable {
        object: String,
        jd_ut: f64,
        message: String,
    },
    #[error("Ayanamsa correction unavailable at JD {jd_ut}: {message}")]
    CorrectionUnavailable { jd_ut: f64, message: String },
}

impl EphemerisError {
    pub(crate) fn unavailable(object: impl Into<String>, jd_ut: f64, message: impl Into<String>) -> Self {
        EphemerisError::Unavailable {
            object: object.into(),
            jd_ut,
            message: message.into(),
        }
    }
}

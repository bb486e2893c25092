use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarframeError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error during the nom parsing: {0}")]
    NomParsingError(String),

    #[error("Unrecognized ephemeris number: {0}")]
    UnknownEphemerisNumber(u32),

    #[error("Truncated ephemeris: expected {expected} data records, read {read}")]
    TruncatedEphemeris { expected: usize, read: usize },

    #[error("Invalid ephemeris layout: {0}")]
    InvalidEphemerisLayout(String),

    #[error("Invalid ephemeris source: {0}")]
    InvalidEphemerisSource(String),

    #[error("Frame evaluation exceeded the maximum depth of {0}")]
    FrameRecursionLimit(usize),

    #[error("Invalid two-vector frame axes: {0}")]
    InvalidFrameAxes(String),

    #[error("Invalid orbital elements: {0}")]
    InvalidOrbitElements(String),

    #[error("Kepler equation solver failed: {0}")]
    KeplerSolverFailed(String),

    #[error("Invalid rotation sample: {0}")]
    InvalidSample(String),
}

impl From<roots::SearchError> for StarframeError {
    fn from(err: roots::SearchError) -> Self {
        StarframeError::KeplerSolverFailed(format!("{err:?}"))
    }
}

impl<E: std::fmt::Debug> From<nom::Err<E>> for StarframeError {
    fn from(err: nom::Err<E>) -> Self {
        StarframeError::NomParsingError(format!("{err:?}"))
    }
}

impl PartialEq for StarframeError {
    fn eq(&self, other: &Self) -> bool {
        use StarframeError::*;
        match (self, other) {
            // io errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,

            (NomParsingError(a), NomParsingError(b)) => a == b,
            (UnknownEphemerisNumber(a), UnknownEphemerisNumber(b)) => a == b,
            (
                TruncatedEphemeris {
                    expected: e1,
                    read: r1,
                },
                TruncatedEphemeris {
                    expected: e2,
                    read: r2,
                },
            ) => e1 == e2 && r1 == r2,
            (InvalidEphemerisLayout(a), InvalidEphemerisLayout(b)) => a == b,
            (InvalidEphemerisSource(a), InvalidEphemerisSource(b)) => a == b,
            (FrameRecursionLimit(a), FrameRecursionLimit(b)) => a == b,
            (InvalidFrameAxes(a), InvalidFrameAxes(b)) => a == b,
            (InvalidOrbitElements(a), InvalidOrbitElements(b)) => a == b,
            (KeplerSolverFailed(a), KeplerSolverFailed(b)) => a == b,
            (InvalidSample(a), InvalidSample(b)) => a == b,

            _ => false,
        }
    }
}

use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidDomain { min: f64, max: f64 },
    InvalidGridSize { grid_size: usize },
    EmptySample,
    NonFiniteSample { index: usize, value: f64 },
    InvalidBandwidth { name: &'static str, value: f64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { min, max } => {
                write!(
                    f,
                    "invalid domain: max ({max}) must be finite and greater than min ({min})"
                )
            }
            Self::InvalidGridSize { grid_size } => {
                write!(f, "invalid grid size {grid_size}: need at least 2 points")
            }
            Self::EmptySample => write!(f, "sample set is empty"),
            Self::NonFiniteSample { index, value } => {
                write!(f, "sample {index} is not finite ({value})")
            }
            Self::InvalidBandwidth { name, value } => {
                write!(f, "invalid bandwidth: {name} = {value}")
            }
        }
    }
}

impl std::error::Error for Error {}

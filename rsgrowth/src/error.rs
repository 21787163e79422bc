use thiserror::Error;

/// Errors raised while validating inputs or running the growth model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrowthError {
    #[error("grid of {width}x{height} cells cannot hold {len} values")]
    InvalidGrid {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("{what}: expected {expected:?} (rows, cols), found {found:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("land cover class range differs: t1 spans {t1:?}, t2 spans {t2:?}")]
    ClassRangeMismatch { t1: (u8, u8), t2: (u8, u8) },

    #[error("unknown land cover class {value} at row {row}, col {col}")]
    UnknownClass { value: u8, row: usize, col: usize },

    #[error("at least one growth factor is required")]
    EmptyFactorSet,

    #[error("kernel size must be odd and positive, got {0}")]
    InvalidKernelSize(usize),

    #[error("expected {expected} factor thresholds, got {found}")]
    ThresholdCountMismatch { expected: usize, found: usize },

    #[error("threshold {value} for factor {factor} must be strictly positive or negative")]
    InvalidThreshold { factor: usize, value: f64 },

    #[error("thresholds must be configured before predicting")]
    ThresholdsNotConfigured,

    #[error("base must be 1 or 2, got {0}")]
    InvalidBaseArgument(u8),

    #[error("no prediction available, call predict() first")]
    NotPredicted,

    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

pub type GrowthResult<T> = std::result::Result<T, GrowthError>;

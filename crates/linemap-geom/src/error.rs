use crate::segment::SegmentId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid segment {id}: {defect}")]
    InvalidSegment { id: SegmentId, defect: SegmentDefect },

    #[error("precision epsilon must be finite and strictly positive, got {epsilon}")]
    InvalidPrecision { epsilon: f64 },
}

/// Why a segment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SegmentDefect {
    #[error("coordinates must be finite")]
    NonFinite,
    #[error("endpoints coincide (zero length)")]
    ZeroLength,
}

pub type Result<T> = std::result::Result<T, Error>;

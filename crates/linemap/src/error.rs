#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Geom(#[from] linemap_geom::Error),

    #[error(
        "intersection budget exceeded: more than {budget} splits needed for {segments} input segments"
    )]
    IntersectionBudgetExceeded { budget: usize, segments: usize },

    #[error("invalid builder options: {message}")]
    InvalidOptions { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

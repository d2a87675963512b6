use scrawl_tensor::TensorError;

/// An error type for the thin-plate spline module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TpsError {
    /// The source and target point sets have different sizes.
    #[error("Point count mismatch: got {0} source points and {1} target points")]
    PointCountMismatch(usize, usize),

    /// A solve was requested on an empty point set.
    #[error("Cannot solve a thin-plate spline without control points")]
    EmptyPointSet,

    /// A coordinate is NaN or infinite.
    #[error("Point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),

    /// The linear system has no reliable solution.
    #[error("The thin-plate spline system is singular or ill-conditioned")]
    SingularSystem,

    /// The sampling grid is not shaped (H, W, 2).
    #[error("Invalid sampling grid shape {0:?}, expected (H, W, 2)")]
    InvalidGridShape([usize; 3]),

    /// Error from the underlying tensor.
    #[error(transparent)]
    TensorError(#[from] TensorError),
}

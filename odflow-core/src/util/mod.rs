mod cancellation;
mod square_matrix;

pub use cancellation::CancellationToken;
pub use square_matrix::SquareMatrix;

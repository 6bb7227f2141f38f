use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadtreeError {
    #[error(
        "extents must be finite with min <= max (x_min: {x_min}, y_min: {y_min}, x_max: {x_max}, y_max: {y_max})"
    )]
    InvalidExtent {
        x_min: f32,
        y_min: f32,
        x_max: f32,
        y_max: f32,
    },
    #[error("node capacity must be between 1 and {max} (got {node_capacity})")]
    InvalidNodeCapacity { node_capacity: usize, max: usize },
    #[error("max depth must be at most {max} (got {max_depth})")]
    InvalidMaxDepth { max_depth: u32, max: u32 },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("No usable images found in: {0}")]
    EmptyDataset(String),

    #[error("Pixel column {0} has zero variance across the dataset")]
    DegenerateColumn(usize),

    #[error("Non-finite value in standardized matrix at row {row}, column {col}")]
    NonFiniteData { row: usize, col: usize },

    #[error("SVD failed: {0}")]
    SvdError(String),

    #[error("Failed to write output video: {0}")]
    VideoWriteError(String),

    #[error("Failed to write scatter data: {0}")]
    ScatterWriteError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

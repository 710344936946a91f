#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Config { line: usize, message: String },

    #[error("unknown match mode `{0}`; expected one of: find_first, find_any, find_all")]
    InvalidMatchMode(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;

/// Type alias for Result with anyhow::Error as the error type.
/// Domain errors are `SbomError` values carried inside the anyhow error.
pub type Result<T> = std::result::Result<T, anyhow::Error>;

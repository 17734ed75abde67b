use crate::error::PerchError;

pub type PerchResult<T> = Result<T, PerchError>;

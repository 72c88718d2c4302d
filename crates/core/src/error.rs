use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The uploaded file could not be read to the end.
    #[error("{0}")]
    Upload(#[from] std::io::Error),
}

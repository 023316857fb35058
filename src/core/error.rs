use thiserror::Error;

/// Errors that can arise in the infrastructure layers shared by the item and
/// npc systems.
#[derive(Debug, Error)]
pub enum SystemError {
    /// Wrapper around sqlx's error type.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Returned when the pool cannot produce a connection.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Wrapper around IO errors (data directory creation, template copy).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Returned when an item stack blob is not valid base64.
    #[error("blob decoding error: {0}")]
    BlobEncoding(String),

    /// Returned when a manager operation is handed an id that is not in the
    /// registry. Command layers pre-validate, so reaching this is a caller bug.
    #[error("unknown {kind} id: {id}")]
    UnknownId { kind: &'static str, id: String },

    /// Returned when a persisted enum column holds an unrecognized value.
    #[error("invalid {kind} value: {value}")]
    InvalidEnum { kind: &'static str, value: String },

    /// Returned when the database properties file cannot be parsed.
    #[error("database config error: {0}")]
    Config(String),
}

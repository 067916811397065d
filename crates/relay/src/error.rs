use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Registry and lifecycle faults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Endpoint names are unique across the registry.
    #[error("an endpoint named '{0}' is already registered")]
    DuplicateName(String),

    /// The named endpoint is not in the registry.
    #[error("no endpoint named '{0}' is registered")]
    UnknownEndpoint(String),

    /// The config section resolved to a type the catalog does not hold.
    #[error("no connector registered for type '{0}'")]
    UnknownConnectorType(String),
}

use thiserror::Error;

/// Errors raised by the function registry of a container.
///
/// Building a container with [`with_functions`] fails with [`EmptyName`] or
/// [`DuplicateName`]; invoking an unregistered function with [`run`] fails
/// with [`NotFound`]. Every other operation of the containers signals
/// out-of-range input through `None`, `false` or by handing the rejected
/// value back, never through this type.
///
/// [`with_functions`]: crate::List::with_functions
/// [`run`]: crate::List::run
/// [`EmptyName`]: RegistryError::EmptyName
/// [`DuplicateName`]: RegistryError::DuplicateName
/// [`NotFound`]: RegistryError::NotFound
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("function name must not be empty")]
    EmptyName,
    #[error("`{0}` is registered more than once")]
    DuplicateName(String),
    #[error("{0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

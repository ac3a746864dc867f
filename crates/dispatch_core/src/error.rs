use std::fmt;

/// Entity namespaces used in lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Driver,
    Passenger,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Driver => write!(f, "driver"),
            EntityKind::Passenger => write!(f, "passenger"),
        }
    }
}

/// Errors produced by entity construction, lookups, and record loading.
#[derive(Debug)]
pub enum DispatchError {
    /// A caller-supplied value violated an entity invariant (zero id, bad VIN,
    /// inverted time range).
    InvalidArgument(String),
    /// A lookup by id matched nothing.
    NotFound(EntityKind, u64),
    /// Input records were malformed or referenced entities that do not exist.
    Load(String),
    Csv(csv::Error),
    Io(std::io::Error),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            DispatchError::NotFound(kind, id) => write!(f, "no {kind} with id {id}"),
            DispatchError::Load(msg) => write!(f, "load error: {msg}"),
            DispatchError::Csv(err) => write!(f, "csv error: {err}"),
            DispatchError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Csv(err) => Some(err),
            DispatchError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for DispatchError {
    fn from(err: csv::Error) -> Self {
        DispatchError::Csv(err)
    }
}

impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        DispatchError::Io(err)
    }
}

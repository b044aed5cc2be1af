use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("no response after {attempts} attempts")]
    TimedOut { attempts: u32 },
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("every 16-bit query id has been used")]
    QueryIdsExhausted,
    #[error(transparent)]
    Encode(#[from] dns::EncodeError),
    #[error(transparent)]
    Decode(#[from] dns::DecodeError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A resolution bound that was hit. The affected lookup yields no records.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LimitExceeded {
    /// CNAME chain longer than the indirection ceiling.
    Indirection,
    /// Too many server round-trips for one name.
    Hops,
    /// Too many nested nameserver address lookups.
    Nesting,
}

impl fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            LimitExceeded::Indirection => "Maximum number of indirection levels reached.",
            LimitExceeded::Hops => "Maximum number of queries for a single name reached.",
            LimitExceeded::Nesting => "Maximum depth of nested name server lookups reached.",
        };
        write!(f, "{}", s)
    }
}

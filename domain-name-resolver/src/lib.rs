mod error;
mod query_id;
mod resolver;
mod result_cache;
mod transport;

#[cfg(test)]
mod testing;

pub use error::{LimitExceeded, ResolveError, TransportError};
pub use query_id::QueryIdAllocator;
pub use resolver::{RecordSet, Resolution, Resolver, ResolverLimits};
pub use result_cache::ResultCache;
pub use transport::{exchange, PendingQuery, Transport, UdpTransport, DEFAULT_TIMEOUT, DNS_PORT};

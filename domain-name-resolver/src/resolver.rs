use crate::error::{LimitExceeded, ResolveError};
use crate::query_id::QueryIdAllocator;
use crate::result_cache::ResultCache;
use crate::transport::{exchange, PendingQuery, Transport, DNS_PORT};
use dns::{ResourceRecord, ResponseMessage};
use domain_name_query_types::{NameQuery, QType};
use std::collections::{BTreeSet, VecDeque};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

pub type RecordSet = BTreeSet<ResourceRecord>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResolverLimits {
    /// Deepest CNAME chain that is still followed.
    pub max_indirection: usize,
    /// Server round-trips allowed while resolving one name.
    pub max_hops: usize,
    /// Resends after a timeout, per round-trip.
    pub max_retries: u32,
    /// Frames allowed on the lookup stack, nameserver sub-lookups included.
    pub max_nesting: usize,
}

impl Default for ResolverLimits {
    fn default() -> Self {
        Self {
            max_indirection: 10,
            max_hops: 20,
            max_retries: 2,
            max_nesting: 32,
        }
    }
}

/// Outcome of a lookup: the records found, and any limit that cut part of
/// the resolution short.
#[derive(Debug, Default)]
pub struct Resolution {
    pub records: RecordSet,
    pub limits: Vec<LimitExceeded>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

enum Stage {
    Start,
    // plain iterative walk down the referrals
    Walking,
    // a referral came without glue; resolving its nameservers one by one
    AwaitingNameserver { candidates: VecDeque<String> },
    // the name is an alias; resolving every canonical name
    FollowingCName {
        targets: VecDeque<String>,
        collected: RecordSet,
    },
}

struct Frame {
    query: NameQuery,
    indirection: usize,
    server: Option<Ipv4Addr>,
    hops: usize,
    stage: Stage,
}

impl Frame {
    fn new(query: NameQuery, indirection: usize, root_server: Ipv4Addr) -> Self {
        Self {
            query,
            indirection,
            server: Some(root_server),
            hops: 0,
            stage: Stage::Start,
        }
    }
}

enum Step {
    Continue,
    Call(Frame),
    Return(RecordSet),
}

/// Iterative resolver. Owns the cache, the transport and the ID registry,
/// and runs one lookup at a time.
pub struct Resolver<T> {
    transport: T,
    cache: ResultCache,
    ids: QueryIdAllocator,
    root_server: Ipv4Addr,
    port: u16,
    limits: ResolverLimits,
}

impl<T: Transport> Resolver<T> {
    pub fn new(transport: T, root_server: Ipv4Addr) -> Self {
        Self {
            transport,
            cache: ResultCache::new(),
            ids: QueryIdAllocator::new(),
            root_server,
            port: DNS_PORT,
            limits: ResolverLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ResolverLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn root_server(&self) -> Ipv4Addr {
        self.root_server
    }

    pub fn set_root_server(&mut self, root_server: Ipv4Addr) {
        self.root_server = root_server;
    }

    pub fn limits(&self) -> &ResolverLimits {
        &self.limits
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn lookup(&mut self, query: NameQuery) -> Resolution {
        tracing::debug!("lookup {}", query);

        let mut limits = Vec::new();
        let mut stack = vec![Frame::new(query, 0, self.root_server)];
        let mut returned: Option<RecordSet> = None;

        while let Some(frame) = stack.last_mut() {
            match self.step(frame, returned.take(), &mut limits) {
                Step::Continue => {}
                Step::Call(child) => {
                    if stack.len() >= self.limits.max_nesting {
                        tracing::warn!("{} ({})", LimitExceeded::Nesting, child.query);
                        limits.push(LimitExceeded::Nesting);
                        returned = Some(RecordSet::new());
                    } else {
                        stack.push(child);
                    }
                }
                Step::Return(records) => {
                    stack.pop();
                    if stack.is_empty() {
                        return Resolution { records, limits };
                    }
                    returned = Some(records);
                }
            }
        }

        Resolution {
            records: RecordSet::new(),
            limits,
        }
    }

    fn step(&mut self, frame: &mut Frame, returned: Option<RecordSet>, limits: &mut Vec<LimitExceeded>) -> Step {
        let stage = std::mem::replace(&mut frame.stage, Stage::Walking);

        match stage {
            Stage::Start => {
                if frame.indirection > self.limits.max_indirection {
                    tracing::warn!("{} ({})", LimitExceeded::Indirection, frame.query);
                    limits.push(LimitExceeded::Indirection);
                    return Step::Return(RecordSet::new());
                }
                Step::Continue
            }
            Stage::Walking => self.walk(frame, limits),
            Stage::AwaitingNameserver { mut candidates } => {
                if let Some(address) = returned.iter().flatten().find_map(|r| r.ipv4()) {
                    tracing::debug!("name server address for {} is {}", frame.query, address);
                    frame.server = Some(address);
                    return Step::Continue;
                }

                match candidates.pop_front() {
                    Some(nameserver) => {
                        frame.stage = Stage::AwaitingNameserver { candidates };
                        Step::Call(Frame::new(NameQuery::a_record(&nameserver), 0, self.root_server))
                    }
                    None => {
                        frame.server = None;
                        Step::Continue
                    }
                }
            }
            Stage::FollowingCName {
                mut targets,
                mut collected,
            } => {
                if let Some(records) = returned {
                    collected.extend(records);
                }

                match targets.pop_front() {
                    Some(target) => {
                        let child = NameQuery::new(&target, frame.query.q_type);
                        frame.stage = Stage::FollowingCName { targets, collected };
                        Step::Call(Frame::new(child, frame.indirection + 1, self.root_server))
                    }
                    None => Step::Return(collected),
                }
            }
        }
    }

    // One hop: answer from the cache if possible, otherwise ask the current
    // server and pick the next one from its response.
    fn walk(&mut self, frame: &mut Frame, limits: &mut Vec<LimitExceeded>) -> Step {
        let cached = self.cache.lookup(&frame.query);
        if !cached.is_empty() {
            return Step::Return(cached);
        }

        let aliases = self.cache.lookup(&NameQuery::new(&frame.query.name, QType::Cname));
        let targets: VecDeque<String> = aliases
            .iter()
            .filter_map(|r| r.target_name())
            .map(String::from)
            .collect();
        if !targets.is_empty() {
            tracing::debug!("{} is an alias for {:?}", frame.query.name, targets);
            frame.stage = Stage::FollowingCName {
                targets,
                collected: RecordSet::new(),
            };
            return Step::Continue;
        }

        let server = match frame.server.take() {
            Some(server) => server,
            None => return Step::Return(RecordSet::new()),
        };

        if frame.hops >= self.limits.max_hops {
            tracing::warn!("{} ({})", LimitExceeded::Hops, frame.query);
            limits.push(LimitExceeded::Hops);
            return Step::Return(RecordSet::new());
        }
        frame.hops += 1;

        let response = match self.query_server(&frame.query, server) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("query for {} to {} abandoned: {}", frame.query, server, e);
                return Step::Continue;
            }
        };

        // An authoritative or failed response ends the walk; whatever it
        // carried is already cached.
        if response.is_authoritative() || response.rcode().is_error() {
            return Step::Continue;
        }

        if let Some(glue) = response.glue_address() {
            frame.server = Some(glue);
            return Step::Continue;
        }

        let mut candidates: VecDeque<String> = response.nameservers().into_iter().map(String::from).collect();
        match candidates.pop_front() {
            Some(nameserver) => {
                frame.stage = Stage::AwaitingNameserver { candidates };
                Step::Call(Frame::new(NameQuery::a_record(&nameserver), 0, self.root_server))
            }
            None => Step::Continue,
        }
    }

    fn query_server(&mut self, query: &NameQuery, server: Ipv4Addr) -> Result<ResponseMessage, ResolveError> {
        let id = self.ids.next_id()?;
        let pending = PendingQuery::new(query, id)?;
        let server_addr = SocketAddr::V4(SocketAddrV4::new(server, self.port));

        tracing::debug!("Query ID {} {} {} --> {}", id, query.name, query.q_type, server);

        let response_bytes = exchange(&mut self.transport, &pending, server_addr, self.limits.max_retries)?;
        let response = dns::decode_response(&response_bytes)?;

        tracing::debug!(
            "Response ID: {} Authoritative = {} RCODE = {}",
            response.id(),
            response.is_authoritative(),
            response.rcode()
        );
        trace_section("Answers", response.answers());
        trace_section("Nameservers", response.authorities());
        trace_section("Additional Information", response.additionals());

        self.cache.insert_all(response.records());

        Ok(response)
    }
}

fn trace_section(title: &str, records: &[ResourceRecord]) {
    tracing::debug!("  {} ({})", title, records.len());
    for r in records {
        tracing::debug!("       {:<30} {:<10} {:<4} {}", r.domain(), r.ttl(), r.rtype(), r.value());
    }
}

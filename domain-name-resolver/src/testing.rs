// In-memory name servers for resolver tests.

use crate::transport::Transport;
use domain_name_query_types::{NameQuery, QType};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

enum Data {
    A(Ipv4Addr),
    Name(String),
}

struct Rr {
    name: String,
    rtype: QType,
    ttl: u32,
    data: Data,
}

impl Rr {
    fn new(name: &str, rtype: QType, ttl: u32, data: Data) -> Self {
        Self {
            name: name.to_string(),
            rtype,
            ttl,
            data,
        }
    }
}

pub struct Reply {
    flags: u16,
    answers: Vec<Rr>,
    authorities: Vec<Rr>,
    additionals: Vec<Rr>,
}

impl Reply {
    fn with_flags(flags: u16) -> Self {
        Self {
            flags,
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
        }
    }

    pub fn authoritative() -> Self {
        Self::with_flags(0x8400)
    }

    pub fn referral() -> Self {
        Self::with_flags(0x8000)
    }

    pub fn name_error() -> Self {
        Self::with_flags(0x8403)
    }

    pub fn answer_a(mut self, name: &str, ttl: u32, addr: Ipv4Addr) -> Self {
        self.answers.push(Rr::new(name, QType::A, ttl, Data::A(addr)));
        self
    }

    pub fn answer_cname(mut self, name: &str, target: &str) -> Self {
        self.answers
            .push(Rr::new(name, QType::Cname, 60, Data::Name(target.to_string())));
        self
    }

    pub fn authority_ns(mut self, zone: &str, nameserver: &str) -> Self {
        self.authorities
            .push(Rr::new(zone, QType::Ns, 172800, Data::Name(nameserver.to_string())));
        self
    }

    pub fn additional_a(mut self, name: &str, addr: Ipv4Addr) -> Self {
        self.additionals.push(Rr::new(name, QType::A, 172800, Data::A(addr)));
        self
    }

    fn encode(&self, id: u16, question: &NameQuery) -> Vec<u8> {
        let mut buf = dns::encode_request(question, id).unwrap().to_vec();
        buf[2..4].copy_from_slice(&self.flags.to_be_bytes());
        buf[6..8].copy_from_slice(&(self.answers.len() as u16).to_be_bytes());
        buf[8..10].copy_from_slice(&(self.authorities.len() as u16).to_be_bytes());
        buf[10..12].copy_from_slice(&(self.additionals.len() as u16).to_be_bytes());

        let sections = [&self.answers, &self.authorities, &self.additionals];
        for rr in sections.iter().flat_map(|s| s.iter()) {
            push_name(&mut buf, &rr.name);
            buf.extend_from_slice(&rr.rtype.code().to_be_bytes());
            buf.extend_from_slice(&1u16.to_be_bytes());
            buf.extend_from_slice(&rr.ttl.to_be_bytes());

            let mut rdata = vec![];
            match &rr.data {
                Data::A(addr) => rdata.extend_from_slice(&addr.octets()),
                Data::Name(name) => push_name(&mut rdata, name),
            }
            buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            buf.extend_from_slice(&rdata);
        }

        buf
    }
}

fn push_name(buf: &mut Vec<u8>, name: &str) {
    for label in name.split('.').filter(|l| !l.is_empty()) {
        buf.push(label.len() as u8);
        buf.extend_from_slice(label.as_bytes());
    }
    buf.push(0);
}

/// Answers queries by (server, name, type). Unscripted queries are never
/// answered, so the caller sees a timeout.
#[derive(Default)]
pub struct ScriptedServers {
    replies: HashMap<(Ipv4Addr, NameQuery), Reply>,
    inbox: VecDeque<Vec<u8>>,
    pub sent: Vec<(Ipv4Addr, NameQuery)>,
}

impl ScriptedServers {
    pub fn script(&mut self, server: Ipv4Addr, query: NameQuery, reply: Reply) {
        self.replies.insert((server, query), reply);
    }
}

impl Transport for ScriptedServers {
    fn send_to(&mut self, message: &[u8], server: SocketAddr) -> io::Result<()> {
        let request = dns::decode_response(message).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let query = request
            .question()
            .map(|q| q.to_query())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "query without question"))?;
        let ip = match server.ip() {
            IpAddr::V4(ip) => ip,
            IpAddr::V6(_) => return Err(io::Error::new(io::ErrorKind::Unsupported, "ipv6 server")),
        };

        if let Some(reply) = self.replies.get(&(ip, query.clone())) {
            self.inbox.push_back(reply.encode(request.id(), &query));
        }
        self.sent.push((ip, query));

        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inbox.pop_front() {
            Some(datagram) => {
                buf[..datagram.len()].copy_from_slice(&datagram);
                Ok(datagram.len())
            }
            None => Err(io::Error::new(io::ErrorKind::WouldBlock, "timed out")),
        }
    }
}

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// https://datatracker.ietf.org/doc/html/rfc1035#section-3.2.2
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum QType {
    A,
    Ns,
    Cname,
    Soa,
    Mx,
    Aaaa,
    Other(u16),
}

impl QType {
    pub fn code(&self) -> u16 {
        match self {
            QType::A => 1,
            QType::Ns => 2,
            QType::Cname => 5,
            QType::Soa => 6,
            QType::Mx => 15,
            QType::Aaaa => 28,
            QType::Other(code) => *code,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            1 => QType::A,
            2 => QType::Ns,
            5 => QType::Cname,
            6 => QType::Soa,
            15 => QType::Mx,
            28 => QType::Aaaa,
            other => QType::Other(other),
        }
    }
}

impl fmt::Display for QType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            QType::A => "A",
            QType::Ns => "NS",
            QType::Cname => "CNAME",
            QType::Soa => "SOA",
            QType::Mx => "MX",
            QType::Aaaa => "AAAA",
            QType::Other(code) => return f.pad(&code.to_string()),
        };
        f.pad(s)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown query type: {0}")]
pub struct UnknownQType(pub String);

impl FromStr for QType {
    type Err = UnknownQType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(QType::A),
            "NS" => Ok(QType::Ns),
            "CNAME" => Ok(QType::Cname),
            "SOA" => Ok(QType::Soa),
            "MX" => Ok(QType::Mx),
            "AAAA" => Ok(QType::Aaaa),
            _ => Err(UnknownQType(s.to_string())),
        }
    }
}

pub type Name = String;

/// Host name and record type being looked up. Also the cache key.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NameQuery {
    pub name: Name,
    pub q_type: QType,
}

impl NameQuery {
    /// One trailing dot is dropped so `example.com.` and `example.com` share a
    /// key with the records decoded off the wire. The root name `.` is kept.
    pub fn new(name_str: &str, q_type: QType) -> Self {
        let name = match name_str.strip_suffix('.') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => name_str,
        };
        Self {
            name: Name::from(name),
            q_type,
        }
    }

    pub fn a_record(name_str: &str) -> Self {
        Self::new(name_str, QType::A)
    }
}

impl fmt::Display for NameQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.name, self.q_type)
    }
}

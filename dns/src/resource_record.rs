use crate::error::DecodeError;
use crate::utils::read_name;
use byteorder::{ReadBytesExt, BE};
use domain_name_query_types::{NameQuery, QType};
use std::fmt;
use std::io::{Cursor, Read};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum RecordValue {
    Address(IpAddr),
    Name(String),
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordValue::Address(IpAddr::V4(addr)) => write!(f, "{}", addr),
            // Every group is printed, no `::` shortening.
            RecordValue::Address(IpAddr::V6(addr)) => {
                let groups: Vec<String> = addr.segments().iter().map(|g| format!("{:x}", g)).collect();
                write!(f, "{}", groups.join(":"))
            }
            RecordValue::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A decoded record. Two records are the same only when owner, type, TTL
/// and value all match.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ResourceRecord {
    domain: String,
    rtype: QType,
    ttl: u32,
    value: RecordValue,
}

impl ResourceRecord {
    pub fn new(domain: &str, rtype: QType, ttl: u32, value: RecordValue) -> Self {
        Self {
            domain: domain.to_string(),
            rtype,
            ttl,
            value,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn rtype(&self) -> QType {
        self.rtype
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn value(&self) -> &RecordValue {
        &self.value
    }

    /// The cache key this record is stored under.
    pub fn key(&self) -> NameQuery {
        NameQuery::new(&self.domain, self.rtype)
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self.value {
            RecordValue::Address(IpAddr::V4(addr)) => Some(addr),
            _ => None,
        }
    }

    pub fn target_name(&self) -> Option<&str> {
        match &self.value {
            RecordValue::Name(name) => Some(name),
            RecordValue::Address(_) => None,
        }
    }

    /// Reads one record. `Ok(None)` means the fixed fields were fine but the
    /// RDATA could not be interpreted; the cursor is still moved past it so
    /// the following records can be read.
    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Option<Self>, DecodeError> {
        let domain = read_name(rdr)?;
        let rtype = QType::from_code(rdr.read_u16::<BE>()?);
        let _rclass = rdr.read_u16::<BE>()?;
        let ttl = rdr.read_u32::<BE>()?;
        let rdlength = rdr.read_u16::<BE>()?;

        let rdata_end = rdr.position() + u64::from(rdlength);
        if rdata_end > rdr.get_ref().len() as u64 {
            return Err(DecodeError::Truncated);
        }

        let value = read_value(rdr, rtype, rdlength, rdata_end);
        rdr.set_position(rdata_end);

        match value {
            Ok(value) => Ok(Some(Self {
                domain,
                rtype,
                ttl,
                value,
            })),
            Err(e) => {
                log::debug!("dropping {} record of {}: {}", rtype, domain, e);
                Ok(None)
            }
        }
    }
}

fn read_value(
    rdr: &mut Cursor<&[u8]>,
    rtype: QType,
    rdlength: u16,
    rdata_end: u64,
) -> Result<RecordValue, DecodeError> {
    let value = match rtype {
        QType::A => {
            if rdlength != 4 {
                return Err(DecodeError::BadAddress { rtype, len: rdlength });
            }
            let mut octets = [0u8; 4];
            rdr.read_exact(&mut octets)?;
            RecordValue::Address(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        QType::Aaaa => {
            if rdlength != 16 {
                return Err(DecodeError::BadAddress { rtype, len: rdlength });
            }
            let mut octets = [0u8; 16];
            rdr.read_exact(&mut octets)?;
            RecordValue::Address(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        QType::Mx => {
            let _preference = rdr.read_u16::<BE>()?;
            RecordValue::Name(read_name(rdr)?)
        }
        // NS, CNAME, SOA (MNAME only) and anything else
        _ => RecordValue::Name(read_name(rdr)?),
    };

    if rdr.position() > rdata_end {
        return Err(DecodeError::RdataOverrun);
    }

    Ok(value)
}

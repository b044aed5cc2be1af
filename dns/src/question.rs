use crate::error::{DecodeError, EncodeError};
use crate::utils::{domain_to_qname, read_name};
use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use domain_name_query_types::{NameQuery, QType};
use std::io::Cursor;

// IN
const QCLASS_INTERNET: u16 = 1;

#[derive(Debug)]
pub struct Question {
    domain: String,
    qtype: QType,
    qclass: u16,
}

impl Question {
    pub fn new(query: &NameQuery) -> Self {
        Self {
            domain: query.name.clone(),
            qtype: query.q_type,
            qclass: QCLASS_INTERNET,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        let qname = domain_to_qname(&self.domain)?;
        bytes.extend_from_slice(&qname);

        bytes.write_u16::<BE>(self.qtype.code())?;
        bytes.write_u16::<BE>(self.qclass)?;

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> Result<Self, DecodeError> {
        let domain = read_name(rdr)?;

        let qtype = QType::from_code(rdr.read_u16::<BE>()?);
        let qclass = rdr.read_u16::<BE>()?;

        let q = Self {
            domain,
            qtype,
            qclass,
        };

        Ok(q)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn q_type(&self) -> QType {
        self.qtype
    }

    pub fn q_class(&self) -> u16 {
        self.qclass
    }

    pub fn to_query(&self) -> NameQuery {
        NameQuery::new(&self.domain, self.qtype)
    }
}

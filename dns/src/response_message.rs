use crate::error::DecodeError;
use crate::header::{Header, Rcode};
use crate::question::Question;
use crate::resource_record::ResourceRecord;
use domain_name_query_types::QType;
use std::io::Cursor;
use std::net::Ipv4Addr;

#[derive(Debug)]
pub struct ResponseMessage {
    header: Header,
    question: Option<Question>,
    answers: Vec<ResourceRecord>,
    authorities: Vec<ResourceRecord>,
    additionals: Vec<ResourceRecord>,
}

impl ResponseMessage {
    // 解析 DNS 的响应
    pub fn parse_response(response: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Cursor::new(response);

        let header = Header::parse_from_reader(&mut reader)?;

        let mut question = None;
        for _ in 0..header.qd_count() {
            let q = Question::parse_from_reader(&mut reader)?;
            question.get_or_insert(q);
        }

        let answers = read_section(&mut reader, header.answer_count())?;
        let authorities = read_section(&mut reader, header.authority_count())?;
        let additionals = read_section(&mut reader, header.additional_count())?;

        let msg = Self {
            header,
            question,
            answers,
            authorities,
            additionals,
        };

        Ok(msg)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id()
    }

    pub fn is_authoritative(&self) -> bool {
        self.header.flags().aa
    }

    pub fn rcode(&self) -> Rcode {
        self.header.flags().rcode
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    pub fn authorities(&self) -> &[ResourceRecord] {
        &self.authorities
    }

    pub fn additionals(&self) -> &[ResourceRecord] {
        &self.additionals
    }

    /// Every record that survived decoding, in wire order.
    pub fn records(&self) -> impl Iterator<Item = &ResourceRecord> {
        self.answers
            .iter()
            .chain(self.authorities.iter())
            .chain(self.additionals.iter())
    }

    /// Names of the nameservers a referral points to, in wire order.
    pub fn nameservers(&self) -> Vec<&str> {
        self.authorities
            .iter()
            .filter(|r| r.rtype() == QType::Ns)
            .filter_map(|r| r.target_name())
            .collect()
    }

    /// First additional A record owned by one of the referred nameservers.
    pub fn glue_address(&self) -> Option<Ipv4Addr> {
        let nameservers = self.nameservers();

        self.additionals
            .iter()
            .filter(|r| r.rtype() == QType::A)
            .filter(|r| nameservers.contains(&r.domain()))
            .find_map(|r| r.ipv4())
    }
}

fn read_section(reader: &mut Cursor<&[u8]>, count: u16) -> Result<Vec<ResourceRecord>, DecodeError> {
    let mut records: Vec<ResourceRecord> = Vec::with_capacity(count as usize);
    for _ in 0..count {
        if let Some(record) = ResourceRecord::parse_from_reader(reader)? {
            records.push(record);
        }
    }

    Ok(records)
}

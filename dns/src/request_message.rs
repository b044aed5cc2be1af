use crate::error::EncodeError;
use crate::header::Header;
use crate::question::Question;
use crate::MAX_MESSAGE_SIZE;
use domain_name_query_types::NameQuery;

pub struct RequestMessage {
    header: Header,
    question: Question,
}

impl RequestMessage {
    pub fn new(query: &NameQuery, id: u16) -> Self {
        let header = Header::query(id);
        let question = Question::new(query);

        Self { header, question }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
        let start = bytes.len();

        self.header.to_bytes(bytes)?;
        self.question.to_bytes(bytes)?;

        let written = bytes.len() - start;
        if written > MAX_MESSAGE_SIZE {
            bytes.truncate(start);
            return Err(EncodeError::MessageTooLong(written));
        }

        Ok(())
    }
}

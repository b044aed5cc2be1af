// https://www.reddit.com/r/rust/comments/381y9g/why_udpsocket_in_rust_must_be_created_using_the/

mod error;
mod header;
mod question;
mod request_message;
mod resource_record;
mod response_message;
mod utils;

use bytes::Bytes;
use domain_name_query_types::NameQuery;
use std::io::Cursor;

pub use error::{DecodeError, EncodeError};
pub use header::{Flags, Header, Rcode, HEADER_LEN};
pub use question::Question;
pub use resource_record::{RecordValue, ResourceRecord};
pub use response_message::ResponseMessage;

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
pub const MAX_MESSAGE_SIZE: usize = 512;

pub fn encode_request(query: &NameQuery, id: u16) -> Result<Bytes, EncodeError> {
    let request_msg = request_message::RequestMessage::new(query, id);
    let mut request_bytes: Vec<u8> = Vec::with_capacity(MAX_MESSAGE_SIZE);
    request_msg.to_bytes(&mut request_bytes)?;

    Ok(Bytes::from(request_bytes))
}

pub fn decode_response(response_bytes: &[u8]) -> Result<ResponseMessage, DecodeError> {
    ResponseMessage::parse_response(response_bytes)
}

/// Parses only the 12-byte header, enough to match a datagram to its query.
pub fn decode_header(response_bytes: &[u8]) -> Result<Header, DecodeError> {
    let mut reader = Cursor::new(response_bytes);
    Ok(Header::parse_from_reader(&mut reader)?)
}

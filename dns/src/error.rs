use domain_name_query_types::QType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("label `{0}` is longer than 63 octets")]
    LabelTooLong(String),
    #[error("domain name `{0}` contains an empty label")]
    EmptyLabel(String),
    #[error("query would be {0} octets, the limit is 512")]
    MessageTooLong(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("message is truncated")]
    Truncated,
    #[error("too many compression pointers while reading a name")]
    PointerLoop,
    #[error("domain name is longer than 255 octets")]
    NameTooLong,
    #[error("unsupported label type {0:#04x}")]
    BadLabel(u8),
    #[error("{rtype} record carries {len} octets of address data")]
    BadAddress { rtype: QType, len: u16 },
    #[error("record data runs past its declared length")]
    RdataOverrun,
}

// Cursor reads over a byte slice only fail at the end of the slice.
impl From<std::io::Error> for DecodeError {
    fn from(_: std::io::Error) -> Self {
        DecodeError::Truncated
    }
}

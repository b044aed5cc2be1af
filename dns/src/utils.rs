use crate::error::{DecodeError, EncodeError};
use std::io::Cursor;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

// Legitimate names need far fewer; anything above this is a pointer cycle.
const MAX_POINTERS: usize = 64;

const POINTER_MASK: u8 = 0b1100_0000;

// 把域名转换为 length-prefixed labels，以 0 结尾
pub fn domain_to_qname(domain: &str) -> Result<Vec<u8>, EncodeError> {
    let mut qname: Vec<u8> = Vec::with_capacity(domain.len() + 2);

    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(EncodeError::EmptyLabel(domain.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(EncodeError::LabelTooLong(label.to_string()));
            }

            qname.push(label.len() as u8);
            qname.extend_from_slice(label.as_bytes());
        }
    }

    qname.push(0);

    Ok(qname)
}

/// Reads a possibly compressed domain name at the cursor position.
///
/// On success the cursor is left just past the name as it appears at the
/// starting position: after the terminating zero octet, or after the first
/// pointer if the name was compressed. On failure the cursor is not moved.
pub fn read_name(rdr: &mut Cursor<&[u8]>) -> Result<String, DecodeError> {
    let buf: &[u8] = *rdr.get_ref();

    let mut pos = rdr.position() as usize;
    let mut resume_at: Option<usize> = None;
    let mut pointers = 0;
    let mut wire_len = 0;
    let mut name = String::with_capacity(64);

    loop {
        let len = *buf.get(pos).ok_or(DecodeError::Truncated)?;

        match len & POINTER_MASK {
            POINTER_MASK => {
                let low = *buf.get(pos + 1).ok_or(DecodeError::Truncated)?;

                pointers += 1;
                if pointers > MAX_POINTERS {
                    return Err(DecodeError::PointerLoop);
                }
                if resume_at.is_none() {
                    resume_at = Some(pos + 2);
                }

                pos = (usize::from(len & !POINTER_MASK) << 8) | usize::from(low);
            }
            0 if len == 0 => {
                pos += 1;
                break;
            }
            0 => {
                let label_begin = pos + 1;
                let next = label_begin + usize::from(len);
                let label = buf.get(label_begin..next).ok_or(DecodeError::Truncated)?;

                wire_len += label.len() + 1;
                if wire_len + 1 > MAX_NAME_LEN {
                    return Err(DecodeError::NameTooLong);
                }

                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));

                pos = next;
            }
            _ => return Err(DecodeError::BadLabel(len)),
        }
    }

    rdr.set_position(resume_at.unwrap_or(pos) as u64);

    Ok(name)
}

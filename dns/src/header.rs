use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use std::fmt;
use std::io::Cursor;

pub const HEADER_LEN: usize = 12;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rcode {
    #[default]
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Other(u8),
}

impl Rcode {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Rcode::NoError,
            1 => Rcode::FormatError,
            2 => Rcode::ServerFailure,
            3 => Rcode::NameError,
            4 => Rcode::NotImplemented,
            5 => Rcode::Refused,
            other => Rcode::Other(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Rcode::NoError => 0,
            Rcode::FormatError => 1,
            Rcode::ServerFailure => 2,
            Rcode::NameError => 3,
            Rcode::NotImplemented => 4,
            Rcode::Refused => 5,
            Rcode::Other(code) => *code,
        }
    }

    pub fn is_error(&self) -> bool {
        *self != Rcode::NoError
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Rcode::NoError => "no error",
            Rcode::FormatError => "format error, the server could not interpret the query",
            Rcode::ServerFailure => "server failure",
            Rcode::NameError => "name error, the domain name does not exist",
            Rcode::NotImplemented => "query kind not implemented by the server",
            Rcode::Refused => "query refused",
            Rcode::Other(code) => return write!(f, "unknown rcode {}", code),
        };
        write!(f, "{}", s)
    }
}

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
//
//   0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
// |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
// +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Flags {
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: u8,
    pub rcode: Rcode,
}

impl Flags {
    pub fn from_u16(bits: u16) -> Self {
        Self {
            qr: bits & 0x8000 != 0,
            opcode: ((bits >> 11) & 0x0F) as u8,
            aa: bits & 0x0400 != 0,
            tc: bits & 0x0200 != 0,
            rd: bits & 0x0100 != 0,
            ra: bits & 0x0080 != 0,
            z: ((bits >> 4) & 0x07) as u8,
            rcode: Rcode::from_code((bits & 0x0F) as u8),
        }
    }

    pub fn to_u16(&self) -> u16 {
        let mut bits = 0u16;
        if self.qr {
            bits |= 0x8000;
        }
        bits |= u16::from(self.opcode & 0x0F) << 11;
        if self.aa {
            bits |= 0x0400;
        }
        if self.tc {
            bits |= 0x0200;
        }
        if self.rd {
            bits |= 0x0100;
        }
        if self.ra {
            bits |= 0x0080;
        }
        bits |= u16::from(self.z & 0x07) << 4;
        bits |= u16::from(self.rcode.code() & 0x0F);
        bits
    }
}

// 12 bytes
#[derive(Debug)]
pub struct Header {
    id: u16,
    flags: Flags,
    qdcount: u16, // question 数量，一般为 1
    ancount: u16,
    nscount: u16,
    arcount: u16,
}

impl Header {
    /// Standard iterative query: QR = 0, Opcode = 0, RD = 0.
    pub fn query(id: u16) -> Self {
        Self {
            id,
            flags: Flags::default(),
            qdcount: 1,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }

    pub fn to_bytes(&self, bytes: &mut Vec<u8>) -> std::io::Result<()> {
        bytes.write_u16::<BE>(self.id)?;
        bytes.write_u16::<BE>(self.flags.to_u16())?;
        bytes.write_u16::<BE>(self.qdcount)?;
        bytes.write_u16::<BE>(self.ancount)?;
        bytes.write_u16::<BE>(self.nscount)?;
        bytes.write_u16::<BE>(self.arcount)?;

        Ok(())
    }

    pub fn parse_from_reader(rdr: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        let id = rdr.read_u16::<BE>()?;
        let flags = Flags::from_u16(rdr.read_u16::<BE>()?);
        let qdcount = rdr.read_u16::<BE>()?;
        let ancount = rdr.read_u16::<BE>()?;
        let nscount = rdr.read_u16::<BE>()?;
        let arcount = rdr.read_u16::<BE>()?;

        let h = Self {
            id,
            flags,
            qdcount,
            ancount,
            nscount,
            arcount,
        };

        Ok(h)
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn qd_count(&self) -> u16 {
        self.qdcount
    }

    pub fn answer_count(&self) -> u16 {
        self.ancount
    }

    pub fn authority_count(&self) -> u16 {
        self.nscount
    }

    pub fn additional_count(&self) -> u16 {
        self.arcount
    }
}

use crate::error::TransportError;
use bytes::{Bytes, BytesMut};
use dns::{EncodeError, MAX_MESSAGE_SIZE};
use domain_name_query_types::NameQuery;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

pub const DNS_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A datagram channel to name servers. One query is in flight at a time.
pub trait Transport {
    fn send_to(&mut self, message: &[u8], server: SocketAddr) -> io::Result<()>;

    /// Blocks for the next datagram. A timeout is reported as
    /// `WouldBlock` or `TimedOut`.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

pub struct UdpTransport {
    sock: UdpSocket,
}

impl UdpTransport {
    pub fn bind(timeout: Duration) -> io::Result<Self> {
        let local_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0);
        let sock = UdpSocket::bind(local_addr)?;
        sock.set_read_timeout(Some(timeout))?;

        Ok(Self { sock })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.sock.local_addr()
    }
}

impl Transport for UdpTransport {
    fn send_to(&mut self, message: &[u8], server: SocketAddr) -> io::Result<()> {
        let _send_size = self.sock.send_to(message, server)?;
        Ok(())
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (size, _peer) = self.sock.recv_from(buf)?;
        Ok(size)
    }
}

/// An encoded query together with the transaction ID written into it.
#[derive(Clone, Debug)]
pub struct PendingQuery {
    id: u16,
    message: Bytes,
}

impl PendingQuery {
    pub fn new(query: &NameQuery, id: u16) -> Result<Self, EncodeError> {
        let message = dns::encode_request(query, id)?;
        Ok(Self { id, message })
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }
}

fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut)
}

/// Sends `query` and waits for the matching response.
///
/// Datagrams with another ID or without the QR bit are ignored and do not
/// count as a timeout. Each timeout resends the query, up to `max_retries`
/// times. Any other socket error ends the exchange at once.
pub fn exchange<T>(
    transport: &mut T,
    query: &PendingQuery,
    server: SocketAddr,
    max_retries: u32,
) -> Result<Bytes, TransportError>
where
    T: Transport + ?Sized,
{
    let mut resp_buf = BytesMut::zeroed(MAX_MESSAGE_SIZE);
    let mut attempts = 0;

    while attempts <= max_retries {
        attempts += 1;
        transport.send_to(query.message(), server)?;

        loop {
            match transport.recv(&mut resp_buf) {
                Ok(size) => match dns::decode_header(&resp_buf[..size]) {
                    Ok(header) if header.id() == query.id() && header.flags().qr => {
                        resp_buf.truncate(size);
                        return Ok(resp_buf.freeze());
                    }
                    _ => {
                        tracing::trace!("discarding unrelated datagram of {} bytes from the wire", size);
                    }
                },
                Err(e) if is_timeout(&e) => {
                    tracing::debug!("query {} to {} timed out (attempt {})", query.id(), server, attempts);
                    break;
                }
                Err(e) => return Err(TransportError::Io(e)),
            }
        }
    }

    Err(TransportError::TimedOut { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct StubTransport {
        sent: usize,
        inbox: VecDeque<io::Result<Vec<u8>>>,
    }

    impl Transport for StubTransport {
        fn send_to(&mut self, _message: &[u8], _server: SocketAddr) -> io::Result<()> {
            self.sent += 1;
            Ok(())
        }

        fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.inbox.pop_front() {
                Some(Ok(datagram)) => {
                    buf[..datagram.len()].copy_from_slice(&datagram);
                    Ok(datagram.len())
                }
                Some(Err(e)) => Err(e),
                None => Err(io::Error::new(io::ErrorKind::WouldBlock, "timed out")),
            }
        }
    }

    fn server() -> SocketAddr {
        "192.0.2.53:53".parse().unwrap()
    }

    fn reply(id: u16, flags: u16) -> Vec<u8> {
        let mut bytes = vec![];
        bytes.extend_from_slice(&id.to_be_bytes());
        bytes.extend_from_slice(&flags.to_be_bytes());
        bytes.extend_from_slice(&[0; 8]);
        bytes
    }

    fn query(id: u16) -> PendingQuery {
        PendingQuery::new(&NameQuery::a_record("z.cn"), id).unwrap()
    }

    #[test]
    fn gives_up_after_two_retries() {
        let mut t = StubTransport::default();

        let err = exchange(&mut t, &query(7), server(), 2).unwrap_err();

        assert!(matches!(err, TransportError::TimedOut { attempts: 3 }));
        assert_eq!(3, t.sent);
    }

    #[test]
    fn unrelated_datagrams_do_not_use_up_retries() {
        let mut t = StubTransport::default();
        t.inbox.push_back(Ok(reply(8, 0x8000)));
        t.inbox.push_back(Ok(reply(7, 0x0000)));
        t.inbox.push_back(Ok(vec![0, 7]));
        t.inbox.push_back(Ok(reply(7, 0x8400)));

        let bytes = exchange(&mut t, &query(7), server(), 2).unwrap();

        assert_eq!(reply(7, 0x8400), bytes.to_vec());
        assert_eq!(1, t.sent);
    }

    #[test]
    fn answer_after_a_timeout() {
        let mut t = StubTransport::default();
        t.inbox.push_back(Err(io::Error::new(io::ErrorKind::TimedOut, "timed out")));
        t.inbox.push_back(Ok(reply(7, 0x8000)));

        assert!(exchange(&mut t, &query(7), server(), 2).is_ok());
        assert_eq!(2, t.sent);
    }

    #[test]
    fn socket_error_is_fatal_for_the_hop() {
        let mut t = StubTransport::default();
        t.inbox.push_back(Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")));

        let err = exchange(&mut t, &query(7), server(), 2).unwrap_err();

        assert!(matches!(err, TransportError::Io(_)));
        assert_eq!(1, t.sent);
    }

    #[test]
    fn pending_query_carries_its_id() {
        let q = query(0xBEEF);
        assert_eq!(0xBEEF, q.id());
        assert_eq!(&[0xBE, 0xEF], &q.message()[..2]);
    }
}

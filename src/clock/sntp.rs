use super::flyover_clock::{ClockError, TimeAuthority};
use async_trait::async_trait;
use std::net::SocketAddr;
use tokio::net::UdpSocket;

/// Size of an SNTP packet without extension fields.
const NTP_PACKET_SIZE: usize = 48;
/// LI = 0, VN = 3, Mode = 3 (client).
const CLIENT_REQUEST_HEADER: u8 = 0x1B;
/// Byte offset of the transmit timestamp seconds.
const TRANSMIT_TIMESTAMP_OFFSET: usize = 40;
/// Seconds between 1900-01-01 and 1970-01-01.
const NTP_UNIX_EPOCH_DELTA: i64 = 2_208_988_800;
const MODE_SERVER: u8 = 4;
const MODE_BROADCAST: u8 = 5;

pub(crate) fn request_packet() -> [u8; NTP_PACKET_SIZE] {
    let mut packet = [0u8; NTP_PACKET_SIZE];
    packet[0] = CLIENT_REQUEST_HEADER;
    packet
}

/// Extracts the transmit timestamp of an SNTP reply as epoch seconds.
///
/// Timestamps with the most significant bit cleared are taken to be in NTP
/// era 1 (after 2036-02-07).
pub(crate) fn decode_reply(packet: &[u8]) -> Result<i64, ClockError> {
    if packet.len() != NTP_PACKET_SIZE {
        return Err(ClockError::MalformedResponse);
    }
    let mode = packet[0] & 0x07;
    let stratum = packet[1];
    if (mode != MODE_SERVER && mode != MODE_BROADCAST) || stratum == 0 {
        return Err(ClockError::MalformedResponse);
    }
    let mut seconds = [0u8; 4];
    seconds.copy_from_slice(&packet[TRANSMIT_TIMESTAMP_OFFSET..TRANSMIT_TIMESTAMP_OFFSET + 4]);
    let seconds = u32::from_be_bytes(seconds);
    if seconds == 0 {
        return Err(ClockError::MalformedResponse);
    }
    let ntp_seconds = if seconds & 0x8000_0000 == 0 {
        i64::from(seconds) + (1_i64 << 32)
    } else {
        i64::from(seconds)
    };
    Ok(ntp_seconds - NTP_UNIX_EPOCH_DELTA)
}

/// SNTP (RFC 4330) client for a single server.
pub struct SntpAuthority {
    /// `host:port` of the time server.
    server: String,
}

impl SntpAuthority {
    pub fn new(server: &str) -> Self { Self { server: String::from(server) } }

    async fn resolve(&self) -> Result<SocketAddr, ClockError> {
        tokio::net::lookup_host(self.server.as_str())
            .await
            .map_err(|_| ClockError::NoResponse)?
            .next()
            .ok_or(ClockError::NoResponse)
    }
}

#[async_trait]
impl TimeAuthority for SntpAuthority {
    fn name(&self) -> &str { self.server.as_str() }

    async fn query(&self) -> Result<i64, ClockError> {
        let server = self.resolve().await?;
        let local: SocketAddr = if server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };
        let socket = UdpSocket::bind(local).await.map_err(|_| ClockError::NoResponse)?;
        socket.connect(server).await.map_err(|_| ClockError::NoResponse)?;
        socket.send(&request_packet()).await.map_err(|_| ClockError::NoResponse)?;
        // one spare byte so oversized replies are detected
        let mut buf = [0u8; NTP_PACKET_SIZE + 1];
        let len = socket.recv(&mut buf).await.map_err(|_| ClockError::NoResponse)?;
        decode_reply(&buf[..len])
    }
}

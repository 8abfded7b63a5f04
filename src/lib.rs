#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

mod card;
mod cis;
mod common;
pub mod fil;
mod transport;

pub use card::{discover_card, CardInfo};
pub use cis::{read_cis, CisInfo};
pub use common::{DCMD_MAXLEN, SDIO_MAX_FUNCS};
pub use fil::Fil;
pub use transport::{ByteTransport, DcmdTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Transport transaction timed out.
    Timeout,
    /// Transport delivered a malformed response.
    InvalidResponse,
    /// Transport-reported command failure.
    Fail,
    /// Zero-length CIS tuple on a non-null tag.
    MalformedTuple,
    /// Common CIS pointer outside the valid CIS window.
    BadCisAddress,
    /// Encoded iovar would overflow the staging buffer.
    BufferTooSmall,
    /// Firmware rejected the command (generic reporting mode).
    Io,
    /// Firmware rejected the command; raw status code (raw reporting mode).
    Firmware(u32),
}

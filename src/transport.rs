use crate::Error;

/// Direct byte access to the card, one bus transaction per call (CMD52
/// class). Implementations surface timeouts and command failures as
/// [`Error`]; retry policy lives in the transport or above the caller,
/// never here.
pub trait ByteTransport {
    async fn read_byte(&self, func: u8, addr: u32) -> Result<u8, Error>;
}

/// Device-command channel to chipset firmware.
///
/// A transport-level failure is reported through `Err`; the firmware status
/// code travels separately in `Ok` so the caller can tell the two layers
/// apart. Negative status means the firmware rejected the command.
pub trait DcmdTransport {
    /// Get-style command: `buf` carries the encoded request in and is
    /// overwritten with the response.
    async fn query(&self, cmd: u32, buf: &mut [u8]) -> Result<i32, Error>;

    /// Set-style command: `buf` is consumed, nothing is written back.
    async fn set(&self, cmd: u32, buf: &[u8]) -> Result<i32, Error>;
}

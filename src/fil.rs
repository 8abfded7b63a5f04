//! Firmware interface layer: get/set operations against chipset firmware,
//! layered over a [`DcmdTransport`].

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use log::warn;

use crate::common::DCMD_MAXLEN;
use crate::{DcmdTransport, Error};

mod errstr;
mod iovar;

pub use errstr::errstr;

const TAG: &'static str = "[FIL]";

/// One firmware command session.
///
/// The staging buffer is shared between the encoded request and, on
/// get-style calls, the response, so the lock is held across the whole
/// encode/dispatch/copy-out sequence. One command in flight per session.
pub struct Fil<T: DcmdTransport> {
    transport: T,
    fwerr_raw: bool,
    buf: Mutex<CriticalSectionRawMutex, [u8; DCMD_MAXLEN]>,
}

impl<T: DcmdTransport> Fil<T> {
    pub fn new(transport: T) -> Self {
        Fil {
            transport,
            fwerr_raw: false,
            buf: Mutex::new([0u8; DCMD_MAXLEN]),
        }
    }

    /// Report raw firmware status codes instead of collapsing a firmware
    /// rejection into [`Error::Io`]. Per session, off by default.
    pub fn set_fwerr_raw(&mut self, raw: bool) {
        self.fwerr_raw = raw;
    }

    /// Run one encoded command and fold the two error layers into one
    /// outcome. A transport error is always final; a negative firmware
    /// status is a rejection, reported per the session mode.
    async fn dispatch(&self, cmd: u32, buf: &mut [u8], set: bool) -> Result<(), Error> {
        let status = if set {
            self.transport.set(cmd, buf).await
        } else {
            self.transport.query(cmd, buf).await
        };
        let fwerr = match status {
            Ok(fwerr) => fwerr,
            Err(err) => {
                warn!("{TAG} command {cmd:#x} error: {err:?}");
                return Err(err);
            }
        };
        if fwerr < 0 {
            let code = fwerr.unsigned_abs();
            warn!(
                "{TAG} command {cmd:#x} firmware error: {code} ({})",
                errstr(code)
            );
            if self.fwerr_raw {
                return Err(Error::Firmware(code));
            }
            return Err(Error::Io);
        }
        Ok(())
    }

    /// Set-style device command. The payload is clamped to the staging
    /// capacity; firmware expects truncation, not an error.
    pub async fn cmd_data_set(&self, cmd: u32, data: &[u8]) -> Result<(), Error> {
        let mut buf = self.buf.lock().await;
        let n = data.len().min(DCMD_MAXLEN);
        buf[..n].copy_from_slice(&data[..n]);
        self.dispatch(cmd, &mut buf[..n], true).await
    }

    /// Get-style device command; `data` seeds the request and receives the
    /// response.
    pub async fn cmd_data_get(&self, cmd: u32, data: &mut [u8]) -> Result<(), Error> {
        let mut buf = self.buf.lock().await;
        let n = data.len().min(DCMD_MAXLEN);
        buf[..n].copy_from_slice(&data[..n]);
        self.dispatch(cmd, &mut buf[..n], false).await?;
        data[..n].copy_from_slice(&buf[..n]);
        Ok(())
    }

    pub async fn cmd_int_set(&self, cmd: u32, val: u32) -> Result<(), Error> {
        self.cmd_data_set(cmd, &val.to_le_bytes()).await
    }

    pub async fn cmd_int_get(&self, cmd: u32) -> Result<u32, Error> {
        let mut le = [0u8; 4];
        self.cmd_data_get(cmd, &mut le).await?;
        Ok(u32::from_le_bytes(le))
    }
}

use log::warn;

use super::{Fil, TAG};
use crate::common::{DCMD_GET_VAR, DCMD_SET_VAR};
use crate::{DcmdTransport, Error};

/// Encode `name` + NUL + `data` into `buf`. Returns the encoded length, or
/// 0 when the pair does not fit; `buf` is left untouched in that case.
pub(crate) fn create_iovar(name: &str, data: &[u8], buf: &mut [u8]) -> usize {
    let len = name.len() + 1;
    if len + data.len() > buf.len() {
        return 0;
    }
    buf[..name.len()].copy_from_slice(name.as_bytes());
    buf[name.len()] = 0;
    // data goes right behind the name string
    buf[len..len + data.len()].copy_from_slice(data);
    len + data.len()
}

/// bsscfg-scoped encoding: `"bsscfg:"` + name + NUL + little-endian index +
/// data. Index zero degrades to the plain iovar form; the firmware does not
/// take the prefix on the primary interface.
pub(crate) fn create_bsscfg(bsscfgidx: u32, name: &str, data: &[u8], buf: &mut [u8]) -> usize {
    const PREFIX: &[u8] = b"bsscfg:";

    if bsscfgidx == 0 {
        return create_iovar(name, data, buf);
    }

    let namelen = name.len() + 1;
    let iolen = PREFIX.len() + namelen + 4 + data.len();
    if iolen > buf.len() {
        return 0;
    }

    let mut p = 0;
    buf[p..p + PREFIX.len()].copy_from_slice(PREFIX);
    p += PREFIX.len();
    buf[p..p + name.len()].copy_from_slice(name.as_bytes());
    p += name.len();
    buf[p] = 0;
    p += 1;
    buf[p..p + 4].copy_from_slice(&bsscfgidx.to_le_bytes());
    p += 4;
    buf[p..p + data.len()].copy_from_slice(data);
    iolen
}

impl<T: DcmdTransport> Fil<T> {
    pub async fn iovar_data_set(&self, name: &str, data: &[u8]) -> Result<(), Error> {
        let mut buf = self.buf.lock().await;
        let buflen = create_iovar(name, data, &mut buf[..]);
        if buflen == 0 {
            warn!("{TAG} iovar {name}: encoded request does not fit");
            return Err(Error::BufferTooSmall);
        }
        self.dispatch(DCMD_SET_VAR, &mut buf[..buflen], true).await
    }

    pub async fn iovar_data_get(&self, name: &str, data: &mut [u8]) -> Result<(), Error> {
        let mut buf = self.buf.lock().await;
        let buflen = create_iovar(name, data, &mut buf[..]);
        if buflen == 0 {
            warn!("{TAG} iovar {name}: encoded request does not fit");
            return Err(Error::BufferTooSmall);
        }
        self.dispatch(DCMD_GET_VAR, &mut buf[..buflen], false).await?;
        data.copy_from_slice(&buf[..data.len()]);
        Ok(())
    }

    pub async fn iovar_int_set(&self, name: &str, val: u32) -> Result<(), Error> {
        self.iovar_data_set(name, &val.to_le_bytes()).await
    }

    pub async fn iovar_int_get(&self, name: &str) -> Result<u32, Error> {
        let mut le = [0u8; 4];
        self.iovar_data_get(name, &mut le).await?;
        Ok(u32::from_le_bytes(le))
    }

    pub async fn bsscfg_data_set(
        &self,
        bsscfgidx: u32,
        name: &str,
        data: &[u8],
    ) -> Result<(), Error> {
        let mut buf = self.buf.lock().await;
        let buflen = create_bsscfg(bsscfgidx, name, data, &mut buf[..]);
        if buflen == 0 {
            warn!("{TAG} bsscfg iovar {name}: encoded request does not fit");
            return Err(Error::BufferTooSmall);
        }
        self.dispatch(DCMD_SET_VAR, &mut buf[..buflen], true).await
    }

    pub async fn bsscfg_data_get(
        &self,
        bsscfgidx: u32,
        name: &str,
        data: &mut [u8],
    ) -> Result<(), Error> {
        let mut buf = self.buf.lock().await;
        let buflen = create_bsscfg(bsscfgidx, name, data, &mut buf[..]);
        if buflen == 0 {
            warn!("{TAG} bsscfg iovar {name}: encoded request does not fit");
            return Err(Error::BufferTooSmall);
        }
        self.dispatch(DCMD_GET_VAR, &mut buf[..buflen], false).await?;
        data.copy_from_slice(&buf[..data.len()]);
        Ok(())
    }

    pub async fn bsscfg_int_set(&self, bsscfgidx: u32, name: &str, val: u32) -> Result<(), Error> {
        self.bsscfg_data_set(bsscfgidx, name, &val.to_le_bytes()).await
    }

    pub async fn bsscfg_int_get(&self, bsscfgidx: u32, name: &str) -> Result<u32, Error> {
        let mut le = [0u8; 4];
        self.bsscfg_data_get(bsscfgidx, name, &mut le).await?;
        Ok(u32::from_le_bytes(le))
    }
}

use log::{info, warn};

use crate::cis::{read_cis, CisInfo};
use crate::common::*;
use crate::{ByteTransport, Error};

const TAG: &'static str = "[SDIO_CARD]";

/// Everything discovery learned about one card. `num_funcs` counts function
/// 0, so a bare card with nothing behind the common function reports 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardInfo {
    pub num_funcs: u8,
    pub funcs: [CisInfo; SDIO_MAX_FUNCS],
}

/// Pointer to the common CIS, three little-endian bytes in the CCCR.
async fn common_cis_addr<B: ByteTransport>(bus: &B) -> Result<u32, Error> {
    let mut addr = u32::from(bus.read_byte(0, SD_IO_CCCR_CISPTR).await?);
    addr |= u32::from(bus.read_byte(0, SD_IO_CCCR_CISPTR + 1).await?) << 8;
    addr |= u32::from(bus.read_byte(0, SD_IO_CCCR_CISPTR + 2).await?) << 16;

    if addr < SD_IO_CIS_START || addr > SD_IO_CIS_START + SD_IO_CIS_SIZE {
        warn!("{TAG} bad CIS address: {addr:#06X}");
        return Err(Error::BadCisAddress);
    }
    Ok(addr)
}

/// Pointer to a numbered function's CIS, read from its FBR block.
async fn fbr_cis_addr<B: ByteTransport>(bus: &B, func: u8) -> Result<u32, Error> {
    let fbr = SD_IO_FBR_START * u32::from(func) + SD_IO_FBR_CISPTR;
    let mut addr = u32::from(bus.read_byte(0, fbr).await?);
    addr |= u32::from(bus.read_byte(0, fbr + 1).await?) << 8;
    addr |= u32::from(bus.read_byte(0, fbr + 2).await?) << 16;
    Ok(addr)
}

/// Enumerate the card: function 0 first, then each reported function until
/// one is missing or unreadable.
///
/// `func_count` is the function count the card reported at identify time.
/// Function 0 is mandatory and any failure on it is fatal. For numbered
/// functions a read or parse failure ends enumeration with what we have so
/// far, and a zero vendor id means the function slot is simply not
/// populated.
pub async fn discover_card<B: ByteTransport>(
    bus: &B,
    func_count: u8,
) -> Result<CardInfo, Error> {
    let cis_addr = common_cis_addr(bus).await?;

    let mut ci = CardInfo::default();
    ci.funcs[0] = read_cis(bus, 0, cis_addr).await?;
    ci.num_funcs = 1;
    info!(
        "{TAG} F0: vendor {:#06X} product {:#06X} max block size {} bytes",
        ci.funcs[0].vendor, ci.funcs[0].product, ci.funcs[0].max_block_size
    );

    let count = (func_count as usize).min(SDIO_MAX_FUNCS - 1);
    for i in 1..=count {
        let func = i as u8;
        let cis_addr = match fbr_cis_addr(bus, func).await {
            Ok(addr) => addr,
            Err(err) => {
                warn!("{TAG} F{func}: failed to read FBR CIS pointer: {err:?}");
                break;
            }
        };
        let fi = match read_cis(bus, func, cis_addr).await {
            Ok(fi) => fi,
            Err(err) => {
                warn!("{TAG} F{func}: CIS parse failed: {err:?}");
                break;
            }
        };
        if fi.vendor == 0 {
            info!("{TAG} F{func} doesn't exist");
            break;
        }
        info!(
            "{TAG} F{func}: vendor {:#06X} product {:#06X} max block size {} bytes",
            fi.vendor, fi.product, fi.max_block_size
        );
        ci.funcs[i] = fi;
        ci.num_funcs += 1;
    }

    Ok(ci)
}

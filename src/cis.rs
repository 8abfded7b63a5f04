use log::{debug, info, warn};

use crate::common::*;
use crate::{ByteTransport, Error};

const TAG: &'static str = "[SDIO_CIS]";

/// Metadata collected from one function's CIS chain. Fields stay zero until
/// the corresponding tuple shows up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CisInfo {
    pub vendor: u16,
    pub product: u16,
    pub max_block_size: u16,
}

/// Walk the tuple chain of `func` starting at `cis_addr`.
///
/// All reads go through function 0 regardless of whose CIS this is; that is
/// where the card maps every chain. A transport error at any point aborts
/// the whole scan.
pub async fn read_cis<B: ByteTransport>(
    bus: &B,
    func: u8,
    cis_addr: u32,
) -> Result<CisInfo, Error> {
    let mut info = CisInfo::default();
    let mut cis_addr = cis_addr;
    let mut tuple_count = 0u32;

    while tuple_count < CIS_TUPLE_MAX {
        let mut addr = cis_addr;
        let tag = bus.read_byte(0, addr).await?;
        addr += 1;
        if tag == SD_IO_CISTPL_END {
            break;
        }
        if tag == SD_IO_CISTPL_NULL {
            // padding byte, no length follows
            cis_addr += 1;
            continue;
        }

        let len = bus.read_byte(0, addr).await?;
        addr += 1;
        if len == 0 {
            warn!("{TAG} parse error: 0-length tuple {tag:#04X}");
            return Err(Error::MalformedTuple);
        }

        match tag {
            SD_IO_CISTPL_VERS_1 => vers_1(bus, addr, len).await?,
            SD_IO_CISTPL_MANFID => {
                info.vendor = read_le16(bus, addr).await?;
                info.product = read_le16(bus, addr + 2).await?;
            }
            SD_IO_CISTPL_FUNCID => {
                // nothing we need from it
            }
            SD_IO_CISTPL_FUNCE => funce(bus, func, addr, len, &mut info).await?,
            _ => debug!("{TAG} skipping tuple {tag:#04X} len {len:#04X}"),
        }

        if len == 0xFF {
            // an all-ones length closes the chain, same as an END tag
            break;
        }
        cis_addr += 2 + u32::from(len);
        tuple_count += 1;
    }

    Ok(info)
}

async fn read_le16<B: ByteTransport>(bus: &B, addr: u32) -> Result<u16, Error> {
    let lo = bus.read_byte(0, addr).await?;
    let hi = bus.read_byte(0, addr + 1).await?;
    Ok(u16::from(lo) | u16::from(hi) << 8)
}

/// VERS_1 carries up to four NUL-terminated product strings after a 2-byte
/// version header. Log them, nothing else; the scan must stay inside the
/// tuple payload and inside 256 bytes.
async fn vers_1<B: ByteTransport>(bus: &B, addr: u32, len: u8) -> Result<(), Error> {
    if len < 2 {
        return Ok(());
    }
    let addr = addr + 2;
    let payload = u32::from(len) - 2;

    let mut buf = [0u8; 256];
    let mut start = 0usize;
    let mut count = 0usize;
    let mut i = 0usize;
    while count < 4 && i + 4 < 256 && (i as u32) < payload {
        let ch = bus.read_byte(0, addr + i as u32).await?;
        if ch == 0xFF {
            break;
        }
        buf[i] = ch;
        if ch == 0 {
            if let Ok(s) = core::str::from_utf8(&buf[start..i]) {
                if !s.is_empty() {
                    info!("{TAG} card info: {s}");
                }
            }
            start = i + 1;
            count += 1;
        }
        i += 1;
    }
    Ok(())
}

/// FUNCE payload layout differs between the common function and numbered
/// functions; the first payload byte says which one we are looking at. A
/// mismatch is skipped without error, some cards legitimately omit it.
async fn funce<B: ByteTransport>(
    bus: &B,
    func: u8,
    addr: u32,
    len: u8,
    info: &mut CisInfo,
) -> Result<(), Error> {
    if len < 4 {
        debug!("{TAG} FUNCE is too short: {len}");
        return Ok(());
    }
    let kind = bus.read_byte(0, addr).await?;
    let expected = if func == 0 {
        SD_IO_FUNCE_COMMON
    } else {
        SD_IO_FUNCE_FUNCTION
    };
    if kind != expected {
        debug!("{TAG} FUNCE type {kind:#04X}, expected {expected:#04X}, skipping");
        return Ok(());
    }

    if func == 0 {
        info.max_block_size = read_le16(bus, addr + 1).await?;
    } else if len >= 0x0E {
        info.max_block_size = read_le16(bus, addr + 0xC).await?;
    } else {
        debug!("{TAG} FUNCE is too short for function layout: {len}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::MemCard;
    use embassy_futures::block_on;

    const BASE: u32 = SD_IO_CIS_START;

    fn card_with(bytes: &[u8]) -> MemCard {
        let mut card = MemCard::new();
        card.load(BASE, bytes);
        card
    }

    #[test]
    fn end_tag_only_yields_zeroed_info() {
        let card = card_with(&[SD_IO_CISTPL_END]);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info, CisInfo::default());
    }

    #[test]
    fn manfid_round_trip() {
        let card = card_with(&[
            SD_IO_CISTPL_MANFID,
            0x04,
            0x34,
            0x12,
            0x78,
            0x56,
            SD_IO_CISTPL_END,
        ]);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info.vendor, 0x1234);
        assert_eq!(info.product, 0x5678);
    }

    #[test]
    fn zero_length_tuple_is_fatal() {
        let card = card_with(&[0x20, 0x00, SD_IO_CISTPL_END]);
        assert_eq!(
            block_on(read_cis(&card, 0, BASE)),
            Err(Error::MalformedTuple)
        );
    }

    #[test]
    fn null_padding_advances_by_one() {
        let card = card_with(&[
            SD_IO_CISTPL_NULL,
            SD_IO_CISTPL_MANFID,
            0x04,
            0x34,
            0x12,
            0x78,
            0x56,
            SD_IO_CISTPL_END,
        ]);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info.vendor, 0x1234);
        assert_eq!(info.product, 0x5678);
    }

    #[test]
    fn funce_common_block_size() {
        // function 0 layout: type byte 0x00, block size at payload +1..=+2
        let card = card_with(&[
            SD_IO_CISTPL_FUNCE,
            0x04,
            0x00,
            0x00,
            0x02,
            0x11,
            SD_IO_CISTPL_END,
        ]);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info.max_block_size, 0x0200);
    }

    #[test]
    fn funce_function_block_size() {
        // numbered-function layout: type byte 0x01, block size at +0xC..=+0xD
        let mut payload = [0u8; 0x0E];
        payload[0] = 0x01;
        payload[0xC] = 0x00;
        payload[0xD] = 0x02;
        let mut stream = vec![SD_IO_CISTPL_FUNCE, payload.len() as u8];
        stream.extend_from_slice(&payload);
        stream.push(SD_IO_CISTPL_END);
        let card = card_with(&stream);
        let info = block_on(read_cis(&card, 1, BASE)).unwrap();
        assert_eq!(info.max_block_size, 0x0200);
    }

    #[test]
    fn funce_type_mismatch_is_skipped() {
        // function-layout discriminator while parsing function 0
        let card = card_with(&[
            SD_IO_CISTPL_FUNCE,
            0x04,
            0x01,
            0x00,
            0x02,
            0x11,
            SD_IO_CISTPL_END,
        ]);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info.max_block_size, 0);
    }

    #[test]
    fn funce_too_short_is_skipped() {
        let card = card_with(&[SD_IO_CISTPL_FUNCE, 0x02, 0x00, 0x00, SD_IO_CISTPL_END]);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info.max_block_size, 0);
    }

    #[test]
    fn vers_1_scan_stays_inside_tuple() {
        // two strings then MANFID right behind the tuple; a scan that
        // overruns the payload would corrupt the MANFID parse
        let mut stream = vec![SD_IO_CISTPL_VERS_1, 0x0C, 0x01, 0x00];
        stream.extend_from_slice(b"acme\0wifi\0");
        stream.extend_from_slice(&[SD_IO_CISTPL_MANFID, 0x04, 0x34, 0x12, 0x78, 0x56]);
        stream.push(SD_IO_CISTPL_END);
        let card = card_with(&stream);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info.vendor, 0x1234);
    }

    #[test]
    fn all_ones_length_ends_chain() {
        // garbage after the 0xFF-length tuple must never be read
        let card = card_with(&[0x80, 0xFF]);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info, CisInfo::default());
    }

    #[test]
    fn tuple_cap_stops_scan_without_error() {
        // 25 unknown single-byte tuples, no terminator anywhere
        let mut stream = Vec::new();
        for _ in 0..25 {
            stream.extend_from_slice(&[0x80, 0x01, 0xAB]);
        }
        let card = card_with(&stream);
        let info = block_on(read_cis(&card, 0, BASE)).unwrap();
        assert_eq!(info, CisInfo::default());
        // tag + length per tuple, 20 tuples, then the cap kicks in
        assert_eq!(card.read_count(), 40);
    }

    #[test]
    fn read_error_aborts_scan() {
        // length byte of the second tuple is unmapped
        let card = card_with(&[0x80, 0x01, 0xAB, 0x81]);
        assert_eq!(block_on(read_cis(&card, 0, BASE)), Err(Error::Timeout));
    }
}

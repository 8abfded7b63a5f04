#![allow(dead_code)]

/* CCCR registers (function 0 address space) */
pub const SD_IO_CCCR_START: u32 = 0x0000;
pub const SD_IO_CCCR_SIZE: u32 = 0x100;
pub const SD_IO_CCCR_CISPTR: u32 = 0x09; /* 3 bytes, little-endian */

/* Function Basic Registers: FBR block for function N starts at N * 0x100,
 * the per-function CIS pointer sits at offset 0x9 within the block. */
pub const SD_IO_FBR_START: u32 = 0x100;
pub const SD_IO_FBR_CISPTR: u32 = 0x9;

/* Valid window for CIS chains on the card */
pub const SD_IO_CIS_START: u32 = 0x1000;
pub const SD_IO_CIS_SIZE: u32 = 0x17000;

/* CIS tuple tags */
pub const SD_IO_CISTPL_NULL: u8 = 0x00;
pub const SD_IO_CISTPL_VERS_1: u8 = 0x15;
pub const SD_IO_CISTPL_MANFID: u8 = 0x20;
pub const SD_IO_CISTPL_FUNCID: u8 = 0x21;
pub const SD_IO_CISTPL_FUNCE: u8 = 0x22;
pub const SD_IO_CISTPL_END: u8 = 0xFF;

/* FUNCE type discriminator, first payload byte */
pub const SD_IO_FUNCE_COMMON: u8 = 0x00; /* function 0 layout */
pub const SD_IO_FUNCE_FUNCTION: u8 = 0x01; /* numbered-function layout */

/// A CIS chain with more tuples than this is assumed corrupt; parsing stops
/// with whatever was collected. Protocol-meaningful cap, do not raise.
pub const CIS_TUPLE_MAX: u32 = 20;

/// Function 0 plus up to seven application functions.
pub const SDIO_MAX_FUNCS: usize = 8;

/* Firmware device commands used by the iovar layer */
pub const DCMD_GET_VAR: u32 = 262;
pub const DCMD_SET_VAR: u32 = 263;

/// Staging buffer capacity; command payloads are clamped to this before
/// dispatch.
pub const DCMD_MAXLEN: usize = 8192;

//! Firmware status codes mapped to their BCME_* names, for log output.

// clang-format off
static BCME_NAMES: [&str; 53] = [
    "BCME_OK",                  /* 0 */
    "BCME_ERROR",               /* 1 */
    "BCME_BADARG",              /* 2 */
    "BCME_BADOPTION",           /* 3 */
    "BCME_NOTUP",               /* 4 */
    "BCME_NOTDOWN",             /* 5 */
    "BCME_NOTAP",               /* 6 */
    "BCME_NOTSTA",              /* 7 */
    "BCME_BADKEYIDX",           /* 8 */
    "BCME_RADIOOFF",            /* 9 */
    "BCME_NOTBANDLOCKED",       /* 10 */
    "BCME_NOCLK",               /* 11 */
    "BCME_BADRATESET",          /* 12 */
    "BCME_BADBAND",             /* 13 */
    "BCME_BUFTOOSHORT",         /* 14 */
    "BCME_BUFTOOLONG",          /* 15 */
    "BCME_BUSY",                /* 16 */
    "BCME_NOTASSOCIATED",       /* 17 */
    "BCME_BADSSIDLEN",          /* 18 */
    "BCME_OUTOFRANGECHAN",      /* 19 */
    "BCME_BADCHAN",             /* 20 */
    "BCME_BADADDR",             /* 21 */
    "BCME_NORESOURCE",          /* 22 */
    "BCME_UNSUPPORTED",         /* 23 */
    "BCME_BADLEN",              /* 24 */
    "BCME_NOTREADY",            /* 25 */
    "BCME_EPERM",               /* 26 */
    "BCME_NOMEM",               /* 27 */
    "BCME_ASSOCIATED",          /* 28 */
    "BCME_RANGE",               /* 29 */
    "BCME_NOTFOUND",            /* 30 */
    "BCME_WME_NOT_ENABLED",     /* 31 */
    "BCME_TSPEC_NOTFOUND",      /* 32 */
    "BCME_ACM_NOTSUPPORTED",    /* 33 */
    "BCME_NOT_WME_ASSOCIATION", /* 34 */
    "BCME_SDIO_ERROR",          /* 35 */
    "BCME_DONGLE_DOWN",         /* 36 */
    "BCME_VERSION",             /* 37 */
    "BCME_TXFAIL",              /* 38 */
    "BCME_RXFAIL",              /* 39 */
    "BCME_NODEVICE",            /* 40 */
    "BCME_NMODE_DISABLED",      /* 41 */
    "BCME_NONRESIDENT",         /* 42 */
    "BCME_SCANREJECT",          /* 43 */
    "BCME_USAGE_ERROR",         /* 44 */
    "BCME_IOCTL_ERROR",         /* 45 */
    "BCME_SERIAL_PORT_ERR",     /* 46 */
    "BCME_DISABLED",            /* 47 */
    "BCME_DECERR",              /* 48 */
    "BCME_ENCERR",              /* 49 */
    "BCME_MICERR",              /* 50 */
    "BCME_REPLAY",              /* 51 */
    "BCME_IE_NOTFOUND",         /* 52 */
];

/// Name for a (magnitude) firmware status code.
pub fn errstr(err: u32) -> &'static str {
    BCME_NAMES.get(err as usize).copied().unwrap_or("(unknown)")
}

//! Startup check that the process runs with root privileges.
//!
//! The effective uid is read from `/proc/self/status` rather than through
//! `libc`, keeping the crate free of `unsafe`.

use crate::error::PrivilegeDenied;
use std::fs;

const STATUS_PATH: &str = "/proc/self/status";

/// Succeed only when the effective uid is 0.
pub fn require_root() -> Result<(), PrivilegeDenied> {
    let status = fs::read_to_string(STATUS_PATH)
        .map_err(|e| PrivilegeDenied::Unknown(format!("reading {STATUS_PATH}: {e}")))?;
    let euid = parse_effective_uid(&status)
        .ok_or_else(|| PrivilegeDenied::Unknown(format!("no Uid line in {STATUS_PATH}")))?;
    check_root(euid)
}

pub fn check_root(euid: u32) -> Result<(), PrivilegeDenied> {
    if euid == 0 {
        Ok(())
    } else {
        Err(PrivilegeDenied::NotRoot(euid))
    }
}

/// Extract the effective uid from the contents of `/proc/<pid>/status`.
///
/// The `Uid:` line lists real, effective, saved and filesystem uids.
pub fn parse_effective_uid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("Uid:"))
        .and_then(|ids| ids.split_whitespace().nth(1))
        .and_then(|euid| euid.parse().ok())
}

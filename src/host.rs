//! Host facts shown in the status header: host name, primary IPv4 address
//! and the current time.

use crate::command::{parse_ipv4, Catalog, CommandRunner};
use chrono::Local;
use std::fs;
use std::net::Ipv4Addr;

const HOSTNAME_PATH: &str = "/proc/sys/kernel/hostname";

/// One snapshot of the status header contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostStatus {
    pub hostname: String,
    pub address: String,
    pub timestamp: String,
}

/// Source of [`HostStatus`] snapshots.
pub trait HostProbe {
    fn status(&mut self) -> HostStatus;
}

/// Probe reading the kernel host name and running `ip -br a`.
pub struct SystemProbe<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SystemProbe<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> HostProbe for SystemProbe<R> {
    fn status(&mut self) -> HostStatus {
        let output = self.runner.execute(&Catalog::host_addresses());
        let address = if output.is_success() {
            primary_ipv4(&output.text).map(|a| a.to_string())
        } else {
            None
        };
        HostStatus {
            hostname: read_hostname(),
            address: address.unwrap_or_else(|| "-".to_string()),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

fn read_hostname() -> String {
    fs::read_to_string(HOSTNAME_PATH)
        .ok()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// First IPv4 address of the first interface that is `UP` in `ip -br a`
/// output.
pub fn primary_ipv4(ip_brief: &str) -> Option<Ipv4Addr> {
    ip_brief
        .lines()
        .filter(|line| line.contains(" UP "))
        .find_map(|line| {
            line.split_whitespace()
                .skip(2)
                .map(|token| token.split('/').next().unwrap_or(token))
                .find_map(|token| parse_ipv4(token).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CapturedOutput, CommandLine, Status};

    const IP_BRIEF: &str = "\
lo               UNKNOWN        127.0.0.1/8 ::1/128
eth0             DOWN           10.9.9.9/24
wlan0            UP             fe80::1/64 192.168.1.23/24
docker0          UP             172.17.0.1/16
";

    #[test]
    fn test_primary_ipv4_skips_down_and_ipv6() {
        assert_eq!(primary_ipv4(IP_BRIEF), Some(Ipv4Addr::new(192, 168, 1, 23)));
    }

    #[test]
    fn test_primary_ipv4_none_when_nothing_up() {
        assert_eq!(primary_ipv4("lo UNKNOWN 127.0.0.1/8\n"), None);
        assert_eq!(primary_ipv4(""), None);
    }

    struct FixedRunner(CapturedOutput);

    impl CommandRunner for FixedRunner {
        fn execute(&mut self, command: &CommandLine) -> CapturedOutput {
            assert_eq!(command.to_string(), "ip -br a");
            self.0.clone()
        }
    }

    #[test]
    fn test_system_probe_uses_ip_output() {
        let mut probe = SystemProbe::new(FixedRunner(CapturedOutput {
            text: IP_BRIEF.to_string(),
            status: Status::NormalExit(0),
        }));
        let status = probe.status();
        assert_eq!(status.address, "192.168.1.23");
        assert!(!status.hostname.is_empty());
        assert_eq!(status.timestamp.len(), "2026-01-01 00:00:00".len());
    }

    #[test]
    fn test_system_probe_falls_back_to_dash() {
        let mut probe = SystemProbe::new(FixedRunner(CapturedOutput {
            text: "Error: could not start `ip`\n".to_string(),
            status: Status::SpawnFailure,
        }));
        assert_eq!(probe.status().address, "-");
    }
}

//! # Process Runner
//!
//! Runs one external command to completion and captures everything it
//! printed.
//!
//! ## Output capture
//!
//! The child's stdout and stderr are both connected to the write end of a
//! single anonymous pipe, so diagnostics land in the same stream, in the
//! order they were written. The parent reads the pipe in
//! [`READ_CHUNK`]-sized pieces until EOF, growing the buffer geometrically
//! with fallible reservations. Nothing is truncated unless a capture limit
//! was configured, in which case the excess is still drained and a marker
//! line says how much was dropped.
//!
//! ## Status
//!
//! | Outcome | [`Status`] | [`Status::code`] |
//! |---------|------------|------------------|
//! | exited normally | `NormalExit(code)` | `code` |
//! | killed by a signal | `AbnormalTermination` | 128 |
//! | could not be started | `SpawnFailure` | 127 |
//!
//! Failures to start or to capture are never returned as errors: they become
//! a [`CapturedOutput`] carrying a diagnostic text, so the caller always has
//! something to show.

use crate::command::CommandLine;
use crate::error::CaptureError;
use std::io::{ErrorKind, Read};
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Size of a single read from the output pipe.
pub const READ_CHUNK: usize = 4096;

/// Code reported for a command that could not be started.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// Code reported for a command that did not exit normally.
pub const ABNORMAL_TERMINATION_CODE: i32 = 128;

/// Normalized completion status of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NormalExit(i32),
    AbnormalTermination,
    SpawnFailure,
}

impl Status {
    pub fn code(self) -> i32 {
        match self {
            Status::NormalExit(code) => code,
            Status::AbnormalTermination => ABNORMAL_TERMINATION_CODE,
            Status::SpawnFailure => SPAWN_FAILURE_CODE,
        }
    }

    pub fn is_success(self) -> bool {
        self == Status::NormalExit(0)
    }
}

/// Text and status of one command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub text: String,
    pub status: Status,
}

impl CapturedOutput {
    /// Displayable stand-in for a command that could not be run or captured.
    pub fn diagnostic(err: &CaptureError) -> Self {
        let status = match err {
            CaptureError::Spawn { .. } | CaptureError::Pipe(_) => Status::SpawnFailure,
            CaptureError::Allocation { .. } | CaptureError::Read { .. } => {
                Status::AbnormalTermination
            }
        };
        Self {
            text: format!("Error: {err}\n"),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Anything able to run a [`CommandLine`] and hand back its output.
pub trait CommandRunner {
    fn execute(&mut self, command: &CommandLine) -> CapturedOutput;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    max_capture_bytes: Option<usize>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` bytes of each command's output (`None` keeps all).
    pub fn with_max_capture(limit: Option<usize>) -> Self {
        Self {
            max_capture_bytes: limit,
        }
    }

    fn try_execute(&self, command: &CommandLine) -> Result<CapturedOutput, CaptureError> {
        let (mut reader, writer) = std::io::pipe().map_err(CaptureError::Pipe)?;
        let stderr_writer = writer.try_clone().map_err(CaptureError::Pipe)?;

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer);
        let spawned = cmd.spawn();
        // `cmd` still owns our copies of the write end; the reader only sees
        // EOF once every copy is closed.
        drop(cmd);

        let mut child = spawned.map_err(|source| CaptureError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let drained = match drain(&mut reader, &command.program, self.max_capture_bytes) {
            Ok(drained) => drained,
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(err);
            }
        };

        let exit = child.wait().map_err(|source| CaptureError::Read {
            program: command.program.clone(),
            source,
        })?;
        let status = match exit.code() {
            Some(code) => Status::NormalExit(code),
            None => Status::AbnormalTermination,
        };

        let mut text = String::from_utf8_lossy(&drained.bytes).into_owned();
        if drained.discarded > 0 {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&format!(
                "[output truncated after {} bytes, {} bytes discarded]\n",
                drained.bytes.len(),
                drained.discarded
            ));
        }

        Ok(CapturedOutput { text, status })
    }
}

impl CommandRunner for ProcessRunner {
    fn execute(&mut self, command: &CommandLine) -> CapturedOutput {
        match self.try_execute(command) {
            Ok(output) => {
                info!(
                    command = %command,
                    code = output.status.code(),
                    bytes = output.text.len(),
                    "command finished"
                );
                output
            }
            Err(err) => {
                warn!(command = %command, error = %err, "command could not be run");
                CapturedOutput::diagnostic(&err)
            }
        }
    }
}

struct Drained {
    bytes: Vec<u8>,
    discarded: usize,
}

/// Read `reader` to EOF, keeping at most `limit` bytes.
fn drain(
    reader: &mut impl Read,
    program: &str,
    limit: Option<usize>,
) -> Result<Drained, CaptureError> {
    let mut bytes: Vec<u8> = Vec::new();
    bytes
        .try_reserve_exact(READ_CHUNK)
        .map_err(|_| CaptureError::Allocation { captured: 0 })?;
    let mut discarded = 0usize;
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(CaptureError::Read {
                    program: program.to_string(),
                    source,
                })
            }
        };

        let keep = match limit {
            Some(limit) => n.min(limit.saturating_sub(bytes.len())),
            None => n,
        };
        if keep > 0 {
            if bytes.capacity() - bytes.len() < keep {
                // Double the capacity (or more, if one chunk needs it).
                let additional = bytes.capacity().max(keep);
                bytes
                    .try_reserve_exact(additional)
                    .map_err(|_| CaptureError::Allocation {
                        captured: bytes.len(),
                    })?;
            }
            bytes.extend_from_slice(&chunk[..keep]);
        }
        discarded += n - keep;
    }

    Ok(Drained { bytes, discarded })
}

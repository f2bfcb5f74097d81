//! Subprocesses with a hard timeout.
//!
//! The calling thread owns the `Child` and polls `try_wait()`; helper threads
//! own the output pipes. On timeout the child is killed and reaped within a
//! bounded window, so a hung tool never blocks the run.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Bytes of stdout / stderr kept per stream.
const MAX_OUTPUT_BYTES: u64 = 64 * 1024;

/// Poll interval for `try_wait()`.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Time allowed to reap a killed child and join reader threads.
const REAP_TIMEOUT: Duration = Duration::from_secs(2);

/// Result of a finished or killed command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// `None` when the process timed out or could not be reaped.
    pub status: Option<ExitStatus>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        !self.timed_out && self.status.is_some_and(|s| s.success())
    }

    /// Exit code, `-1` for signals, timeouts and unknown status.
    pub fn code(&self) -> i32 {
        self.status.and_then(|s| s.code()).unwrap_or(-1)
    }
}

/// Run `program args..` in `cwd`, killing it after `timeout`.
///
/// Spawn failures (program not found, permission denied) are the only
/// errors. On timeout the captured output is empty.
pub fn run_with_timeout(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout: Duration,
) -> io::Result<CommandOutput> {
    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break Some(status),
            None if Instant::now() >= deadline => {
                tracing::warn!(program, timeout_secs = timeout.as_secs(), "command timed out, killing");
                let _ = child.kill();
                let _ = bounded_reap(&mut child);
                drop(child);
                abandon_after(stdout);
                abandon_after(stderr);
                return Ok(CommandOutput {
                    status: None,
                    stdout: String::new(),
                    stderr: String::new(),
                    timed_out: true,
                });
            }
            None => std::thread::sleep(POLL_INTERVAL),
        }
    };

    Ok(CommandOutput {
        status,
        stdout: join_reader(stdout),
        stderr: join_reader(stderr),
        timed_out: false,
    })
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = (&mut pipe).take(MAX_OUTPUT_BYTES).read_to_end(&mut buf);
        // Drain the rest so the child never blocks on a full pipe.
        let _ = io::copy(&mut pipe, &mut io::sink());
        buf
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let Some(handle) = handle else {
        return String::new();
    };
    let deadline = Instant::now() + REAP_TIMEOUT;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            // A grandchild still holds the pipe open.
            return String::new();
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    match handle.join() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
        Err(_) => String::new(),
    }
}

/// Give a reader thread a bounded window to finish, then leave it behind.
fn abandon_after(handle: Option<JoinHandle<Vec<u8>>>) {
    let _ = join_reader(handle);
}

fn bounded_reap(child: &mut std::process::Child) -> Option<ExitStatus> {
    let deadline = Instant::now() + REAP_TIMEOUT;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) if Instant::now() < deadline => std::thread::sleep(POLL_INTERVAL),
            Ok(None) | Err(_) => return None,
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn captures_output_and_status() {
        let dir = tempfile::TempDir::new().unwrap();
        let out = run_with_timeout(
            "sh",
            &args(&["-c", "echo hello; echo oops >&2; exit 3"]),
            dir.path(),
            Duration::from_secs(10),
        )
        .unwrap();
        assert!(!out.timed_out);
        assert_eq!(out.code(), 3);
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "oops");
        assert!(!out.success());
    }

    #[test]
    fn kills_on_timeout() {
        let dir = tempfile::TempDir::new().unwrap();
        let start = Instant::now();
        let out = run_with_timeout("sleep", &args(&["30"]), dir.path(), Duration::from_millis(200)).unwrap();
        assert!(out.timed_out);
        assert!(out.stdout.is_empty());
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(run_with_timeout("vigil-no-such-program", &[], dir.path(), Duration::from_secs(1)).is_err());
    }
}

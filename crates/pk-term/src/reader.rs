// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Stdin polling on the calling thread.
//
// The app loop is single-threaded: it asks for input, optionally waits,
// and gets back whatever bytes arrived. `poll()` gives us the three modes
// the loop needs: wait forever (blocking reads), wait briefly (finishing
// an escape sequence) and don't wait at all (non-blocking reads).

use std::io;
use std::time::Duration;

/// Bytes per read. A keypress is 1-6 bytes, a paste can be kilobytes.
const READ_BUF_SIZE: usize = 4096;

/// Reads raw bytes from stdin with an optional timeout.
pub struct StdinPoller {
    buf: Box<[u8; READ_BUF_SIZE]>,
}

impl StdinPoller {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Box::new([0; READ_BUF_SIZE]),
        }
    }

    /// Wait up to `timeout` (`None` waits indefinitely) and return the
    /// bytes that are available. An empty vector means nothing arrived.
    ///
    /// # Errors
    ///
    /// `UnexpectedEof` when stdin is closed, or the OS error from
    /// `poll`/`read`. An interrupted wait returns an empty vector.
    #[cfg(unix)]
    pub fn read(&mut self, timeout: Option<Duration>) -> io::Result<Vec<u8>> {
        use std::os::unix::io::AsRawFd;

        let fd = io::stdin().as_raw_fd();

        let ready = unsafe {
            let mut pfd = libc::pollfd {
                fd,
                events: libc::POLLIN,
                revents: 0,
            };
            libc::poll(&raw mut pfd, 1, poll_timeout_ms(timeout))
        };

        if ready < 0 {
            let err = io::Error::last_os_error();
            return if err.kind() == io::ErrorKind::Interrupted {
                Ok(Vec::new())
            } else {
                Err(err)
            };
        }
        if ready == 0 {
            return Ok(Vec::new());
        }

        let n = unsafe { libc::read(fd, self.buf.as_mut_ptr().cast(), self.buf.len()) };

        if n < 0 {
            let err = io::Error::last_os_error();
            return if err.kind() == io::ErrorKind::Interrupted {
                Ok(Vec::new())
            } else {
                Err(err)
            };
        }
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }

        #[allow(clippy::cast_sign_loss)] // n > 0
        Ok(self.buf[..n as usize].to_vec())
    }

    /// Without `poll()` the timeout cannot be honored; reads block.
    #[cfg(not(unix))]
    pub fn read(&mut self, _timeout: Option<Duration>) -> io::Result<Vec<u8>> {
        use std::io::Read;

        match io::stdin().lock().read(&mut self.buf[..])? {
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed")),
            n => Ok(self.buf[..n].to_vec()),
        }
    }
}

impl Default for StdinPoller {
    fn default() -> Self {
        Self::new()
    }
}

/// `poll()` timeout argument: -1 for no timeout, otherwise milliseconds
/// clamped to `i32`.
#[cfg_attr(not(unix), allow(dead_code))]
fn poll_timeout_ms(timeout: Option<Duration>) -> i32 {
    timeout.map_or(-1, |d| i32::try_from(d.as_millis()).unwrap_or(i32::MAX))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

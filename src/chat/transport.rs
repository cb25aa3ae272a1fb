//! Byte stream underneath the chat client

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

/// A bidirectional byte stream with a configurable read timeout
///
/// Implemented for `TcpStream`; tests substitute a scripted in-memory stream.
pub trait Transport: Read + Write {
    /// Bound how long the next read may block
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout cannot be applied.
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;

    /// Release the stream; later reads and writes fail
    ///
    /// # Errors
    ///
    /// Returns an error if the stream could not be shut down.
    fn close(&mut self) -> io::Result<()>;
}

impl Transport for TcpStream {
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }

    fn close(&mut self) -> io::Result<()> {
        match self.shutdown(Shutdown::Both) {
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}

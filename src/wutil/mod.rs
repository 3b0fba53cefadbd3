use crate::common::wcs2string;
use crate::wchar::wstr;
use std::os::unix::prelude::*;

pub use fish_printf::sprintf;

/// Write bytes to a file descriptor. This does NOT retry on EINTR or EAGAIN.
pub fn write_to_fd(input: &[u8], fd: RawFd) -> nix::Result<usize> {
    nix::unistd::write(unsafe { BorrowedFd::borrow_raw(fd) }, input)
}

/// Write a wide string to a file descriptor, looping over short writes.
/// Return None on error, in which case the number of bytes actually written cannot be obtained.
pub fn wwrite_to_fd(input: &wstr, fd: RawFd) -> Option<usize> {
    let bytes = wcs2string(input);
    let mut buf = &bytes[..];
    let mut total_written = 0;
    while !buf.is_empty() {
        let Ok(amt) = write_to_fd(buf, fd) else {
            return None;
        };
        assert!(amt <= buf.len(), "Wrote more than requested");
        total_written += amt;
        buf = &buf[amt..];
    }
    Some(total_written)
}

//! Prototypes for various functions, mostly string utilities, that are used by most parts of
//! shortopt.

use crate::wchar::prelude::*;
use once_cell::sync::OnceCell;

/// Name of the running program, as used in diagnostics.
pub static PROGRAM_NAME: OnceCell<&'static wstr> = OnceCell::new();

/// Program name used when nothing has been set, e.g. in tests.
pub const DEFAULT_PROGRAM_NAME: &wstr = L!("shortopt");

/// Return the program name for diagnostics.
pub fn program_name() -> &'static wstr {
    PROGRAM_NAME.get().copied().unwrap_or(DEFAULT_PROGRAM_NAME)
}

/// Convert a byte string (typically an element of the process argument vector) to a wide
/// string. Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn str2wcstring(inp: &[u8]) -> WString {
    if inp.is_empty() {
        return WString::new();
    }
    let mut result = WString::new();
    result.reserve(inp.len());
    result.push_str(&String::from_utf8_lossy(inp));
    result
}

/// Convert a wide string to a UTF-8 byte string.
pub fn wcs2string(input: &wstr) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let mut buff = [0_u8; 4];
    for c in input.chars() {
        result.extend_from_slice(c.encode_utf8(&mut buff).as_bytes());
    }
    result
}

/// Append `arg` to `out` in single quotes, so that a POSIX shell reads it back verbatim.
/// Embedded single quotes become `'\''`.
pub fn append_single_quoted(out: &mut WString, arg: &wstr) {
    out.push('\'');
    for c in arg.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
}

#[macro_export]
macro_rules! fprintf {
    ($fd:expr, $format:literal $(, $arg:expr)* $(,)?) => {
        $crate::fprintf!($fd, $crate::wchar::L!($format) $(, $arg)*)
    };
    ($fd:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        {
            let mut wide = $crate::wchar::WString::new();
            $crate::wutil::sprintf!(=> &mut wide, $format, $( $arg ),*);
            $crate::wutil::wwrite_to_fd(&wide, $fd);
        }
    };
}

#[macro_export]
macro_rules! printf {
    ($format:tt $(, $arg:expr)* $(,)?) => {
        $crate::fprintf!(libc::STDOUT_FILENO, $format $(, $arg)*)
    }
}

#[macro_export]
macro_rules! eprintf {
    ($format:tt $(, $arg:expr)* $(,)?) => {
        $crate::fprintf!(libc::STDERR_FILENO, $format $(, $arg)*)
    }
}

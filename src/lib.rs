#![allow(non_camel_case_types)]
#![allow(non_upper_case_globals)]
#![allow(unknown_lints)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::new_without_default)]
#![allow(clippy::uninlined_format_args)]

pub const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod common;

pub mod canonical;
pub mod flog;
pub mod wchar;
pub mod wchar_ext;
pub mod wgetopt;
pub mod wutil;

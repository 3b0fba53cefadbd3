use crate::wchar::prelude::*;
use crate::wutil::write_to_fd;
use libc::c_int;
use std::sync::atomic::{AtomicI32, Ordering};

#[rustfmt::skip::macros(category)]
pub mod categories {
    use super::wstr;
    use crate::wchar::L;
    use std::sync::atomic::AtomicBool;

    pub struct category_t {
        pub name: &'static wstr,
        pub description: &'static wstr,
        pub enabled: AtomicBool,
    }

    /// Declare each category as a static named by its identifier, disabled unless a
    /// default is given, and collect them all in `all_categories()`.
    macro_rules! categories {
        (
            $(($var:ident, $name:literal, $description:literal $(, $enabled:expr)?));*
            $(;)?
        ) => {
            $(
                pub static $var: category_t = category_t {
                    name: L!($name),
                    description: L!($description),
                    enabled: AtomicBool::new(false $(|| $enabled)?),
                };
            )*

            pub fn all_categories() -> Vec<&'static category_t> {
                vec![$(&$var),*]
            }
        };
    }

    categories!(
        (error, "error", "Serious unexpected errors (on by default)", true);

        (warning, "warning", "Warnings (on by default)", true);

        (getopt, "getopt", "Option scanning outcomes");

        (canonical_output, "canonical-output", "Canonicalized argument lines");
    );
}

/// Write to our FLOG file.
pub fn flog_impl(s: &str) {
    let fd = get_flog_file_fd();
    if fd < 0 {
        return;
    }
    let _ = write_to_fd(s.as_bytes(), fd);
}

/// The entry point for flogging. Each value is written with its Display impl, separated by
/// spaces, after the category name.
#[macro_export]
macro_rules! FLOG {
    ($category:ident, $($elem:expr),+ $(,)*) => {
        if $crate::flog::categories::$category.enabled.load(std::sync::atomic::Ordering::Relaxed) {
            let mut line = format!("{}:", $crate::flog::categories::$category.name);
            $(
                line.push(' ');
                line.push_str(&$elem.to_string());
            )+
            // We don't use locking here so the whole line goes out in a single write.
            line.push('\n');
            $crate::flog::flog_impl(&line);
        }
    };
}

#[macro_export]
macro_rules! FLOGF {
    ($category:ident, $fmt:tt, $($elem:expr),+ $(,)*) => {
        $crate::flog::FLOG!($category, $crate::wutil::sprintf!($fmt, $($elem),*))
    }
}

pub use {FLOG, FLOGF};

/// Match `name` against a pattern where `*` matches any run of chars and `?` matches one char.
fn category_wildcard_match(name: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some(('*', rest)) => (0..=name.len()).any(|i| category_wildcard_match(&name[i..], rest)),
        Some((&pc, rest)) => match name.split_first() {
            Some((&nc, name_rest)) if pc == '?' || pc == nc => {
                category_wildcard_match(name_rest, rest)
            }
            _ => false,
        },
    }
}

/// For each category, if its name matches the wildcard, set its enabled to the given sense.
fn apply_one_wildcard(wc: &wstr, sense: bool) {
    let mut match_found = false;
    for cat in categories::all_categories() {
        if category_wildcard_match(cat.name.as_char_slice(), wc.as_char_slice()) {
            cat.enabled.store(sense, Ordering::Relaxed);
            match_found = true;
        }
    }
    if !match_found {
        FLOG!(warning, "Failed to match debug category:", wc);
    }
}

/// Set the active flog categories according to the given wildcard `wc`.
pub fn activate_flog_categories_by_pattern(wc_ptr: &wstr) {
    let mut wc: WString = wc_ptr.into();
    // Normalize underscores to dashes, allowing the user to be sloppy.
    for c in wc.as_char_slice_mut() {
        if *c == '_' {
            *c = '-';
        }
    }
    for s in wc.split(',') {
        if s.is_empty() {
            continue;
        }
        if s.starts_with('-') {
            apply_one_wildcard(s.slice_from(1), false);
        } else {
            apply_one_wildcard(s, true);
        }
    }
}

/// The flog output fd. Defaults to stderr. A value < 0 disables flog.
static FLOG_FD: AtomicI32 = AtomicI32::new(libc::STDERR_FILENO);

pub fn set_flog_file_fd(fd: c_int) {
    FLOG_FD.store(fd, Ordering::Relaxed);
}

#[inline]
pub fn get_flog_file_fd() -> c_int {
    FLOG_FD.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::categories;
    use super::*;
    use serial_test::serial;

    fn enabled(cat: &categories::category_t) -> bool {
        cat.enabled.load(Ordering::Relaxed)
    }

    #[test]
    fn test_wildcard() {
        let m = |name: &wstr, pat: &wstr| {
            category_wildcard_match(name.as_char_slice(), pat.as_char_slice())
        };
        assert!(m(L!("getopt"), L!("getopt")));
        assert!(m(L!("getopt"), L!("get*")));
        assert!(m(L!("getopt"), L!("*")));
        assert!(m(L!("getopt"), L!("g?topt")));
        assert!(!m(L!("getopt"), L!("get")));
        assert!(!m(L!("canonical-output"), L!("get*")));
        assert!(m(L!("canonical-output"), L!("*-output")));
    }

    #[test]
    #[serial]
    fn test_activate_by_pattern() {
        activate_flog_categories_by_pattern(L!("getopt,canon*"));
        assert!(enabled(&categories::getopt));
        assert!(enabled(&categories::canonical_output));

        activate_flog_categories_by_pattern(L!("-getopt"));
        assert!(!enabled(&categories::getopt));
        assert!(enabled(&categories::canonical_output));

        // Underscores are treated as dashes, and empty entries are skipped.
        activate_flog_categories_by_pattern(L!(",-canonical_output,"));
        assert!(!enabled(&categories::canonical_output));
        assert!(enabled(&categories::error));
        assert!(enabled(&categories::warning));
    }

    #[test]
    fn test_all_categories() {
        let names: Vec<&wstr> = categories::all_categories()
            .iter()
            .map(|cat| cat.name)
            .collect();
        assert_eq!(
            names,
            &[
                L!("error"),
                L!("warning"),
                L!("getopt"),
                L!("canonical-output")
            ]
        );
        assert!(categories::all_categories()
            .iter()
            .all(|cat| !cat.description.is_empty()));
    }
}

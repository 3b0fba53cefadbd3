//! A small utility that parses an argument list against a POSIX short-option string and prints
//! it back in canonical form, in the manner of getopt(1):
//!
//!     $ shortopt aBn: -aBn42 rest
//!      -a -B -n '42' -- 'rest'
//!
//! Unknown options and missing arguments are reported on stderr and make the exit status 1.

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::ops::ControlFlow;
use std::os::unix::prelude::*;
use std::sync::atomic::Ordering;

use shortopt::{
    canonical::canonicalize,
    common::{program_name, str2wcstring, PROGRAM_NAME},
    eprintf,
    flog::{self, activate_flog_categories_by_pattern, set_flog_file_fd, FLOG},
    printf,
    wchar::prelude::*,
    wgetopt::{Outcome, WGetopter},
};

const STATUS_OK: i32 = 0;
const STATUS_PARSE_ERROR: i32 = 1;
const STATUS_USAGE: i32 = 2;

const USAGE: &wstr =
    L!("Usage: %ls [-hvL] [-d CATEGORIES] [-o PATH] [-n NAME] [--] OPTSTRING [ARG...]\n");

#[derive(Default)]
struct ShortoptCmdOpts {
    /// Name reported in diagnostics and used as the program-name element.
    name: Option<WString>,
    /// Where to send debug output.
    debug_output: Option<OsString>,
}

/// List every debug category usable with -d, with its description.
fn print_debug_categories() {
    let cats = flog::categories::all_categories();
    let name_width = cats.iter().map(|cat| cat.name.len()).max().unwrap_or(0);
    for cat in cats {
        let enabled = cat.enabled.load(Ordering::Relaxed);
        printf!(
            "%-*ls %ls%ls\n",
            name_width,
            cat.name,
            cat.description,
            if enabled { L!(" [enabled]") } else { L!("") }
        );
    }
}

/// Parse our own flags. On success, returns the index of the first operand.
fn parse_flags(args: &[&wstr], opts: &mut ShortoptCmdOpts) -> ControlFlow<i32, usize> {
    let short_opts: &wstr = L!("hvLd:o:n:");
    let mut w = WGetopter::new(short_opts, args);
    loop {
        match w.next_outcome() {
            Outcome::Option('h') => {
                printf!(USAGE, program_name());
                return ControlFlow::Break(STATUS_OK);
            }
            Outcome::Option('v') => {
                printf!("%ls, version %s\n", program_name(), shortopt::BUILD_VERSION);
                return ControlFlow::Break(STATUS_OK);
            }
            Outcome::Option('d') => {
                if let Some(arg) = w.woptarg {
                    activate_flog_categories_by_pattern(arg);
                    FLOG!(getopt, "debug categories from -d:", arg);
                }
            }
            Outcome::Option('L') => {
                print_debug_categories();
                return ControlFlow::Break(STATUS_OK);
            }
            Outcome::Option('o') => {
                opts.debug_output = w.woptarg.map(|s| OsString::from(s.to_string()));
            }
            Outcome::Option('n') => {
                opts.name = w.woptarg.map(|s| s.to_owned());
            }
            Outcome::Option(c) => panic!("unexpected option from WGetopter: {}", c),
            Outcome::Unknown => {
                if let Some(err) = w.last_error {
                    eprintf!("%ls: %s\n", program_name(), err.to_string());
                }
                eprintf!(USAGE, program_name());
                return ControlFlow::Break(STATUS_USAGE);
            }
            Outcome::End => break,
        }
    }
    ControlFlow::Continue(w.wopt_index)
}

fn main() {
    PROGRAM_NAME.set(L!("shortopt")).unwrap();
    std::process::exit(throwing_main())
}

fn throwing_main() -> i32 {
    let mut args: Vec<WString> = env::args_os()
        .map(|osstr| str2wcstring(osstr.as_bytes()))
        .collect();
    if args.is_empty() {
        args.push("shortopt".into());
    }
    let args: Vec<&wstr> = args.iter().map(|s| s.as_utfstr()).collect();

    // Enable debug categories set in SHORTOPT_DEBUG.
    // This is in *addition* to the ones given via -d.
    if let Some(debug_categories) = env::var_os("SHORTOPT_DEBUG") {
        let s = str2wcstring(debug_categories.as_bytes());
        activate_flog_categories_by_pattern(&s);
    }

    let mut opts = ShortoptCmdOpts::default();
    let optind = match parse_flags(&args, &mut opts) {
        ControlFlow::Continue(optind) => optind,
        ControlFlow::Break(status) => return status,
    };

    // Direct any debug output right away.
    // -o takes precedence, otherwise $SHORTOPT_DEBUG_OUTPUT is used.
    if opts.debug_output.is_none() {
        opts.debug_output = env::var_os("SHORTOPT_DEBUG_OUTPUT");
    }
    if let Some(debug_path) = opts.debug_output {
        match File::options()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&debug_path)
        {
            Ok(dbg_file) => set_flog_file_fd(dbg_file.into_raw_fd()),
            Err(e) => {
                eprintf!(
                    "%ls: could not open %s: %s\n",
                    program_name(),
                    debug_path.to_string_lossy().into_owned(),
                    e.to_string()
                );
                return STATUS_USAGE;
            }
        }
    }

    let Some((optstring, user_args)) = args[optind..].split_first() else {
        eprintf!("%ls: missing option string\n", program_name());
        eprintf!(USAGE, program_name());
        return STATUS_USAGE;
    };

    let name: &wstr = opts.name.as_deref().unwrap_or(program_name());
    let canonical = canonicalize(name, optstring, user_args);
    for err in &canonical.errors {
        eprintf!("%ls: %s\n", name, err.to_string());
    }
    printf!("%ls\n", canonical.line.as_utfstr());

    if canonical.is_ok() {
        STATUS_OK
    } else {
        STATUS_PARSE_ERROR
    }
}

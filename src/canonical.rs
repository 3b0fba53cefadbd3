//! Rewriting an argument list into the canonical form printed by the `shortopt` utility:
//! every option on its own, arguments quoted, and a `--` before the operands.

use crate::common::append_single_quoted;
use crate::flog::{FLOG, FLOGF};
use crate::wchar::prelude::*;
use crate::wgetopt::{GetoptError, Outcome, WGetopter};

/// The result of canonicalizing an argument list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Canonical {
    /// The rewritten arguments, each preceded by a space, without a trailing newline.
    pub line: WString,
    /// Diagnostics for each unknown option or missing argument, in order.
    pub errors: Vec<GetoptError>,
}

impl Canonical {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scan `args` against `optstring` and rewrite them. `name` stands in for the program name,
/// so `args` holds only the arguments proper.
pub fn canonicalize(name: &wstr, optstring: &wstr, args: &[&wstr]) -> Canonical {
    let mut argv = Vec::with_capacity(args.len() + 1);
    argv.push(name);
    argv.extend_from_slice(args);

    let mut result = Canonical::default();
    let mut w = WGetopter::new(optstring, &argv);
    loop {
        match w.next_outcome() {
            Outcome::Option(c) => {
                FLOG!(getopt, "option", c, "index", w.wopt_index);
                result.line.push_str(" -");
                result.line.push(c);
                if let Some(arg) = w.woptarg {
                    FLOG!(getopt, "argument", arg);
                    result.line.push(' ');
                    append_single_quoted(&mut result.line, arg);
                }
            }
            Outcome::Unknown => {
                if let Some(err) = w.last_error {
                    FLOG!(getopt, "error", err, "in", w.argv[w.wopt_index - 1]);
                    result.errors.push(err);
                }
            }
            Outcome::End => {
                FLOGF!(getopt, "end of options at index %lu", w.wopt_index);
                break;
            }
        }
    }

    result.line.push_str(" --");
    for operand in w.operands() {
        result.line.push(' ');
        append_single_quoted(&mut result.line, operand);
    }
    FLOG!(canonical_output, result.line);
    result
}

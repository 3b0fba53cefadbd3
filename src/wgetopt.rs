//! A version of the POSIX getopt routine for use with wide character strings.
//!
//! Only short options are recognized. Scanning stops at the first non-option element, at a
//! bare `-`, or after `--`; elements are never reordered.
//!
//! The option string lists the recognized letters. A letter followed by `:` takes a required
//! argument, either attached (`-n42`) or as the next element (`-n 42`). A second `:` is
//! accepted and ignored. `:` and `-` are never option letters, and an option string that
//! itself begins with `:` recognizes nothing.

use crate::wchar::prelude::*;

/// Utility function to quickly return a reference to an empty wstr.
fn empty_wstr() -> &'static wstr {
    Default::default()
}

/// The result of one scanning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A letter from the option string. If it takes an argument, it is in
    /// [`WGetopter::woptarg`].
    Option(char),
    /// An unrecognized letter, or a letter whose required argument is missing.
    /// See [`WGetopter::last_error`] for which.
    Unknown,
    /// There are no more options. [`WGetopter::wopt_index`] is the index of the first operand.
    End,
}

impl Outcome {
    /// The value the traditional interface returns for this outcome: the option letter,
    /// `'?'`, or `-1`.
    pub fn code(self) -> i32 {
        match self {
            Outcome::Option(c) => c as i32,
            Outcome::Unknown => '?' as i32,
            Outcome::End => -1,
        }
    }
}

/// Why the most recent call returned [`Outcome::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetoptError {
    /// The letter is not in the option string (or is reserved).
    UnknownOption(char),
    /// The letter takes an argument but nothing follows it.
    MissingArgument(char),
}

impl GetoptError {
    /// The offending option letter.
    pub fn letter(&self) -> char {
        match *self {
            GetoptError::UnknownOption(c) | GetoptError::MissingArgument(c) => c,
        }
    }
}

impl std::fmt::Display for GetoptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetoptError::UnknownOption(c) => write!(f, "invalid option -- '{}'", c),
            GetoptError::MissingArgument(c) => {
                write!(f, "option requires an argument -- '{}'", c)
            }
        }
    }
}

impl std::error::Error for GetoptError {}

pub struct WGetopter<'opts, 'args, 'argarray> {
    /// List of arguments. Element 0 is the program name and is never scanned.
    pub argv: &'argarray [&'args wstr],
    /// Stores the arg of an argument-taking option. When scanning is finished, this is the
    /// first operand, if there is one.
    pub woptarg: Option<&'args wstr>,
    /// Stores the optstring for short-named options.
    shortopts: &'opts wstr,
    /// The remaining text of the current element, recorded so that we can pick up the
    /// scan from where we left off.
    pub remaining_text: &'args wstr,
    /// Index of the next element in `argv` to be scanned. If the value is `0`, then
    /// the next call will start a fresh scan. When scanning is finished, this marks the index
    /// of the first non-option element that should be parsed by the caller.
    pub wopt_index: usize,
    /// Set when the most recent call returned [`Outcome::Unknown`].
    pub last_error: Option<GetoptError>,
    /// Set once an end of options has been reported, so that `--` is only consumed once.
    finished: bool,
    /// This will be populated with the elements of the original args that were interpreted
    /// as options and arguments to options.
    pub argv_opts: Vec<&'args wstr>,
}

impl<'opts, 'args, 'argarray> WGetopter<'opts, 'args, 'argarray> {
    pub fn new(shortopts: &'opts wstr, argv: &'argarray [&'args wstr]) -> Self {
        Self {
            argv,
            woptarg: None,
            shortopts,
            remaining_text: empty_wstr(),
            wopt_index: 0,
            last_error: None,
            finished: false,
            argv_opts: Vec::new(),
        }
    }

    /// Try to get the next option, returning:
    /// * None if there are no more options
    /// * `Some('?')` for unrecognised options and options missing an argument
    /// * Otherwise, `Some(c)`, where `c` is the option's short character
    pub fn next_opt(&mut self) -> Option<char> {
        match self.next_outcome() {
            Outcome::Option(c) => Some(c),
            Outcome::Unknown => Some('?'),
            Outcome::End => None,
        }
    }

    /// Start over from the first element on the next call.
    pub fn reset(&mut self) {
        self.wopt_index = 0;
    }

    /// The elements from `wopt_index` on. After scanning is finished, these are the operands.
    pub fn operands(&self) -> &'argarray [&'args wstr] {
        self.argv.get(self.wopt_index..).unwrap_or(&[])
    }

    /// Clear any state left over from a previous scan.
    fn initialize(&mut self) {
        self.remaining_text = empty_wstr();
        self.finished = false;
        self.last_error = None;
        self.argv_opts.clear();
    }

    /// Report the end of options, leaving the first operand (if any) in `woptarg`.
    fn finish(&mut self) -> Outcome {
        self.finished = true;
        self.woptarg = self.argv.get(self.wopt_index).copied();
        Outcome::End
    }

    /// Advance to the next element in `argv`. Returns false if scanning is finished.
    fn next_argv(&mut self) -> bool {
        // Skip the first element since it's just the program name.
        if self.wopt_index == 0 {
            self.wopt_index = 1;
        }

        let Some(&arg) = self.argv.get(self.wopt_index) else {
            return false;
        };

        // A non-option element or a lone `-` ends the scan, and is left for the caller.
        if arg.char_at(0) != '-' || arg.len() == 1 {
            return false;
        }

        // The `--` element prevents any further scanning of options. Skip over it.
        if arg == L!("--") {
            self.wopt_index += 1;
            return false;
        }

        self.argv_opts.push(arg);
        // We've found an option, so we need to skip the initial punctuation.
        self.remaining_text = arg.slice_from(1);
        self.wopt_index += 1;
        true
    }

    /// Look up `c` in the option string. Returns the text following its first occurrence,
    /// or None if `c` is not a usable option letter.
    fn find_short_opt(&self, c: char) -> Option<&'opts wstr> {
        let shortopts = self.shortopts;
        if shortopts.char_at(0) == ':' || c == ':' || c == '-' {
            return None;
        }
        let pos = shortopts.find_char(c)?;
        Some(shortopts.slice_from(pos + 1))
    }

    /// Check for a matching short-named option.
    fn handle_short_opt(&mut self) -> Outcome {
        // Look at and handle the next short-named option
        let c = self.remaining_text.char_at(0);
        self.remaining_text = self.remaining_text.slice_from(1);

        let Some(spec_rest) = self.find_short_opt(c) else {
            self.last_error = Some(GetoptError::UnknownOption(c));
            return Outcome::Unknown;
        };

        if spec_rest.char_at(0) != ':' {
            return Outcome::Option(c);
        }

        // This option requires an argument.
        if !self.remaining_text.is_empty() {
            // Consume the remaining text.
            self.woptarg = Some(self.remaining_text);
            self.remaining_text = empty_wstr();
        } else if let Some(&val) = self.argv.get(self.wopt_index) {
            // Consume the next element.
            self.argv_opts.push(val);
            self.woptarg = Some(val);
            self.wopt_index += 1;
        } else {
            // If there's nothing in `remaining_text` and there's no following element to
            // consume, then the option has no argument.
            self.last_error = Some(GetoptError::MissingArgument(c));
            return Outcome::Unknown;
        }

        Outcome::Option(c)
    }

    /// Goes through `argv` to try and find options.
    ///
    /// Any element that begins with `-` and is not just `-` or `--` is an option element.
    /// The characters of this element (aside from the initial `-`) are option characters.
    /// Repeated calls return each option character successively.
    ///
    /// Once [`Outcome::End`] has been returned, every further call returns it again, until
    /// [`WGetopter::reset`] is called or `wopt_index` is set to 0.
    pub fn next_outcome(&mut self) -> Outcome {
        if self.wopt_index == 0 {
            self.initialize();
        }

        self.woptarg = None;
        self.last_error = None;
        if self.finished {
            return self.finish();
        }

        if self.remaining_text.is_empty() && !self.next_argv() {
            return self.finish();
        }

        self.handle_short_opt()
    }
}

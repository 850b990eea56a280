//! Command-line argument parsing.
//!
//! Parsed by hand to keep the binary lean: three game modes plus the
//! usual help/version escape hatches. Anything that is not a flag is a
//! participant name for the wheel.

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
vibepick — let fate pick which AI coding agent gets the keyboard

USAGE:
    vibepick              Spin the wheel over the vibers found on PATH
    vibepick NAME...      Spin the wheel over the given names (at least 4)
    vibepick --slot       Pull the slot machine lever instead
    vibepick --flip       Play memory match instead

OPTIONS:
    --help, -h            Show this help message
    --version, -V         Show version

The winner is executed in place of vibepick (code and cursor get an
implicit '.' argument). The fillers 'lucky' and 'handy' only ever win
bragging rights.

EXIT CODES:
    0    normal exit, or the winner tokenized to nothing
    1    execution failure
    126  winner found but not executable
    127  winner not found on PATH";

/// Selected mode of operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Wheel game; empty names means detect from PATH.
    Wheel(Vec<String>),
    Slot,
    Flip,
    Help,
    Version,
}

/// Parse the arguments after the program name.
pub fn parse<I: Iterator<Item = String>>(mut args: I) -> Mode {
    let Some(first) = args.next() else {
        return Mode::Wheel(Vec::new());
    };
    match first.as_str() {
        "--slot" => Mode::Slot,
        "--flip" => Mode::Flip,
        "--help" | "-h" => Mode::Help,
        "--version" | "-V" => Mode::Version,
        _ => {
            let mut names = vec![first];
            names.extend(args);
            Mode::Wheel(names)
        }
    }
}

/// Version line for `--version`.
pub fn version_line() -> String {
    format!("vibepick {VERSION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_slice(args: &[&str]) -> Mode {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn modes_are_mutually_exclusive_on_the_first_argument() {
        assert_eq!(parse_slice(&[]), Mode::Wheel(Vec::new()));
        assert_eq!(parse_slice(&["--slot"]), Mode::Slot);
        assert_eq!(parse_slice(&["--flip"]), Mode::Flip);
        assert_eq!(parse_slice(&["--help"]), Mode::Help);
        assert_eq!(parse_slice(&["-V"]), Mode::Version);
    }

    #[test]
    fn bare_names_seed_the_wheel() {
        assert_eq!(
            parse_slice(&["claude", "codex", "amp", "kimi"]),
            Mode::Wheel(vec![
                "claude".into(),
                "codex".into(),
                "amp".into(),
                "kimi".into()
            ])
        );
    }

    #[test]
    fn flags_after_a_name_are_treated_as_names() {
        // Matches the original: only the first argument selects a mode.
        assert_eq!(
            parse_slice(&["claude", "--slot"]),
            Mode::Wheel(vec!["claude".into(), "--slot".into()])
        );
    }
}

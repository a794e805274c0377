//! Command line surface of `set-sid-mapping`.
//!
//! ```text
//! set-sid-mapping S-1-5-99=ABC S-1-5-99-1-2-3=ABC\User
//! set-sid-mapping -r ABC\User
//! ```
//!
//! Every argument is an independent item: failures are written as one line to the
//! output sink and processing continues with the next argument.

use std::io::{self, Write};

use clap::Parser;
use tracing::debug;

use crate::{
    MappingClient,
    authority::{SidNameAuthority, SidParser, StatusTranslator},
};

/// Usage lines printed when no argument is given.
pub const USAGE: [&str; 2] = [
    r"set-sid-mapping S-1-5-99=ABC S-1-5-99-1-2-3=ABC\User - Add the domain ABC and a User.",
    r"set-sid-mapping -r ABC\User - Remove mapping.",
];

/// Switches the whole run to removal when given as the first argument.
pub const REMOVE_FLAG: &str = "-r";

/// Add or remove custom SID to name mappings in the local security authority.
///
/// Arguments are taken verbatim: only a leading [`REMOVE_FLAG`] has a meaning,
/// anything else (including hyphen-leading text) is an item.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "set-sid-mapping",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// `SID=Domain[\Account]` items to add, or `-r` then `Domain[\Account]` items to remove
    #[arg(value_name = "SPEC", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// What a command line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation<'a> {
    /// No argument: print the usage.
    Usage,
    /// Add every item.
    Add(&'a [String]),
    /// Remove every item (the leading `-r` is not an item).
    Remove(&'a [String]),
}

impl Cli {
    /// Classifies the arguments.
    ///
    /// # Examples
    /// ```rust
    /// # use clap::Parser;
    /// # use win_sid_mapping::cli::{Cli, Invocation};
    /// let cli = Cli::parse_from(["set-sid-mapping", "-r", r"ABC\User"]);
    /// assert_eq!(cli.invocation(), Invocation::Remove(&[r"ABC\User".to_owned()]));
    /// ```
    #[inline]
    #[must_use]
    pub fn invocation(&self) -> Invocation<'_> {
        match self.args.split_first() {
            None => Invocation::Usage,
            Some((first, rest)) if first.as_str() == REMOVE_FLAG => Invocation::Remove(rest),
            Some(_) => Invocation::Add(&self.args),
        }
    }
}

/// Counts of processed items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Items accepted by the authority.
    pub succeeded: usize,
    /// Items that failed, locally or in the authority.
    pub failed: usize,
}

/// Writes [`USAGE`] to `out`.
///
/// # Errors
/// Propagates write errors from `out`.
#[inline]
pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    for line in USAGE {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Processes every spec of `cli` in order with `client`.
///
/// Without any argument the usage text is written and nothing is submitted.
///
/// # Errors
/// Only write errors on `out` are returned; item failures are reported in `out`.
#[inline]
pub fn run<P, A, T, W>(
    cli: &Cli,
    client: &MappingClient<P, A, T>,
    out: &mut W,
) -> io::Result<RunSummary>
where
    P: SidParser,
    A: SidNameAuthority<P::Sid>,
    T: StatusTranslator,
    W: Write,
{
    let mut summary = RunSummary::default();
    let (remove, specs) = match cli.invocation() {
        Invocation::Usage => {
            write_usage(out)?;
            return Ok(summary);
        }
        Invocation::Add(specs) => (false, specs),
        Invocation::Remove(specs) => (true, specs),
    };

    for spec in specs {
        let outcome = if remove {
            client.remove_mapping(spec)
        } else {
            client.add_mapping(spec)
        };
        if outcome.succeeded {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
            writeln!(out, "{outcome}")?;
        }
    }
    debug!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "all items processed"
    );
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Unwrap is not an issue in test")]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(core::iter::once("set-sid-mapping").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn parses_add_specs() {
        let cli = parse(&["S-1-5-99=ABC", r"S-1-5-99-1=ABC\User"]);
        assert_eq!(
            cli.invocation(),
            Invocation::Add(&["S-1-5-99=ABC".to_owned(), r"S-1-5-99-1=ABC\User".to_owned()])
        );
    }

    #[test]
    fn parses_leading_remove_flag() {
        let cli = parse(&["-r", r"ABC\User"]);
        assert_eq!(cli.invocation(), Invocation::Remove(&[r"ABC\User".to_owned()]));
    }

    #[test]
    fn remove_flag_only_counts_in_first_position() {
        let cli = parse(&["S-1-5-99=ABC", "-r"]);
        assert_eq!(
            cli.invocation(),
            Invocation::Add(&["S-1-5-99=ABC".to_owned(), "-r".to_owned()])
        );
    }

    #[test]
    fn hyphen_leading_items_are_kept() {
        let cli = parse(&["-r", "-ABC", "--help", "-V", "--version"]);
        assert_eq!(
            cli.invocation(),
            Invocation::Remove(&[
                "-ABC".to_owned(),
                "--help".to_owned(),
                "-V".to_owned(),
                "--version".to_owned(),
            ])
        );
        let cli = parse(&["-h"]);
        assert_eq!(cli.invocation(), Invocation::Add(&["-h".to_owned()]));
    }

    #[test]
    fn no_arguments_is_not_an_error() {
        assert_eq!(parse(&[]).invocation(), Invocation::Usage);
        assert_eq!(parse(&["-r"]).invocation(), Invocation::Remove(&[]));
    }

    #[test]
    fn usage_is_two_lines() {
        let mut out = Vec::new();
        write_usage(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("Remove mapping.\n"));
    }

    #[test]
    fn command_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

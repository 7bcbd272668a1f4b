//! Session configuration
//!
//! The binary parses its command line into [`Options`] and turns that into a
//! [`SessionConfig`]; library callers construct one directly or start from
//! [`SessionConfig::default`].

use structopt::StructOpt;

/// Knobs for a command session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Print the tree after every command
    pub render_state: bool,
    /// Follow the left child for `D` steps as well, reproducing the
    /// navigation of the transcripts this protocol comes from
    pub mirror_right_steps: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            render_state: true,
            mirror_right_steps: false,
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "skew-heap",
    about = "Reads skew heap commands from stdin and prints the transcript to stdout",
    rename_all = "kebab-case",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Options {
    /// Do not print the heap after every command
    #[structopt(short, long)]
    pub quiet: bool,
    /// Follow the left child for D steps in MODIFICAR paths
    #[structopt(long)]
    pub mirror_right: bool,
}

impl From<Options> for SessionConfig {
    fn from(options: Options) -> Self {
        SessionConfig {
            render_state: !options.quiet,
            mirror_right_steps: options.mirror_right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SessionConfig, structopt::clap::Error> {
        Options::from_iter_safe(std::iter::once("skew-heap").chain(args.iter().copied()))
            .map(SessionConfig::from)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert!(config.render_state);
        assert!(!config.mirror_right_steps);
    }

    #[test]
    fn test_flags() {
        let config = parse(&["--mirror-right", "-q"]).unwrap();
        assert!(!config.render_state);
        assert!(config.mirror_right_steps);

        assert!(!parse(&["--quiet"]).unwrap().render_state);
    }

    #[test]
    fn test_unknown_flag() {
        let err = parse(&["--verbose"]).unwrap_err();
        assert_eq!(err.kind, structopt::clap::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_generated() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind, structopt::clap::ErrorKind::HelpDisplayed);
        assert!(err.message.contains("--mirror-right"));
    }
}

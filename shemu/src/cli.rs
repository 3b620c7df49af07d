use std::path::PathBuf;

use crate::error::{Error, Result};

pub fn build_app<'a, 'b>() -> clap::App<'a, 'b> {
    clap::App::new("shemu")
        .version(clap::crate_version!())
        .author(clap::crate_authors!())
        .about("Unix-like shell over a ZIP archive loaded as an in-memory filesystem")
        .arg(clap::Arg::from_usage("-d --debug 'Enable debug output'"))
        .arg(clap::Arg::from_usage(
            "-u, --user <user> 'User name shown in the prompt'",
        ))
        .arg(clap::Arg::from_usage(
            "-c, --host <host> 'Host name shown in the prompt'",
        ))
        .arg(clap::Arg::from_usage(
            "-f, --fs <archive> 'Path to the ZIP archive holding the virtual filesystem'",
        ))
        .arg(clap::Arg::from_usage(
            "-s, --script [script] 'Script executed line by line before the interactive session'",
        ))
}

pub fn parse_flags<'a>() -> clap::ArgMatches<'a> {
    build_app().get_matches()
}

/// Everything the shell needs from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub user: String,
    pub host: String,
    pub archive: PathBuf,
    pub script: Option<PathBuf>,
    pub debug: bool,
}

impl Config {
    pub fn from_matches(matches: &clap::ArgMatches) -> Result<Config> {
        let required = |name: &str| {
            matches
                .value_of(name)
                .map(str::to_string)
                .ok_or_else(|| Error::CliInputError(format!("--{} is required.", name)))
        };

        Ok(Config {
            user: required("user")?,
            host: required("host")?,
            archive: PathBuf::from(required("fs")?),
            script: matches.value_of("script").map(PathBuf::from),
            debug: matches.is_present("debug"),
        })
    }
}

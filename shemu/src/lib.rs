extern crate clap;
extern crate env_logger;
extern crate log;
extern crate shellfs;
extern crate shlex;

pub mod cli;
pub mod error;
pub mod shell;
pub mod utils;

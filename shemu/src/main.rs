extern crate shemu;

use std::io;
use std::process;

use log::debug;
use shellfs::session::Session;
use shellfs::tree::Tree;
use shemu::cli::Config;
use shemu::shell::{Flow, Shell};

fn run(config: &Config) -> shemu::error::Result<()> {
    let records = shellfs::archive::open(&config.archive)?;
    let tree = Tree::from_records(records);
    debug!(
        "loaded {} with {} nodes",
        config.archive.display(),
        tree.node_count()
    );

    let stdout = io::stdout();
    let mut shell = Shell::new(&config.user, &config.host, Session::new(tree), stdout.lock());

    if let Some(script) = &config.script {
        if shell.run_script(script)? == Flow::Exit {
            return Ok(());
        }
    }

    let stdin = io::stdin();
    shell.run(stdin.lock())?;
    Ok(())
}

fn main() {
    let matches = shemu::cli::parse_flags();
    let config = match Config::from_matches(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("shemu: {}", err);
            process::exit(2);
        }
    };
    shemu::utils::init_logging(config.debug);

    if let Err(err) = run(&config) {
        eprintln!("shemu: {}", err);
        process::exit(1);
    }
}

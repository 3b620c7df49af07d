use std::fs::File;
use std::io::{BufRead, BufReader, Result as IoResult};
use std::path::Path;

use log::LevelFilter;

pub fn get_file_reader(filename: &Path) -> IoResult<BufReader<File>> {
    let file = File::open(filename)?;
    Ok(BufReader::new(file))
}

/// Read one line, terminator included, replacing invalid UTF-8 rather than
/// failing on it. `None` at end of input.
pub fn read_line_lossy<R: BufRead>(input: &mut R) -> IoResult<Option<String>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Log to stderr at `warn` (or whatever `RUST_LOG` asks for); `--debug`
/// forces `debug`.
pub fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

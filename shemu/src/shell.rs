//! Line-oriented front end: tokenising, dispatch, prompt and script handling.
use std::io::{BufRead, Write};
use std::path::Path;

use log::debug;
use shellfs::command::Command;
use shellfs::session::{Outcome, Session};

use crate::utils;

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell<W: Write> {
    user: String,
    host: String,
    session: Session,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(user: &str, host: &str, session: Session, out: W) -> Shell<W> {
        Shell {
            user: user.to_string(),
            host: host.to_string(),
            session,
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn prompt(&self) -> String {
        format!("{}@{}:{}$ ", self.user, self.host, self.session.cwd_path())
    }

    /// Tokenise and run one line. Every diagnostic is written as a single
    /// output line; only `exit` stops the session.
    pub fn execute_line(&mut self, line: &str) -> std::io::Result<Flow> {
        let Some(args) = split_words(line) else {
            writeln!(self.out, "shemu: syntax error: unterminated quote")?;
            return Ok(Flow::Continue);
        };
        let Some((name, operands)) = args.split_first() else {
            return Ok(Flow::Continue);
        };

        let result = Command::parse(name, operands).and_then(|command| {
            debug!("executing {:?}", command);
            self.session.execute(&command)
        });
        match result {
            Ok(Outcome::Exit) => return Ok(Flow::Exit),
            Ok(Outcome::Lines(lines)) => {
                for line in lines {
                    writeln!(self.out, "{}", line)?;
                }
            }
            Err(err) => writeln!(self.out, "{}", err)?,
        }
        Ok(Flow::Continue)
    }

    /// Run every line of the script at `path`. A script that cannot be opened
    /// is reported once and otherwise ignored.
    pub fn run_script(&mut self, path: &Path) -> std::io::Result<Flow> {
        let mut reader = match utils::get_file_reader(path) {
            Ok(reader) => reader,
            Err(err) => {
                debug!("cannot open script {}: {}", path.display(), err);
                writeln!(self.out, "Script file '{}' not found.", path.display())?;
                return Ok(Flow::Continue);
            }
        };

        while let Some(line) = utils::read_line_lossy(&mut reader)? {
            if self.execute_line(line.trim())? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Interactive loop: prompt, read, execute, until `exit` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> std::io::Result<()> {
        loop {
            let prompt = self.prompt();
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;

            let Some(line) = utils::read_line_lossy(&mut input)? else {
                debug!("end of input");
                return Ok(());
            };
            if self.execute_line(line.trim_end_matches(['\n', '\r']))? == Flow::Exit {
                return Ok(());
            }
        }
    }
}

/// Split a line into words with POSIX quoting. `#` has no special meaning:
/// a word starting with it is escaped before `shlex` would drop it as a
/// comment.
fn split_words(line: &str) -> Option<Vec<String>> {
    let mut escaped = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut word_start = true;
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (None, '#') if word_start => escaped.push('\\'),
            (Some(open), _) if ch == open => quote = None,
            (None, '\'' | '"') => quote = Some(ch),
            (None | Some('"'), '\\') => {
                escaped.push(ch);
                escaped.extend(chars.next());
                word_start = false;
                continue;
            }
            _ => {}
        }
        word_start = quote.is_none() && matches!(ch, ' ' | '\t' | '\n');
        escaped.push(ch);
    }
    shlex::split(&escaped)
}

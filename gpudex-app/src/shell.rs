//! Line tokenizing and the interactive loop.

use crate::commands::{Dispatcher, Outcome};
use crate::error::CommandError;
use crate::state::AppState;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Prompt printed before each line.
pub const PROMPT: &str = "gpudex> ";

/// Split a line into words, honoring single and double quotes.
///
/// Quotes group words and are removed; a quote of the other kind inside a
/// quoted run is kept literally. `""` yields an empty word.
///
/// # Errors
/// Returns `INVALID_ARGUMENTS` if a quote is left open.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(CommandError::new(
            "INVALID_ARGUMENTS",
            format!("Unclosed {q} quote in: {line}"),
        ));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Tokenize and dispatch one line.
pub fn execute_line(dispatcher: &Dispatcher, state: &mut AppState, line: &str) -> Outcome {
    match tokenize(line) {
        Ok(tokens) => dispatcher.dispatch(state, &tokens),
        Err(e) => Outcome::Continue(e.to_string()),
    }
}

/// Interactive session over any reader and writer.
pub struct Shell {
    dispatcher: Dispatcher,
    state: AppState,
}

impl Shell {
    /// Wrap loaded state with a dispatcher.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, state: AppState) -> Self {
        Self { dispatcher, state }
    }

    /// Current state, for inspection after a run.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run one line and return what it printed.
    pub fn execute(&mut self, line: &str) -> Outcome {
        execute_line(&self.dispatcher, &mut self.state, line)
    }

    /// Prompt, read, dispatch and print until `exitnow` or end of input.
    ///
    /// # Errors
    /// Returns error if reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        if let Some(notice) = self.state.startup_notice.take() {
            writeln!(output, "{notice}")?;
        }
        writeln!(
            output,
            "gpudex v{} - type 'help' for commands, 'exitnow' to quit.",
            env!("CARGO_PKG_VERSION")
        )?;

        let mut line = String::new();
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("end of input");
                writeln!(output)?;
                return Ok(());
            }

            match self.execute(line.trim_end_matches(|c: char| c == '\r' || c == '\n')) {
                Outcome::Continue(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                }
                Outcome::Exit(text) => {
                    writeln!(output, "{text}")?;
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpudex_catalog::{CatalogStore, SearchEngine};
    use gpudex_core::AppConfig;
    use gpudex_lists::{JsonDirStorage, ListRegistry};
    use tempfile::TempDir;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_tokenize_plain_and_quoted() {
        assert_eq!(
            tokenize("  gpu   compare \"RTX 4060\" 'RX 7600' ").expect("tokenize"),
            words(&["gpu", "compare", "RTX 4060", "RX 7600"])
        );
        assert_eq!(
            tokenize("list new My\"Big List\"").expect("tokenize"),
            words(&["list", "new", "MyBig List"])
        );
        assert_eq!(
            tokenize("search \"it's\"").expect("tokenize"),
            words(&["search", "it's"])
        );
        assert_eq!(tokenize("x \"\"").expect("tokenize"), words(&["x", ""]));
        assert!(tokenize("   ").expect("tokenize").is_empty());
    }

    #[test]
    fn test_tokenize_unclosed_quote() {
        let err = tokenize("list new \"Gaming").expect_err("unclosed quote");
        assert_eq!(err.code, "INVALID_ARGUMENTS");
    }

    fn shell(temp_dir: &TempDir) -> Shell {
        let mut config = AppConfig::default();
        config.lists.directory = temp_dir.path().join("lists");
        config.export.output_dir = temp_dir.path().to_path_buf();

        let storage = JsonDirStorage::open(&config.lists.directory).expect("open storage");
        let registry = ListRegistry::load(Box::new(storage)).expect("load registry");
        let engine = SearchEngine::new(CatalogStore::empty(), &config.search);
        let dispatcher = Dispatcher::new().expect("valid command table");
        Shell::new(dispatcher, AppState::new(config, engine, registry))
    }

    #[test]
    fn test_run_stops_at_exitnow() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let mut shell = shell(&temp_dir);

        let input = b"list new Gaming\nexitnow\nlist new Never\n";
        let mut output = Vec::new();
        shell.run(&input[..], &mut output).expect("run shell");

        let text = String::from_utf8(output).expect("utf8 output");
        assert!(text.contains("[SUCCESS] List 'Gaming' created and set as active."));
        assert!(text.contains("Goodbye!"));
        assert!(shell.state().registry.get("never").is_none());
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let mut shell = shell(&temp_dir);

        let mut output = Vec::new();
        shell
            .run(&b"bogus\n\"open"[..], &mut output)
            .expect("run shell");

        let text = String::from_utf8(output).expect("utf8 output");
        assert!(text.contains("[ERROR] Unknown command: 'bogus'"));
        assert!(text.contains("[ERROR] Unclosed \" quote"));
        assert_eq!(text.matches(PROMPT).count(), 3);
    }
}

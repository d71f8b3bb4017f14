//! Line-oriented console input.

use std::io::{BufRead, Write};

use anyhow::Result;

/// Reads answers from an input stream and writes prompts to an output
/// stream. Generic so interactive flows can run against in-memory buffers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print a prompt and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer is one of `choices` (case-insensitive).
    pub fn choose(&mut self, prompt: &str, choices: &[&str]) -> Result<Option<String>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            let answer = answer.to_lowercase();
            if choices.contains(&answer.as_str()) {
                return Ok(Some(answer));
            }
            writeln!(
                self.output,
                "Unrecognized choice '{answer}'. Expected one of: {}",
                choices.join(", ")
            )?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ask_trims_and_detects_eof() {
        let mut p = Prompter::new(Cursor::new("  hello \n"), Vec::new());
        assert_eq!(p.ask(">").unwrap().as_deref(), Some("hello"));
        assert_eq!(p.ask(">").unwrap(), None);
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.starts_with("> > "));
    }

    #[test]
    fn choose_repeats_until_valid() {
        let mut p = Prompter::new(Cursor::new("x\nQ\n"), Vec::new());
        assert_eq!(p.choose(">", &["1", "q"]).unwrap().as_deref(), Some("q"));
        let out = String::from_utf8(p.output).unwrap();
        assert!(out.contains("Unrecognized choice 'x'"));
    }
}

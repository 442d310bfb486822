use std::io::{self, BufRead, Write};

/// Source of operator input for credentials missing from configuration
pub trait PromptSource {
    /// Ask for a value labelled `label` and return the trimmed answer
    fn prompt(&mut self, label: &str) -> io::Result<String>;
}

/// Line-based prompt reading from a console (stdin/stdout in the binary)
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdout and read answers from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> PromptSource for ConsolePrompt<R, W> {
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a value was entered",
            ));
        }

        Ok(line.trim().to_string())
    }
}

use std::io::{Read, Write};
use std::process::ExitCode;

use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFile;
use spic::evaluate;

use crate::cli::Cli;
use crate::editor::{Editor, EditorRead};
use crate::report::{self, BatchSummary, Report};

pub struct Driver {
    file:   Option<SimpleFile<String, String>>,
    quiet:  bool,
    prompt: String,
}

impl Driver {
    pub fn new() -> std::io::Result<Self> {
        Self::from_config(<Cli as clap::Parser>::parse())
    }

    fn read_stdin() -> std::io::Result<String> {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    }

    pub fn from_config(cfg: Cli) -> std::io::Result<Self> {
        let file = if cfg.stdin {
            Some(SimpleFile::new("<stdin>".to_string(), Self::read_stdin()?))
        } else {
            cfg.file
                .map(|path| std::fs::read_to_string(&path).map(|source| SimpleFile::new(path, source)))
                .transpose()?
        };
        Ok(Self {
            file,
            quiet: cfg.quiet,
            prompt: cfg.prompt,
        })
    }

    pub fn run(self) -> std::io::Result<ExitCode> {
        if let Some(file) = &self.file {
            let failed = self.eval_file(file, &mut std::io::stdout().lock())?;
            if failed == 0 {
                Ok(ExitCode::SUCCESS)
            } else {
                self.summarize(file, failed);
                Ok(ExitCode::FAILURE)
            }
        } else {
            self.repl()?;
            Ok(ExitCode::SUCCESS)
        }
    }

    /// Evaluates every non-blank line of `file`, writing one result per line
    /// to `out`. Returns how many lines failed.
    pub fn eval_file<W: Write>(
        &self,
        file: &SimpleFile<String, String>,
        out: &mut W,
    ) -> std::io::Result<usize> {
        let mut failed = 0;
        let mut offset = 0;

        for raw in file.source().split_inclusive('\n') {
            let start = offset;
            offset += raw.len();

            let line = raw.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                continue;
            }

            match evaluate(line) {
                Ok(value) => writeln!(out, "{value}")?,
                Err(err) => {
                    failed += 1;
                    self.emit(file, report::shift(err.diagnose(), start));
                }
            }
        }

        log::info!("evaluated {} with {failed} failure(s)", file.name());
        Ok(failed)
    }

    fn emit(&self, file: &SimpleFile<String, String>, diagnostic: Diagnostic<()>) {
        if !self.quiet {
            report::emit(file, &diagnostic);
        }
    }

    fn summarize(&self, file: &SimpleFile<String, String>, failed: usize) {
        self.emit(file, BatchSummary::new(file.name(), failed).diagnose());
    }

    fn repl(&self) -> std::io::Result<()> {
        let mut editor = Editor::new(self.prompt.clone());
        loop {
            let signal = editor.read()?;
            let input = match signal {
                EditorRead::Read(input) => input,
                EditorRead::Break => break,
                EditorRead::Continue => continue,
            };

            match evaluate(&input) {
                Ok(value) => println!("{value}"),
                Err(err) => {
                    if !self.quiet {
                        err.report(&SimpleFile::new("<stdin>", input.as_str()));
                    }
                }
            }
        }

        Ok(())
    }
}

use std::error::Error;

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::Files;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use spic::EvalError;
use spispan::Spand;

pub trait Report {
    fn diagnose(&self) -> Diagnostic<()>;

    fn report<'a, F>(&self, file: &'a F)
    where
        F: Files<'a, FileId = ()>,
    {
        emit(file, &self.diagnose());
    }
}

/// Writes `diagnostic` to stderr.
pub fn emit<'a, F>(file: &'a F, diagnostic: &Diagnostic<()>)
where
    F: Files<'a, FileId = ()>,
{
    let writer = StandardStream::stderr(ColorChoice::Auto);
    emit_to(&mut writer.lock(), file, diagnostic);
}

/// Returns whether `diagnostic` was written; a failed write is logged.
fn emit_to<'a, W, F>(writer: &mut W, file: &'a F, diagnostic: &Diagnostic<()>) -> bool
where
    W: WriteColor,
    F: Files<'a, FileId = ()>,
{
    let config = term::Config::default();
    match term::emit(writer, &config, file, diagnostic) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("could not write diagnostic: {err}");
            false
        }
    }
}

/// Moves every label of `diagnostic` forward by `offset` bytes, for spans
/// computed against a single line of a larger file.
#[must_use]
pub fn shift(mut diagnostic: Diagnostic<()>, offset: usize) -> Diagnostic<()> {
    for label in &mut diagnostic.labels {
        label.range = label.range.start + offset..label.range.end + offset;
    }
    diagnostic
}

/// Closing line of a batch run in which some lines failed.
pub struct BatchSummary<'a> {
    name:   &'a str,
    failed: usize,
}

impl<'a> BatchSummary<'a> {
    #[must_use]
    pub const fn new(name: &'a str, failed: usize) -> Self {
        Self { name, failed }
    }
}

impl Report for BatchSummary<'_> {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error().with_message(format!(
            "could not evaluate {} due to {} previous {}",
            self.name,
            self.failed,
            if self.failed > 1 { "errors" } else { "error" },
        ))
    }
}

impl<T: Error> Report for Spand<T> {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_message(self.kind())
            .with_label(Label::primary((), self.span))
    }
}

impl Report for EvalError {
    fn diagnose(&self) -> Diagnostic<()> {
        let (code, diagnostic) = match self {
            Self::Lex(err) => ("lexical", err.diagnose()),
            Self::Parse(err) => ("syntax", err.diagnose()),
            Self::Arith(err) => ("arithmetic", err.diagnose()),
        };
        diagnostic.with_code(code)
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use codespan_reporting::files::SimpleFile;
    use codespan_reporting::term::termcolor::NoColor;
    use spic::evaluate;

    use super::*;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn emit_renders_label() {
        let file = SimpleFile::new("<stdin>", "5 / 0");
        let diagnostic = evaluate("5 / 0").unwrap_err().diagnose();
        let mut writer = NoColor::new(Vec::new());

        assert!(emit_to(&mut writer, &file, &diagnostic));
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.contains("division by zero in 5 / 0"));
    }

    #[test]
    fn emit_survives_closed_stream() {
        let file = SimpleFile::new("<stdin>", "5 / 0");
        let diagnostic = evaluate("5 / 0").unwrap_err().diagnose();

        assert!(!emit_to(&mut NoColor::new(Closed), &file, &diagnostic));
    }

    #[test]
    fn eval_error_is_labelled_at_its_span() {
        let err = evaluate("1 + 5 / 0").unwrap_err();
        let diagnostic = err.diagnose();

        assert_eq!(diagnostic.code.as_deref(), Some("arithmetic"));
        assert_eq!(diagnostic.message, "division by zero in 5 / 0");
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].range, 4..9);
    }

    #[test]
    fn codes_follow_error_kind() {
        let code = |input: &str| evaluate(input).unwrap_err().diagnose().code;
        assert_eq!(code("2 $ 3").as_deref(), Some("lexical"));
        assert_eq!(code("(1 + 2").as_deref(), Some("syntax"));
    }

    #[test]
    fn shift_moves_labels() {
        let err = evaluate("1 +").unwrap_err();
        let diagnostic = shift(err.diagnose(), 10);
        assert_eq!(diagnostic.labels[0].range, 13..13);
    }

    #[test]
    fn batch_summary_counts_failures() {
        let diagnostic = BatchSummary::new("input.txt", 1).diagnose();
        assert_eq!(
            diagnostic.message,
            "could not evaluate input.txt due to 1 previous error"
        );
        assert!(diagnostic.labels.is_empty());

        let diagnostic = BatchSummary::new("<stdin>", 3).diagnose();
        assert_eq!(
            diagnostic.message,
            "could not evaluate <stdin> due to 3 previous errors"
        );
    }
}

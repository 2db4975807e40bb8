use std::error::Error;

use abacusc::EvalError;
use abacusc::span::Spand;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::Files;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use crate::calculator::Rejected;

pub trait Report {
    fn diagnose(&self) -> Diagnostic<()>;

    fn report<'a, F>(&self, file: &'a F)
    where
        F: Files<'a, FileId = ()>,
    {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();

        let report = self.diagnose();
        let mut writer = writer.lock();
        let _ = term::emit(&mut writer, &config, file, &report);
    }
}

pub struct SimpleReport {
    message: String,
}

impl SimpleReport {
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self { message }
    }
}

impl Report for SimpleReport {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error().with_message(&self.message)
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
        match self {
            Self::Lex(err) => err.diagnose(),
            Self::Parse(err) => match err.kind.expected() {
                Some(expected) => err
                    .diagnose()
                    .with_notes(vec![format!("help: {expected} is needed here")]),
                None => err.diagnose(),
            },
            Self::Runtime(err) => err.diagnose(),
        }
    }
}

/// The dialog text leads; the precise cause labels the offending input.
impl Report for Rejected {
    fn diagnose(&self) -> Diagnostic<()> {
        Diagnostic::error()
            .with_message(self.dialog_message())
            .with_label(Label::primary((), self.error.span()).with_message(&self.error))
    }
}

use std::io::BufRead;
use std::process::ExitCode;

use abacusc::{Evaluator, Limits};
use codespan_reporting::files::SimpleFile;
use tracing::{debug, info};

use crate::calculator::{Calculator, ErrorPolicy, Rejected};
use crate::cli::Cli;
use crate::editor::{Editor, EditorRead};
use crate::keys::line_actions;
use crate::report::{Report, SimpleReport};

const BANNER: &str = "keys: 0-9 . + - * / ( )   = or Enter: evaluate   C: clear   Ctrl-D: quit";

pub struct Driver {
    expression: Option<String>,
    stdin:      bool,
    quiet:      bool,
    policy:     ErrorPolicy,
    evaluator:  Evaluator,
}

impl Driver {
    #[must_use]
    pub fn from_config(cfg: Cli) -> Self {
        let evaluator = Evaluator::with_limits(Limits {
            max_len:   cfg.max_len,
            max_depth: cfg.max_depth,
        });
        Self {
            expression: cfg.expression,
            stdin: cfg.stdin,
            quiet: cfg.quiet,
            policy: cfg.errors,
            evaluator,
        }
    }

    pub fn run(self) -> ExitCode {
        if let Some(expression) = &self.expression {
            return self.once(expression);
        }

        let result = if self.stdin { self.batch() } else { self.repl() };

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                self.report_io(&err);
                ExitCode::FAILURE
            }
        }
    }

    fn once(&self, expression: &str) -> ExitCode {
        match self.evaluator.evaluate_expression(expression) {
            Ok(display) => {
                println!("{display}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                if !self.quiet {
                    err.report(&SimpleFile::new("<expression>", expression));
                }
                ExitCode::FAILURE
            }
        }
    }

    fn report_io(&self, err: &std::io::Error) {
        if self.quiet {
            return;
        }
        let file = SimpleFile::new("<stdin>", "");
        SimpleReport::new(format!("could not read input: {err}")).report(&file);
    }

    fn reject(&self, rejected: &Rejected) {
        match self.policy {
            ErrorPolicy::Inline => debug!(source = %rejected.source, "showing inline error"),
            ErrorPolicy::Dialog if self.quiet => {}
            ErrorPolicy::Dialog => {
                let file = SimpleFile::new("<display>", rejected.source.as_str());
                rejected.report(&file);
            }
        }
    }

    /// Presses the keys of one input line.
    fn feed(&self, calculator: &mut Calculator, line: &str) {
        for action in line_actions(line) {
            if let Err(rejected) = calculator.apply(action) {
                self.reject(&rejected);
            }
        }
        debug!(
            expression = calculator.expression(),
            display = calculator.display(),
            "line applied"
        );
    }

    fn batch(&self) -> std::io::Result<()> {
        let mut calculator = Calculator::new(self.evaluator, self.policy);
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            self.feed(&mut calculator, &line);
            println!("{}", calculator.display());
        }
        Ok(())
    }

    fn repl(&self) -> std::io::Result<()> {
        let mut calculator = Calculator::new(self.evaluator, self.policy);
        let mut editor = Editor::default();
        if !self.quiet {
            eprintln!("{BANNER}");
        }
        info!(policy = ?self.policy, limits = ?self.evaluator.limits(), "session started");

        loop {
            let signal = editor.read()?;
            let input = match signal {
                EditorRead::Read(input) => input,
                EditorRead::Break => break,
                EditorRead::Continue => continue,
            };

            self.feed(&mut calculator, &input);
            println!("{}", calculator.display());
            editor.set_history(calculator.history());
        }

        Ok(())
    }
}

use abacusc::{EvalError, Evaluator};
use tracing::debug;

/// What a button click or key press asks the calculator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Append(char),
    Evaluate,
    Clear,
}

/// How a failed evaluation shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ErrorPolicy {
    /// The display reads "Error" until the next key press.
    #[default]
    Inline,
    /// A message is raised and the display is emptied.
    Dialog,
}

pub const ERROR_TEXT: &str = "Error";
const BLANK: &str = "0";

/// An evaluation the calculator gave up on.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub source: String,
    pub error:  EvalError,
}

impl Rejected {
    #[must_use]
    pub const fn dialog_message(&self) -> &'static str {
        if self.error.is_divide_by_zero() {
            "Cannot divide by zero"
        } else {
            "Invalid Expression"
        }
    }
}

pub struct Calculator {
    expression: String,
    display:    String,

    /// last submitted expression, as "<expression> ="
    history: String,

    policy:    ErrorPolicy,
    evaluator: Evaluator,
}

impl Calculator {
    #[must_use]
    pub fn new(evaluator: Evaluator, policy: ErrorPolicy) -> Self {
        Self {
            expression: String::new(),
            display: BLANK.to_string(),
            history: String::new(),
            policy,
            evaluator,
        }
    }

    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn apply(&mut self, action: Action) -> Result<(), Rejected> {
        match action {
            Action::Append(c) => {
                self.append(c);
                Ok(())
            }
            Action::Evaluate => self.evaluate(),
            Action::Clear => {
                self.clear();
                Ok(())
            }
        }
    }

    fn append(&mut self, c: char) {
        if matches!(self.display.as_str(), BLANK | ERROR_TEXT) {
            self.expression.clear();
        }
        self.expression.push(c);
        self.display.clone_from(&self.expression);
    }

    fn evaluate(&mut self) -> Result<(), Rejected> {
        self.history = format!("{} =", self.expression);

        match self.evaluator.evaluate_expression(&self.expression) {
            Ok(result) => {
                self.display.clone_from(&result);
                self.expression = result;
                Ok(())
            }
            Err(error) => {
                let source = std::mem::take(&mut self.expression);
                debug!(%source, %error, policy = ?self.policy, "evaluation rejected");
                self.display = match self.policy {
                    ErrorPolicy::Inline => ERROR_TEXT.to_string(),
                    ErrorPolicy::Dialog => String::new(),
                };
                Err(Rejected { source, error })
            }
        }
    }

    fn clear(&mut self) {
        self.expression.clear();
        self.history.clear();
        self.display = BLANK.to_string();
    }
}

//! Menu-driven console session
//!
//! The shell greets the user, asks for a name once, then loops over the menu
//! until the exit option is chosen. Input and output are generic so a whole
//! session can be driven from memory.

use log::{debug, warn};
use std::io::{BufRead, Write};

use crate::error::{CalcError, Result, INPUT_FORMAT_MESSAGE};
use crate::formulas::{CalculationKind, CalculationRequest};

pub const WELCOME: &str = "Welcome to the Finance Calculator!";
pub const NAME_PROMPT: &str = "Please enter your name: ";
pub const CHOICE_PROMPT: &str = "Enter your choice: ";
pub const EXIT_CHOICE: &str = "5";

pub const MENU: &str = "Select which service you wish to use:
[1] -- Calculate Compound interest
[2] -- Calculate Simple interest
[3] -- Calculate Present value
[4] -- Calculate Annuity payment
[5] -- Exit";

/// Numeric prompts in the order they are asked
const AMOUNT_PROMPT: (&str, &str) = ("initial amount", "Enter your initial amount: ");
const RATE_PROMPT: (&str, &str) = ("rate", "Enter the annual interest rate as a decimal: ");
const TIME_PROMPT: (&str, &str) = ("time", "Enter the years it will be invested for: ");

/// Shell options
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    /// Use checked evaluation and report domain errors instead of printing
    /// NaN or infinity
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellState {
    Prompting,
    Terminated,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user picked the exit option
    Exited,
    /// Input closed before the exit option was picked
    EndOfInput,
}

/// Per-session state carried through each loop iteration
#[derive(Debug)]
struct Session {
    name: String,
    state: ShellState,
}

/// Interactive calculator over a line-based reader and a writer
pub struct Shell<R, W> {
    input: R,
    output: W,
    config: ShellConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: ShellConfig) -> Self {
        Self {
            input,
            output,
            config,
        }
    }

    /// Run one complete session
    pub fn run(&mut self) -> Result<SessionOutcome> {
        writeln!(self.output, "{}", WELCOME)?;
        let name = match self.prompt(NAME_PROMPT)? {
            Some(name) => name,
            None => return self.end_of_input(),
        };

        let mut session = Session {
            name,
            state: ShellState::Prompting,
        };

        while session.state == ShellState::Prompting {
            write!(self.output, "\n{}\n\n", MENU)?;
            let choice = match self.prompt(CHOICE_PROMPT)? {
                Some(choice) => choice,
                None => return self.end_of_input(),
            };
            // Surrounding spaces are ignored, so " 5" exits as well
            let choice = choice.trim();
            debug!("menu choice {:?}", choice);

            if choice == EXIT_CHOICE {
                write!(
                    self.output,
                    "Thank you {} for using this financial service!\n\nYou have successfully exited the program.\n",
                    session.name
                )?;
                self.output.flush()?;
                session.state = ShellState::Terminated;
                continue;
            }

            let (amount, rate, time) = match self.read_inputs() {
                Ok(Some(values)) => values,
                Ok(None) => return self.end_of_input(),
                Err(CalcError::InputFormat { field, input }) => {
                    debug!("rejected {} input {:?}", field, input);
                    writeln!(self.output, "{}", INPUT_FORMAT_MESSAGE)?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            // Values are collected before the choice is checked, so an unknown
            // choice still asks for all three numbers
            let Some(kind) = CalculationKind::from_menu_key(choice) else {
                debug!("unrecognized menu choice {:?}, nothing calculated", choice);
                continue;
            };

            let request = CalculationRequest::new(kind, amount, rate, time);
            self.report(&session, &request)?;
        }

        Ok(SessionOutcome::Exited)
    }

    /// Consume the shell, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }

    fn report(&mut self, session: &Session, request: &CalculationRequest) -> Result<()> {
        debug!("dispatching {:?}", request);
        let label = request.kind.label();

        if self.config.strict {
            match request.evaluate_checked() {
                Ok(value) => {
                    writeln!(self.output, "\n{} your {}: {}", session.name, label, format_result(value))?
                }
                Err(CalcError::Domain { reason, .. }) => {
                    writeln!(self.output, "\nCannot calculate {}: {}", label, reason)?
                }
                Err(e) => return Err(e),
            }
        } else {
            let value = request.evaluate();
            writeln!(self.output, "\n{} your {}: {}", session.name, label, format_result(value))?;
        }
        Ok(())
    }

    /// Read amount, rate and time, stopping at the first value that fails to parse
    fn read_inputs(&mut self) -> Result<Option<(f64, f64, f64)>> {
        let Some(amount) = self.read_number(AMOUNT_PROMPT)? else {
            return Ok(None);
        };
        let Some(rate) = self.read_number(RATE_PROMPT)? else {
            return Ok(None);
        };
        let Some(time) = self.read_number(TIME_PROMPT)? else {
            return Ok(None);
        };
        Ok(Some((amount, rate, time)))
    }

    fn read_number(&mut self, (field, text): (&'static str, &str)) -> Result<Option<f64>> {
        let Some(line) = self.prompt(text)? else {
            return Ok(None);
        };
        let trimmed = line.trim();
        parse_number(trimmed).map(Some).ok_or_else(|| CalcError::InputFormat {
            field,
            input: trimmed.to_string(),
        })
    }

    /// Print a prompt and read one line without its line ending; `None` at EOF
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    fn end_of_input(&mut self) -> Result<SessionOutcome> {
        warn!("input closed before the exit option was chosen");
        // Finish the dangling prompt line
        writeln!(self.output)?;
        self.output.flush()?;
        Ok(SessionOutcome::EndOfInput)
    }
}

/// Parse a decimal number, allowing single underscores between digits
/// as digit separators ("1_000.5")
fn parse_number(text: &str) -> Option<f64> {
    if !text.contains('_') {
        return text.parse().ok();
    }

    let bytes = text.as_bytes();
    let separators_ok = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(|next| next.is_ascii_digit()))
    });
    if !separators_ok {
        return None;
    }
    text.replace('_', "").parse().ok()
}

/// Render a result the way the console has always shown floats: shortest
/// round-trip digits, a trailing `.0` on whole numbers, lowercase `nan`/`inf`
/// and a signed two-digit exponent (`1e+20`, `1.5e-07`)
fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(input: &str, config: ShellConfig) -> (SessionOutcome, String) {
        let mut shell = Shell::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), config);
        let outcome = shell.run().unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (outcome, output)
    }

    #[test]
    fn test_exit_prints_farewell_with_name() {
        let (outcome, output) = run_session("Ada\n5\n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.starts_with(WELCOME));
        assert!(output.contains(MENU));
        assert!(output.ends_with(
            "Thank you Ada for using this financial service!\n\nYou have successfully exited the program.\n"
        ));
    }

    #[test]
    fn test_compound_interest_session() {
        let (_, output) = run_session("Ada\n1\n1000\n0.05\n5\n5\n", ShellConfig::default());

        assert!(output.contains("Enter your initial amount: "));
        assert!(output.contains("Enter the annual interest rate as a decimal: "));
        assert!(output.contains("Enter the years it will be invested for: "));
        assert!(output.contains("\nAda your Compound Interest: 1276.28"));
        assert_eq!(output.matches(MENU).count(), 2);
    }

    #[test]
    fn test_each_choice_uses_its_label() {
        let (_, output) = run_session(
            "Bo\n2\n1000\n0.05\n5\n3\n1000\n0.05\n5\n4\n1000\n0.05\n5\n5\n",
            ShellConfig::default(),
        );

        assert!(output.contains("Bo your Simple Interest: 1250.0"));
        assert!(output.contains("Bo your Present Value: 783.52"));
        assert!(output.contains("Bo your Annuity Payment: 230.97"));
    }

    #[test]
    fn test_non_numeric_input_returns_to_menu() {
        let (outcome, output) = run_session("Ada\n1\n1000\nfive percent\n5\n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.contains(INPUT_FORMAT_MESSAGE));
        // Time is never asked once the rate is rejected
        assert!(!output.contains("Enter the years it will be invested for: "));
        assert!(!output.contains("your Compound Interest"));
        assert_eq!(output.matches(MENU).count(), 2);
    }

    #[test]
    fn test_unrecognized_choice_calculates_nothing() {
        let (outcome, output) = run_session("Ada\n9\n1000\n0.05\n5\n5\n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(!output.contains("Ada your "));
        assert!(!output.contains(INPUT_FORMAT_MESSAGE));
        assert_eq!(output.matches(MENU).count(), 2);
    }

    #[test]
    fn test_raw_mode_prints_non_finite_results() {
        let (_, output) = run_session("Ada\n4\n1000\n0\n5\n5\n", ShellConfig::default());
        assert!(output.contains("Ada your Annuity Payment: nan"));
    }

    #[test]
    fn test_strict_mode_reports_domain_error() {
        let (outcome, output) = run_session("Ada\n4\n1000\n0\n5\n5\n", ShellConfig { strict: true });

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.contains("Cannot calculate Annuity Payment: rate must be non-zero for an annuity"));
        assert!(!output.contains("your Annuity Payment: nan"));
    }

    #[test]
    fn test_end_of_input_stops_quietly() {
        let (outcome, output) = run_session("Ada\n1\n1000\n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::EndOfInput);
        assert!(!output.contains("Thank you"));
        // The unanswered rate prompt is closed off with a newline
        assert!(output.ends_with("Enter the annual interest rate as a decimal: \n"));
    }

    #[test]
    fn test_windows_line_endings() {
        let (outcome, output) = run_session("Ada\r\n2\r\n100\r\n0.1\r\n2\r\n5\r\n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.contains("Ada your Simple Interest: 120"));
        assert!(output.contains("Thank you Ada for"));
    }

    #[test]
    fn test_non_numeric_amount_returns_to_menu() {
        let (outcome, output) = run_session("Ada\n1\nabc\n5\n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.contains(INPUT_FORMAT_MESSAGE));
        assert!(!output.contains("Enter the annual interest rate as a decimal: "));
        assert_eq!(output.matches(MENU).count(), 2);
    }

    #[test]
    fn test_non_numeric_time_returns_to_menu() {
        let (outcome, output) = run_session("Ada\n1\n1\n1\nx\n5\n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.contains("Enter the years it will be invested for: "));
        assert!(output.contains(INPUT_FORMAT_MESSAGE));
        assert!(!output.contains("Ada your "));
        assert_eq!(output.matches(MENU).count(), 2);
    }

    #[test]
    fn test_padded_exit_choice_exits() {
        let (outcome, output) = run_session("Ada\n 5 \n", ShellConfig::default());

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.contains("Thank you Ada for"));
    }

    #[test]
    fn test_underscore_digit_separators() {
        let (_, output) = run_session("Ada\n2\n1_000\n0.05\n5\n5\n", ShellConfig::default());
        assert!(output.contains("Ada your Simple Interest: 1250.0"));

        assert_eq!(parse_number("1_000_000.5"), Some(1_000_000.5));
        assert_eq!(parse_number("_1000"), None);
        assert_eq!(parse_number("1000_"), None);
        assert_eq!(parse_number("1__000"), None);
        assert_eq!(parse_number("1_.5"), None);
    }

    #[test]
    fn test_result_formatting() {
        assert_eq!(format_result(1250.0), "1250.0");
        assert_eq!(format_result(783.25), "783.25");
        assert_eq!(format_result(1e20), "1e+20");
        assert_eq!(format_result(1.5e-7), "1.5e-07");
        assert_eq!(format_result(2.5e123), "2.5e+123");
        assert_eq!(format_result(f64::NAN), "nan");
        assert_eq!(format_result(f64::INFINITY), "inf");
        assert_eq!(format_result(f64::NEG_INFINITY), "-inf");
    }
}

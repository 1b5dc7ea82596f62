use anyhow::Result;
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use chumsky::Parser;
use stepper::{
    evaluator::{self, Config, EvalError},
    format, parser,
    prelude::*,
    split,
};
use tracing_subscriber::EnvFilter;
use util::repl;

fn build_report(e: &Error) -> Report<Span> {
    use chumsky::error::SimpleReason;
    let report = Report::build(ReportKind::Error, (), e.span().start);
    match e.reason() {
        SimpleReason::Unexpected => {
            let found = e.found().map(String::as_str).unwrap_or("end of the input");
            let expected = e
                .expected()
                .map(|t| t.as_ref().map(String::as_str).unwrap_or("end of the input"))
                .collect::<Vec<_>>()
                .join(", ");
            let expected = if expected.is_empty() {
                "something else"
            } else {
                &expected
            };
            report
                .with_message(format!("Unexpected {found}, expected {expected}",))
                .with_label(
                    Label::new(e.span())
                        .with_message(format!("Unexpected {}", found.fg(Color::Red)))
                        .with_color(Color::Red),
                )
        }
        SimpleReason::Unclosed { span, delimiter } => report
            .with_message(format!("Unclosed delimiter {}", delimiter.fg(Color::Yellow)))
            .with_label(
                Label::new(span.clone())
                    .with_message(format!(
                        "Unclosed delimiter {}",
                        delimiter.fg(Color::Yellow)
                    ))
                    .with_color(Color::Yellow),
            )
            .with_label(
                Label::new(e.span())
                    .with_message(format!(
                        "Must be closed before this {}",
                        e.found()
                            .map(String::as_str)
                            .unwrap_or("end of the input")
                            .fg(Color::Red)
                    ))
                    .with_color(Color::Red),
            ),
        SimpleReason::Custom(msg) => report.with_message(msg).with_label(
            Label::new(e.span())
                .with_message(format!("{}", msg.fg(Color::Red)))
                .with_color(Color::Red),
        ),
    }
    .finish()
}

#[derive(Default)]
struct Repl {
    config: Config,
}
impl Repl {
    fn tokenize(input: &str) -> Result<(), EvalError> {
        let tokens = parser::lexer()
            .parse(input)
            .map_err(|es| EvalError::Syntax {
                input: input.to_string(),
                errors: es.into_iter().map(|e| e.map(|e| e.to_string())).collect(),
            })?
            .iter()
            .map(Spanned::value)
            .cloned()
            .collect::<Vec<_>>();
        println!("{tokens:?}");
        Ok(())
    }

    fn parse(input: &str) -> Result<(), EvalError> {
        let expr = parser::parse_expression(input).map_err(|errors| EvalError::Syntax {
            input: input.to_string(),
            errors,
        })?;
        println!("{expr}");
        Ok(())
    }

    fn format(input: &str) {
        println!("{}", format::format_expression(input));
    }

    fn split(input: &str) -> Result<(), EvalError> {
        let input = format::format_expression(input);
        let parts = split::split_expression(&input).map_err(|e| EvalError::Syntax {
            input: input.clone(),
            errors: vec![e],
        })?;
        println!("{parts:?}");
        Ok(())
    }

    fn evaluate(&self, input: &str) -> Result<(), EvalError> {
        let steps = evaluator::evaluate_with(&self.config, input)?;
        let width = steps.len().to_string().len();
        for (i, step) in steps.iter().enumerate() {
            println!("{:>width$}. {step}", i + 1);
        }
        Ok(())
    }

    fn show_help() {
        println!(
            "{}",
            r#"
term                -- same as :evaluate term
:tokenize   term    -- show tokenized term
:parse      term    -- show parsed term
:format     term    -- show the term with explicit parentheses
:split      term    -- show the head and the arguments of the formatted term
:evaluate   term    -- show every reduction step
:help               -- show this message
        "#
            .trim()
        );
    }

    fn handle_repl_input(&mut self, input: &str) -> Result<(), EvalError> {
        let (cmd, input) = if let Some(stripped) = input.strip_prefix(':') {
            stripped
                .trim_start()
                .split_once(' ')
                .unwrap_or((stripped, ""))
        } else {
            ("", input)
        };
        match cmd {
            "to" | "tokenize" => Self::tokenize(input)?,
            "p" | "parse" => Self::parse(input)?,
            "f" | "format" => Self::format(input),
            "s" | "split" => Self::split(input)?,
            "" | "r" | "run" | "e" | "eval" | "evaluate" => self.evaluate(input)?,
            "h" | "he" | "hel" | "help" => Self::show_help(),
            _ => {
                eprintln!("Unknown command {cmd}");
                Self::show_help();
            }
        }
        Ok(())
    }
}
impl repl::Repl for Repl {
    type Error = anyhow::Error;
    const HISTORY: Option<&'static str> = Some("/tmp/stepper.history");
    fn evaluate(&mut self, input: String) -> Result<(), Self::Error> {
        match self.handle_repl_input(&input) {
            Ok(()) => {}
            Err(EvalError::Syntax { input, errors }) => {
                for e in &errors {
                    build_report(e).eprint(Source::from(&input))?;
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    println!("Hi, this is a λ-calculus stepper. :h to show help");
    println!();
    repl::start_repl(Repl::default())?;
    Ok(())
}

use thiserror::Error;
use tracing::debug;

use crate::{
    alpha::resolve_conflicts,
    expr::Expr,
    format::format_expression,
    parser::parse_expression,
    prelude::Error as SyntaxError,
    reduce::reduce_expression,
    split::split_expression,
    trace::{church_boolean, Trace, Transformation, TransformationStep},
};

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("The input expression cannot be empty")]
    EmptyInput,
    #[error("Syntax error in `{input}`")]
    Syntax {
        input: String,
        errors: Vec<SyntaxError>,
    },
    #[error("Gave up after {0} steps")]
    StepLimit(usize),
    #[error("Expression grew beyond {limit} characters")]
    TooLarge { limit: usize },
}
pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Maximum number of steps kept in a trace.
    pub max_steps: usize,
    /// Maximum length of any rendered intermediate expression.
    pub max_len: usize,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            max_steps: 1000,
            max_len: 10_000,
        }
    }
}

fn parse(input: &str) -> Result<Expr> {
    parse_expression(input).map_err(|errors| EvalError::Syntax {
        input: input.to_string(),
        errors,
    })
}

fn redex(head: &Expr, arg: &Expr) -> Expr {
    Expr::Apply(head.clone().into(), arg.clone().into())
}

struct Driver<'a> {
    config: &'a Config,
    trace: Trace,
}
impl Driver<'_> {
    fn emit(&mut self, expression: impl ToString, transformation: Transformation) -> Result<()> {
        let expression = expression.to_string();
        if expression.chars().count() > self.config.max_len {
            return Err(EvalError::TooLarge {
                limit: self.config.max_len,
            });
        }
        if self.trace.push(expression, transformation) && self.trace.len() > self.config.max_steps
        {
            return Err(EvalError::StepLimit(self.config.max_steps));
        }
        Ok(())
    }

    /// Renders and parses again, so the next stage sees the expression in normal textual form.
    fn reparse(&mut self, expr: &Expr) -> Result<Expr> {
        let text = expr.to_string();
        let expr = parse(&text)?;
        self.emit(&expr, Transformation::Alpha)?;
        Ok(expr)
    }
}

/// Applies the head of a formatted expression to each of its arguments in turn, recording
/// every intermediate form.
pub fn apply_reductions(config: &Config, input: &str) -> Result<Trace> {
    let mut driver = Driver {
        config,
        trace: Trace::default(),
    };
    driver.emit(input, Transformation::Start)?;

    let parts = split_expression(input).map_err(|e| EvalError::Syntax {
        input: input.to_string(),
        errors: vec![e],
    })?;
    let (head, args) = parts.split_first().ok_or(EvalError::EmptyInput)?;

    let mut head = parse(head)?;
    driver.emit(&head, Transformation::Alpha)?;

    for part in args {
        driver.emit(part, Transformation::TakeNextPart)?;
        let arg = parse(part)?;
        driver.emit(&arg, Transformation::Alpha)?;
        driver.emit(redex(&head, &arg), Transformation::Application)?;

        let resolution = resolve_conflicts(&head, &arg);
        if !resolution.renames.is_empty() {
            debug!("renamed {:?}", resolution.renames);
            driver.emit(redex(&resolution.expr, &arg), Transformation::Rename)?;
        }

        let reduced = reduce_expression(&resolution.expr, &arg);
        driver.emit(&reduced, Transformation::Beta)?;
        head = driver.reparse(&reduced)?;
    }

    driver.emit(format_expression(&head.to_string()), Transformation::End)?;
    if let Some(value) = church_boolean(&head) {
        driver.emit(
            if value { "True" } else { "False" },
            Transformation::ChurchBoolean,
        )?;
    }
    Ok(driver.trace)
}

pub fn evaluate_with(config: &Config, input: &str) -> Result<Vec<TransformationStep>> {
    let input = format_expression(input);
    if input.is_empty() {
        return Err(EvalError::EmptyInput);
    }
    Ok(apply_reductions(config, &input)?.into_steps())
}

/// Formats `input` and reduces it, returning the trace of every distinct intermediate form.
pub fn evaluate(input: &str) -> Result<Vec<TransformationStep>> {
    evaluate_with(&Config::default(), input)
}

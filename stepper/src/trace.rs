use tracing::{debug, trace};

use crate::expr::Expr;

#[derive(PartialEq, Eq, Clone, Copy, derive_more::Display, Debug)]
pub enum Transformation {
    #[display(fmt = "Start")]
    Start,
    #[display(fmt = "α conversion")]
    Alpha,
    #[display(fmt = "Take next part")]
    TakeNextPart,
    /// The head applied to the argument it is about to consume.
    #[display(fmt = "Application")]
    Application,
    #[display(fmt = "Rename bound variables")]
    Rename,
    #[display(fmt = "β reduction")]
    Beta,
    #[display(fmt = "End")]
    End,
    #[display(fmt = "Church boolean")]
    ChurchBoolean,
}

/// One line of the trace: an expression as rendered at some point, and how it got there.
#[derive(PartialEq, Eq, Clone, derive_more::Display, Debug)]
#[display(fmt = "{transformation}: {expression}")]
pub struct TransformationStep {
    pub expression: String,
    pub transformation: Transformation,
}

#[derive(Default, Clone, Debug)]
pub struct Trace {
    steps: Vec<TransformationStep>,
}
impl Trace {
    /// Appends a step unless it renders the same as the last one. Returns whether it was kept.
    pub fn push(&mut self, expression: impl ToString, transformation: Transformation) -> bool {
        let expression = expression.to_string();
        if self.last_expression() == Some(expression.as_str()) {
            trace!("{transformation}: {expression} (unchanged)");
            return false;
        }
        debug!("{transformation}: {expression}");
        self.steps.push(TransformationStep {
            expression,
            transformation,
        });
        true
    }

    pub fn last_expression(&self) -> Option<&str> {
        self.steps.last().map(|step| step.expression.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<TransformationStep> {
        self.steps
    }
}

/// `λa.λb.a` is true and `λa.λb.b` is false, whatever the two names are.
pub fn church_boolean(expr: &Expr) -> Option<bool> {
    if let Expr::Abs(first, body) = expr {
        if let Expr::Abs(second, body) = body.as_ref() {
            if let Expr::Var(name) = body.as_ref() {
                if name == second {
                    return Some(false);
                } else if name == first {
                    return Some(true);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse_expression;

    fn church(s: &str) -> Option<bool> {
        church_boolean(&parse_expression(s).unwrap())
    }

    #[test]
    fn test_dedup() {
        let mut trace = Trace::default();
        assert!(trace.push("λx.x", Transformation::Start));
        assert!(!trace.push("λx.x", Transformation::Alpha));
        assert!(trace.push("x", Transformation::Beta));
        assert!(trace.push("λx.x", Transformation::End));
        assert_eq!(trace.len(), 3);
        assert_eq!(
            trace.into_steps()[1],
            TransformationStep {
                expression: "x".into(),
                transformation: Transformation::Beta,
            }
        );
    }

    #[test]
    fn test_display() {
        let step = TransformationStep {
            expression: "λy.ay".into(),
            transformation: Transformation::Beta,
        };
        assert_eq!(step.to_string(), "β reduction: λy.ay");
    }

    #[test]
    fn test_church_boolean() {
        assert_eq!(church("λa.λb.a"), Some(true));
        assert_eq!(church("λa.λb.b"), Some(false));
        assert_eq!(church("λx.λy.x"), Some(true));
        assert_eq!(church("λt.λf.f"), Some(false));
        assert_eq!(church("λx.λx.x"), Some(false));
        assert_eq!(church("λa.λb.c"), None);
        assert_eq!(church("λa.λb.ab"), None);
        assert_eq!(church("λa.a"), None);
        assert_eq!(church("a"), None);
    }
}

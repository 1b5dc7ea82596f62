use std::rc::Rc;

use chumsky::prelude::*;

use crate::{expr::Expr, prelude::*};

pub trait SimpleParser<I: Clone + std::hash::Hash, O>:
    Parser<I, O, Error = Error<I>> + Clone
{
    #[allow(clippy::type_complexity)]
    fn spanned(self) -> chumsky::combinator::MapWithSpan<Self, fn(O, Span) -> Spanned<O>, O>
    where
        Self: Sized,
        I: std::cmp::Eq,
    {
        self.map_with_span(|value, span| Spanned { span, value })
    }
}
impl<I: Clone + std::hash::Hash, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = Error<I>> + Clone
{
}

#[derive(PartialEq, Eq, Hash, Clone, derive_more::Display, Debug)]
pub enum Token {
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
    #[display(fmt = "λ")]
    Lambda,
    #[display(fmt = ".")]
    Dot,
    #[display(fmt = "{_0}")]
    Ident(Identifier),
}

pub fn lexer() -> impl SimpleParser<char, Vec<Spanned<Token>>> {
    let token = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('λ').to(Token::Lambda),
        just('\\').to(Token::Lambda),
        just('.').to(Token::Dot),
        filter(|c: &char| c.is_ascii_alphanumeric())
            .repeated()
            .at_least(1)
            .collect::<String>()
            .map(Identifier::new)
            .map(Token::Ident),
    ));
    token.spanned().padded().repeated().then_ignore(end())
}

/// `λxyx.` binds `x` then `y`; a repeated name is only bound once.
fn binders(group: &str) -> Vec<Identifier> {
    let mut ret: Vec<Identifier> = vec![];
    for atom in atoms(group) {
        if !ret.iter().any(|b| b.as_str() == atom) {
            ret.push(Identifier::new(atom.to_string()));
        }
    }
    ret
}

fn term_parser() -> impl SimpleParser<Token, Expr> {
    recursive(|term: Recursive<_, Expr, _>| {
        let ident = select! { Token::Ident(ident) => ident, }.labelled("variable");

        let group = ident
            .try_map(|group, span| {
                if group.starts_with(|c: char| c.is_ascii_digit()) {
                    Err(Error::custom(
                        span,
                        format!("Binder `{group}` must start with a letter"),
                    ))
                } else {
                    Ok(binders(&group))
                }
            })
            .labelled("binder");

        // λ xs . e
        let abs = just(Token::Lambda)
            .ignore_then(group)
            .then_ignore(just(Token::Dot))
            .then(term.clone())
            .map(|(params, body)| {
                params
                    .into_iter()
                    .rev()
                    .fold(body, |body, param| Expr::Abs(param, Rc::new(body)))
            })
            .labelled("abstraction");

        let atom = choice((
            ident.map(Expr::Var),
            term.clone()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
        ));

        // e e...: the first atom applied to whatever follows it
        let apply = atom
            .then(term.or_not())
            .map(|(lhs, rhs)| match rhs {
                Some(rhs) => Expr::Apply(lhs.into(), rhs.into()),
                None => lhs,
            })
            .labelled("application");

        choice((abs, apply))
    })
    .labelled("expression")
}

fn parse_full<T>(s: &str, parser: impl SimpleParser<Token, T>) -> Result<T, Vec<Error<String>>> {
    let len = s.chars().count();
    let eoi = Span {
        start: len,
        end: len + 1,
    };
    let tokens = lexer().parse(s).map_err(|es| {
        es.into_iter()
            .map(|e| e.map(|e| e.to_string()))
            .collect::<Vec<_>>()
    })?;
    let value = parser
        .then_ignore(end())
        .parse(chumsky::Stream::from_iter(
            eoi,
            tokens
                .into_iter()
                .map(|Spanned { span, value }| (value, span)),
        ))
        .map_err(|es| {
            es.into_iter()
                .map(|e| e.map(|e| e.to_string()))
                .collect::<Vec<_>>()
        })?;
    Ok(value)
}

pub fn parse_expression(s: &str) -> Result<Expr, Vec<Error<String>>> {
    parse_full(s, term_parser())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::test::{apply, lambda, var};

    fn lex(s: &str) -> Result<Vec<Token>, Vec<Error<char>>> {
        Ok(lexer()
            .parse(s)?
            .iter()
            .map(Spanned::value)
            .cloned()
            .collect::<Vec<_>>())
    }

    fn parse(s: &str) -> String {
        parse_expression(s).unwrap().to_string()
    }

    #[test]
    fn test_lexer() {
        assert_eq!(
            lex("λxy.x1 (5)").unwrap(),
            vec![
                Token::Lambda,
                Token::Ident(Identifier::new("xy".into())),
                Token::Dot,
                Token::Ident(Identifier::new("x1".into())),
                Token::LParen,
                Token::Ident(Identifier::new("5".into())),
                Token::RParen,
            ]
        );
        assert_eq!(lex(r"\x.x").unwrap()[0], Token::Lambda);
        assert!(lex("x + y").is_err());
    }

    #[test]
    fn test_single_variable() {
        assert_eq!(parse_expression("x").unwrap(), var!("x"));
        assert_eq!(parse_expression("xy").unwrap(), var!("xy"));
        assert_eq!(parse("10"), "10");
    }

    #[test]
    fn test_abstraction() {
        assert_eq!(parse_expression("λx.x").unwrap(), lambda!("x", var!("x")));
        assert_eq!(parse("λxy.xy"), "λx.λy.xy");
        assert_eq!(parse("λxyx.xy"), "λx.λy.xy");
        assert_eq!(parse("λx.(λy.xy)"), "λx.λy.xy");
        assert_eq!(parse("λx. x y"), "λx.(x y)");
        assert_eq!(parse("λx1y.y"), "λx1.λy.y");
    }

    #[test]
    fn test_application() {
        assert_eq!(
            parse_expression("(λx.x) (y)").unwrap(),
            apply!(lambda!("x", var!("x")), var!("y"))
        );
        assert_eq!(parse("(λx.x) (λy.y)"), "(λx.x) λy.y");
        assert_eq!(
            parse_expression("x y z").unwrap(),
            apply!(var!("x"), apply!(var!("y"), var!("z")))
        );
        assert_eq!(
            parse_expression("(x y) z").unwrap(),
            apply!(apply!(var!("x"), var!("y")), var!("z"))
        );
        assert_eq!(
            parse_expression("x λy.y z").unwrap(),
            apply!(var!("x"), lambda!("y", apply!(var!("y"), var!("z"))))
        );
    }

    #[test]
    fn test_round_trip() {
        for s in [
            "λx.λy.xy",
            "(λx.x) y",
            "(x y) z",
            "x y z",
            "λa.((λy.y) a)",
            "λx.λy.(x y)",
            "((λx.x) y) λz.z",
            "x λy.(y z)",
            "(λa.λb.a) p q",
        ] {
            assert_eq!(parse(s), s);
        }
    }

    #[test]
    fn test_malformed() {
        assert!(parse_expression("").is_err());
        assert!(parse_expression("(x").is_err());
        assert!(parse_expression("x)").is_err());
        assert!(parse_expression("λ.x").is_err());
        assert!(parse_expression("λ5.x").is_err());
        assert!(parse_expression("λx.").is_err());
    }
}

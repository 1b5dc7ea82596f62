use std::rc::Rc;

pub type Identifier = Rc<String>;

pub type Span = std::ops::Range<usize>;

#[derive(Clone, Debug)]
pub struct Spanned<T> {
    pub span: Span,
    pub value: T,
}
impl<T> Spanned<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
    pub fn span(&self) -> Span {
        self.span.clone()
    }
}

pub use chumsky::error::Error as _;
pub type Error<I = String> = chumsky::error::Simple<I, Span>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Splits a token into its atoms: a letter followed by optional digits, or a run of digits.
///
/// `xy` is `[x, y]`, `x1y` is `[x1, y]` and `10` is `[10]`.
pub fn atoms(token: &str) -> Vec<&str> {
    let mut ret = vec![];
    let mut start = None;
    for (i, c) in token.char_indices() {
        match start {
            Some(_) if c.is_ascii_digit() => {}
            Some(s) => {
                ret.push(&token[s..i]);
                start = Some(i);
            }
            None => start = Some(i),
        }
    }
    if let Some(s) = start {
        ret.push(&token[s..]);
    }
    ret
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_atoms() {
        assert_eq!(atoms("x"), vec!["x"]);
        assert_eq!(atoms("xy"), vec!["x", "y"]);
        assert_eq!(atoms("x1y"), vec!["x1", "y"]);
        assert_eq!(atoms("10"), vec!["10"]);
        assert_eq!(atoms("5a"), vec!["5", "a"]);
    }
}

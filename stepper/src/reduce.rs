use crate::{expr::Expr, prelude::*};

/// `[name := value] expr`, stopping at any abstraction that rebinds `name`.
///
/// Occurrences inside a token of several atoms are replaced atom by atom, so substituting `a` for
/// `x` in `xy` gives `ay`. Free variables of `value` are not renamed here; see
/// [`crate::alpha::resolve_conflicts`].
pub fn substitute(expr: &Expr, name: &str, value: &Expr) -> Expr {
    match expr {
        Expr::Var(token) if token.as_str() == name => value.clone(),
        Expr::Var(token) => {
            let atoms = atoms(token);
            if !atoms.contains(&name) {
                return expr.clone();
            }
            let mut pieces = atoms.into_iter().map(|atom| {
                if atom == name {
                    value.clone()
                } else {
                    Expr::var(atom)
                }
            });
            match pieces.next() {
                Some(first) => Expr::juxtapose(first, pieces.collect()),
                None => expr.clone(),
            }
        }
        Expr::Abs(param, _) if param.as_str() == name => expr.clone(),
        Expr::Abs(param, body) => Expr::Abs(param.clone(), substitute(body, name, value).into()),
        Expr::Apply(lhs, rhs) => Expr::Apply(
            substitute(lhs, name, value).into(),
            substitute(rhs, name, value).into(),
        ),
    }
}

/// One β-step of `func` applied to `arg`.
///
/// An abstraction consumes `arg`; an application first reduces its own function against its own
/// argument and leaves `arg` pending; a variable cannot be reduced.
pub fn reduce_expression(func: &Expr, arg: &Expr) -> Expr {
    match func {
        Expr::Abs(param, body) => substitute(body, param, arg),
        Expr::Apply(lhs, rhs) => Expr::Apply(reduce_expression(lhs, rhs).into(), arg.clone().into()),
        Expr::Var(_) => Expr::Apply(func.clone().into(), arg.clone().into()),
    }
}

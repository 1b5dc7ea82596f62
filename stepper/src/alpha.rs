use std::collections::BTreeSet;

use tracing::debug;

use crate::{expr::Expr, prelude::*};

/// Hands out names that are not in use yet: `a` to `z`, then `x1`, `x2`, ...
#[derive(Default, Clone, Debug)]
pub struct NameSupply {
    used: BTreeSet<Identifier>,
    counter: usize,
}
impl NameSupply {
    pub fn new(used: impl IntoIterator<Item = Identifier>) -> Self {
        Self {
            used: used.into_iter().collect(),
            counter: 0,
        }
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.iter().any(|n| n.as_str() == name)
    }

    pub fn fresh(&mut self) -> Identifier {
        let name = ('a'..='z')
            .map(String::from)
            .find(|c| !self.is_used(c))
            .unwrap_or_else(|| loop {
                self.counter += 1;
                let name = format!("x{}", self.counter);
                if !self.is_used(&name) {
                    break name;
                }
            });
        let name = Identifier::new(name);
        self.used.insert(name.clone());
        name
    }
}

/// Replaces the free atom `from` by `to`, leaving occurrences under a rebinding of `from` alone.
fn replace_free(expr: &Expr, from: &str, to: &Identifier) -> Expr {
    match expr {
        Expr::Var(token) => {
            let atoms = atoms(token);
            if !atoms.contains(&from) {
                return expr.clone();
            }
            Expr::var(
                atoms
                    .into_iter()
                    .map(|atom| if atom == from { to.as_str() } else { atom })
                    .collect::<String>(),
            )
        }
        Expr::Abs(param, _) if param.as_str() == from => expr.clone(),
        Expr::Abs(param, body) => Expr::Abs(param.clone(), replace_free(body, from, to).into()),
        Expr::Apply(lhs, rhs) => Expr::Apply(
            replace_free(lhs, from, to).into(),
            replace_free(rhs, from, to).into(),
        ),
    }
}

/// Renames every binder `from` to `to` along with the occurrences each one binds.
pub fn rename_binder(expr: &Expr, from: &str, to: &Identifier) -> Expr {
    match expr {
        Expr::Var(_) => expr.clone(),
        Expr::Abs(param, body) if param.as_str() == from => {
            let body = replace_free(body, from, to);
            Expr::Abs(to.clone(), rename_binder(&body, from, to).into())
        }
        Expr::Abs(param, body) => Expr::Abs(param.clone(), rename_binder(body, from, to).into()),
        Expr::Apply(lhs, rhs) => Expr::Apply(
            rename_binder(lhs, from, to).into(),
            rename_binder(rhs, from, to).into(),
        ),
    }
}

#[derive(Debug)]
pub struct Resolution {
    pub expr: Expr,
    pub renames: Vec<(Identifier, Identifier)>,
}

fn resolve_redex(func: &Expr, arg: &Expr, renames: &mut Vec<(Identifier, Identifier)>) -> Expr {
    match func {
        Expr::Abs(param, body) => {
            let arg_binders = arg.binders();
            let arg_free = arg.free_names();
            let mut conflicts = func
                .binders()
                .intersection(&arg_binders)
                .cloned()
                .collect::<BTreeSet<_>>();
            // binders below the consumed parameter would capture free names of the argument
            conflicts.extend(
                body.binders()
                    .into_iter()
                    .filter(|b| b != param && arg_free.contains(b)),
            );
            if conflicts.is_empty() {
                return func.clone();
            }

            let mut supply = NameSupply::new(func.names().into_iter().chain(arg.names()));
            let mut ret = func.clone();
            for from in conflicts {
                let to = supply.fresh();
                debug!("renaming bound variable {from} to {to}");
                ret = rename_binder(&ret, &from, &to);
                renames.push((from, to));
            }
            ret
        }
        Expr::Apply(lhs, rhs) => {
            Expr::Apply(resolve_redex(lhs, rhs, renames).into(), rhs.clone())
        }
        Expr::Var(_) => func.clone(),
    }
}

/// Renames binders of `head` so that reducing it against `arg` captures nothing.
///
/// Only the redex that [`crate::reduce::reduce_expression`] will fire is touched: `head` itself
/// when it is an abstraction, otherwise the innermost function on its left spine.
pub fn resolve_conflicts(head: &Expr, arg: &Expr) -> Resolution {
    let mut renames = vec![];
    let expr = resolve_redex(head, arg, &mut renames);
    Resolution { expr, renames }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{parser::parse_expression, reduce::reduce_expression};

    fn resolve(head: &str, arg: &str) -> String {
        let head = parse_expression(head).unwrap();
        let arg = parse_expression(arg).unwrap();
        resolve_conflicts(&head, &arg).expr.to_string()
    }

    #[test]
    fn test_name_supply() {
        let mut supply = NameSupply::new(["a", "c"].map(|n| Identifier::new(n.to_string())));
        assert_eq!(supply.fresh().as_str(), "b");
        assert_eq!(supply.fresh().as_str(), "d");

        let mut supply = NameSupply::new(('a'..='z').map(|c| Identifier::new(c.to_string())));
        assert_eq!(supply.fresh().as_str(), "x1");
        assert_eq!(supply.fresh().as_str(), "x2");
    }

    #[test]
    fn test_rename_binder() {
        let expr = parse_expression("λy.y (λy.yz) y").unwrap();
        let to = Identifier::new("a".into());
        assert_eq!(rename_binder(&expr, "y", &to).to_string(), "λa.(a (λa.az) a)");

        let expr = parse_expression("y λy.xy").unwrap();
        assert_eq!(rename_binder(&expr, "y", &to).to_string(), "y λa.xa");
    }

    #[test]
    fn test_no_conflict() {
        assert_eq!(resolve("λx.x", "a"), "λx.x");
        assert_eq!(resolve("λx.λy.xy", "b"), "λx.λy.xy");
        assert_eq!(resolve("x", "λx.x"), "x");
    }

    #[test]
    fn test_bound_conflict() {
        assert_eq!(resolve("λx.λy.xy", "λy.y"), "λx.λa.xa");
        assert_eq!(resolve("λx.x", "λx.x"), "λa.a");
    }

    #[test]
    fn test_capture_avoided() {
        let head = parse_expression("λx.λy.x").unwrap();
        let arg = parse_expression("y").unwrap();
        let resolution = resolve_conflicts(&head, &arg);
        assert_eq!(resolution.expr.to_string(), "λx.λa.x");
        assert_eq!(
            resolution.renames,
            vec![(Identifier::new("y".into()), Identifier::new("a".into()))]
        );
        assert_eq!(
            reduce_expression(&resolution.expr, &arg).to_string(),
            "λa.y"
        );
    }

    #[test]
    fn test_left_spine() {
        assert_eq!(resolve("(λx.λy.x) y", "z"), "(λx.λa.x) y");
    }
}

use std::{collections::BTreeSet, rc::Rc};

use crate::prelude::*;

pub type ExprRef = Rc<Expr>;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Expr {
    /// `x`, or a run of juxtaposed atoms such as `xy`
    Var(Identifier),
    /// `λx.e`
    Abs(Identifier, ExprRef),
    /// `e e`
    Apply(ExprRef, ExprRef),
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Var(name) => f.write_str(name),
            // A bare application body would read as `(λp.f) a` once formatted.
            Expr::Abs(param, body) => match body.as_ref() {
                Expr::Apply(..) => f.write_fmt(format_args!("λ{param}.({body})")),
                Expr::Var(_) | Expr::Abs(..) => f.write_fmt(format_args!("λ{param}.{body}")),
            },
            // Applications nest to the right when parsed, so a compound function needs grouping.
            Expr::Apply(lhs, rhs) => match lhs.as_ref() {
                Expr::Var(_) => f.write_fmt(format_args!("{lhs} {rhs}")),
                Expr::Abs(..) | Expr::Apply(..) => f.write_fmt(format_args!("({lhs}) {rhs}")),
            },
        }
    }
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(Identifier::new(name.into()))
    }

    /// Every parameter name introduced anywhere in the expression.
    pub fn binders(&self) -> BTreeSet<Identifier> {
        fn rec(expr: &Expr, acc: &mut BTreeSet<Identifier>) {
            match expr {
                Expr::Var(_) => {}
                Expr::Abs(param, body) => {
                    acc.insert(param.clone());
                    rec(body, acc);
                }
                Expr::Apply(lhs, rhs) => {
                    rec(lhs, acc);
                    rec(rhs, acc);
                }
            }
        }
        let mut ret = BTreeSet::new();
        rec(self, &mut ret);
        ret
    }

    /// Atoms occurring free in the expression.
    pub fn free_names(&self) -> BTreeSet<Identifier> {
        fn rec<'a>(expr: &'a Expr, bound: &mut Vec<&'a str>, acc: &mut BTreeSet<Identifier>) {
            match expr {
                Expr::Var(name) => {
                    for atom in atoms(name) {
                        if !bound.contains(&atom) {
                            acc.insert(Identifier::new(atom.to_string()));
                        }
                    }
                }
                Expr::Abs(param, body) => {
                    bound.push(param.as_str());
                    rec(body, bound, acc);
                    bound.pop();
                }
                Expr::Apply(lhs, rhs) => {
                    rec(lhs, bound, acc);
                    rec(rhs, bound, acc);
                }
            }
        }
        let mut ret = BTreeSet::new();
        rec(self, &mut vec![], &mut ret);
        ret
    }

    /// Every name the expression mentions, bound or free.
    pub fn names(&self) -> BTreeSet<Identifier> {
        fn rec(expr: &Expr, acc: &mut BTreeSet<Identifier>) {
            match expr {
                Expr::Var(name) => {
                    acc.extend(atoms(name).into_iter().map(|a| Identifier::new(a.to_string())))
                }
                Expr::Abs(param, body) => {
                    acc.insert(param.clone());
                    rec(body, acc);
                }
                Expr::Apply(lhs, rhs) => {
                    rec(lhs, acc);
                    rec(rhs, acc);
                }
            }
        }
        let mut ret = BTreeSet::new();
        rec(self, &mut ret);
        ret
    }

    /// Rebuilds a token from its atoms after some of them were replaced.
    ///
    /// Stays a single token while that keeps the meaning: every piece is a variable, only the
    /// leading one spans several atoms, and the joined text splits back into the same atoms
    /// (`x` and `5` would merge into the new atom `x5`). Otherwise folds the pieces into
    /// applications.
    pub(crate) fn juxtapose(first: Expr, rest: Vec<Expr>) -> Expr {
        let mut token = String::new();
        let mut pieces = vec![];
        let fusable = std::iter::once(&first)
            .chain(&rest)
            .enumerate()
            .all(|(i, piece)| match piece {
                Expr::Var(name) if i == 0 || atoms(name).len() == 1 => {
                    token.push_str(name);
                    pieces.extend(atoms(name));
                    true
                }
                _ => false,
            });
        if fusable && atoms(&token) == pieces {
            return Expr::var(token);
        }
        rest.into_iter()
            .fold(first, |lhs, rhs| Expr::Apply(lhs.into(), rhs.into()))
    }
}

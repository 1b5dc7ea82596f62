use crate::prelude::*;

/// `λ<letters>.<rest>` with a non-empty rest.
fn is_abstraction(s: &str) -> bool {
    s.strip_prefix('λ')
        .and_then(|s| s.split_once('.'))
        .map_or(false, |(group, rest)| {
            !group.is_empty() && group.chars().all(|c| c.is_ascii_alphanumeric()) && !rest.is_empty()
        })
}

/// Breaks a formatted expression into its head and the arguments applied to it, in order.
///
/// `(λx.x)(5)(10)` splits into `["λx.x", "5", "10"]`; a lone abstraction is never split.
pub fn split_expression(s: &str) -> Result<Vec<String>> {
    let s = s.trim();
    if is_abstraction(s) {
        return Ok(vec![s.to_string()]);
    }

    let chars = s.chars().collect::<Vec<_>>();
    let mut parts = vec![];
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '(' => {
                let start = i;
                let mut depth = 0usize;
                loop {
                    match chars.get(i) {
                        Some('(') => depth += 1,
                        Some(')') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        Some(_) => {}
                        None => {
                            return Err(Error::custom(start..start + 1, "Unclosed delimiter ("));
                        }
                    }
                    i += 1;
                }
                let inner = chars[start + 1..i].iter().collect::<String>();
                if inner.trim().is_empty() {
                    return Err(Error::custom(start..i + 1, "Empty parentheses"));
                }
                parts.push(inner.trim().to_string());
                i += 1;
            }
            ')' => return Err(Error::custom(i..i + 1, "Unexpected )")),
            c if c.is_ascii_alphanumeric() => {
                let start = i;
                while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                    i += 1;
                }
                parts.push(chars[start..i].iter().collect());
            }
            _ => i += 1,
        }
    }
    if parts.is_empty() {
        return Err(Error::custom(0..chars.len(), "Nothing to evaluate"));
    }
    Ok(parts)
}

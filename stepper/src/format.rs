/// Splits on whitespace that is not nested inside parentheses.
fn top_level_tokens(s: &str) -> Vec<String> {
    let mut tokens = vec![];
    let mut current = String::new();
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Wraps every abstraction that directly follows a `.` in its own group.
///
/// The group closes where the enclosing one does, or at the end of the token.
fn group_nested_abstractions(token: &str) -> String {
    let mut ret = String::new();
    // groups opened here that are still waiting for their `)`, one counter per paren depth
    let mut pending = vec![0usize];
    let mut chars = token.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '(' => pending.push(0),
            ')' if pending.len() > 1 => {
                let count = pending.pop().unwrap_or_default();
                ret.push_str(&")".repeat(count));
            }
            '.' if chars.peek() == Some(&'λ') => {
                ret.push_str(".(");
                if let Some(count) = pending.last_mut() {
                    *count += 1;
                }
                continue;
            }
            _ => {}
        }
        ret.push(c);
    }
    ret.push_str(&")".repeat(pending.iter().sum()));
    ret
}

/// Normalizes whitespace and makes every application explicit: `λx.x 5` becomes `(λx.x)(5)`.
///
/// A body that starts with another abstraction gets its own group, so `λx.λy.xy` becomes
/// `λx.(λy.xy)`. Formatting a formatted string returns it unchanged.
pub fn format_expression(s: &str) -> String {
    let s = s.replace('\\', "λ");
    let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
    let s = s.replace(". ", ".");

    let mut tokens = top_level_tokens(&s);
    if tokens.len() > 1 {
        for token in tokens.iter_mut().filter(|t| !t.starts_with('(')) {
            *token = format!("({token})");
        }
    }
    tokens
        .iter()
        .map(|token| group_nested_abstractions(token))
        .collect()
}

//! Token re-emitter: renders the resolved token stream back to a single
//! statement string with conventional SQL spacing.

use super::token::Token;

/// One space between tokens, except: nothing before `,`, `)`, `;` or `.`,
/// nothing after `(` or `.`, and nothing before the first token.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev: Option<&str> = None;

    for token in tokens {
        let text = token.text();
        if out.is_empty() {
            out.push_str(text);
        } else if matches!(text, "," | ")" | ";" | ".") {
            out.push_str(text);
        } else if matches!(prev, Some("(") | Some(".")) {
            out.push_str(text);
        } else {
            out.push(' ');
            out.push_str(text);
        }
        prev = Some(text);
    }

    out
}

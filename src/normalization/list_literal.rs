//! Strict parser for list literals stored as text, e.g. `['Action', "Drama"]`.
//!
//! Grammar (whitespace allowed between tokens):
//!   list := '[' ( item ( ',' item )* ','? )? ']'
//!   item := single- or double-quoted string with \\ \' \" \n \t \r escapes
//!
//! Anything else (bare words, numbers, nested lists, trailing garbage) is
//! rejected so the caller can fall back to treating the text as one value.

use std::iter::Peekable;
use std::str::Chars;

/// Parse `input` as a list of quoted strings. Returns `None` when the text does
/// not match the grammar.
pub fn parse_string_list(input: &str) -> Option<Vec<String>> {
    let mut chars = input.trim().chars().peekable();
    if chars.next()? != '[' {
        return None;
    }

    let mut items = Vec::new();
    loop {
        skip_ws(&mut chars);
        match chars.peek().copied()? {
            ']' => {
                chars.next();
                break;
            }
            quote @ ('"' | '\'') => {
                chars.next();
                items.push(parse_quoted(&mut chars, quote)?);
                skip_ws(&mut chars);
                match chars.next()? {
                    ',' => continue,
                    ']' => break,
                    _ => return None,
                }
            }
            _ => return None,
        }
    }

    // The closing bracket must end the literal.
    if chars.next().is_some() {
        return None;
    }
    Some(items)
}

/// Cheap pre-check used before attempting a full parse.
pub fn looks_bracketed(input: &str) -> bool {
    let t = input.trim();
    t.starts_with('[') && t.ends_with(']')
}

fn skip_ws(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Option<String> {
    let mut out = String::new();
    loop {
        match chars.next()? {
            c if c == quote => return Some(out),
            '\\' => {
                let escaped = match chars.next()? {
                    '\\' => '\\',
                    '\'' => '\'',
                    '"' => '"',
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    _ => return None,
                };
                out.push(escaped);
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_double_and_single_quoted_items() {
        assert_eq!(
            parse_string_list(r#"["Action", 'Drama']"#),
            Some(vec!["Action".to_string(), "Drama".to_string()])
        );
    }

    #[test]
    fn accepts_empty_list_and_trailing_comma() {
        assert_eq!(parse_string_list("[]"), Some(vec![]));
        assert_eq!(parse_string_list("[ ]"), Some(vec![]));
        assert_eq!(
            parse_string_list("['France',]"),
            Some(vec!["France".to_string()])
        );
    }

    #[test]
    fn keeps_commas_and_escapes_inside_quotes() {
        assert_eq!(
            parse_string_list(r#"['Korea, Republic of', 'Côte d\'Ivoire']"#),
            Some(vec![
                "Korea, Republic of".to_string(),
                "Côte d'Ivoire".to_string()
            ])
        );
    }

    #[test]
    fn rejects_non_string_items_and_garbage() {
        assert_eq!(parse_string_list("[1, 2]"), None);
        assert_eq!(parse_string_list("[Action, Drama]"), None);
        assert_eq!(parse_string_list("['a' 'b']"), None);
        assert_eq!(parse_string_list("['a'] extra"), None);
        assert_eq!(parse_string_list("['unterminated]"), None);
        assert_eq!(parse_string_list("[['nested']]"), None);
        assert_eq!(parse_string_list(r"['bad \x escape']"), None);
        assert_eq!(parse_string_list("["), None);
        assert_eq!(parse_string_list(""), None);
    }

    #[test]
    fn bracket_precheck() {
        assert!(looks_bracketed(" ['x'] "));
        assert!(!looks_bracketed("Action"));
        assert!(!looks_bracketed("[open"));
    }
}

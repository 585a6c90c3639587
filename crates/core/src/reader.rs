//! Reader for calc source text
//!
//! Turns source text into a flat token stream. The reader only classifies
//! tokens; it never evaluates them.
//!
//! ```text
//! # comment to end of line
//! ,square { dup mul } def     # quoted word, quotation, word
//! [1 2 3] { square } map      # array delimiters split tokens
//! ```
//!
//! `{ } [ ]` are self-delimiting. Everything else is split on whitespace.
//! A comma glued to a name makes a quoted word. Anything that reads as a
//! decimal number (optional sign, optional fraction) is a number literal.

use crate::error::{EvalError, EvalResult};
use std::fmt;

/// Token classification
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    /// `,name`: pushed as a word reference, never executed
    QuotedWord(String),
    /// A name to look up and execute
    Word(String),
    OpenQuote,
    CloseQuote,
    OpenArray,
    CloseArray,
}

/// A token with source position information
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Token {
    fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Token { kind, line, column }
    }
}

// Positions are diagnostic metadata; two quotations with the same tokens are equal.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::QuotedWord(name) => write!(f, ",{}", name),
            TokenKind::Word(name) => write!(f, "{}", name),
            TokenKind::OpenQuote => write!(f, "{{"),
            TokenKind::CloseQuote => write!(f, "}}"),
            TokenKind::OpenArray => write!(f, "["),
            TokenKind::CloseArray => write!(f, "]"),
        }
    }
}

/// Tokenize source text and check that delimiters are balanced
pub fn tokenize(source: &str) -> EvalResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = (1, 1);
    let mut in_comment = false;

    let mut line = 1;
    let mut col = 1;

    for ch in source.chars() {
        if in_comment {
            if ch == '\n' {
                in_comment = false;
            }
        } else if ch == '#' || ch.is_whitespace() || "{}[]".contains(ch) {
            if !current.is_empty() {
                tokens.push(classify(&current, start.0, start.1)?);
                current.clear();
            }
            match ch {
                '#' => in_comment = true,
                '{' => tokens.push(Token::new(TokenKind::OpenQuote, line, col)),
                '}' => tokens.push(Token::new(TokenKind::CloseQuote, line, col)),
                '[' => tokens.push(Token::new(TokenKind::OpenArray, line, col)),
                ']' => tokens.push(Token::new(TokenKind::CloseArray, line, col)),
                _ => {}
            }
        } else {
            if current.is_empty() {
                start = (line, col);
            }
            current.push(ch);
        }

        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    if !current.is_empty() {
        tokens.push(classify(&current, start.0, start.1)?);
    }

    check_balance(&tokens)?;
    Ok(tokens)
}

fn classify(text: &str, line: usize, column: usize) -> EvalResult<Token> {
    let kind = if let Some(name) = text.strip_prefix(',') {
        if name.is_empty() {
            return Err(EvalError::parse(format!(
                "quote marker without a name at line {}, column {}",
                line, column
            )));
        }
        TokenKind::QuotedWord(name.to_string())
    } else if let Some(n) = parse_number(text) {
        TokenKind::Number(n)
    } else {
        TokenKind::Word(text.to_string())
    };
    Ok(Token::new(kind, line, column))
}

/// Parse a decimal literal: optional sign, digits, optional fraction.
///
/// Stricter than `f64::from_str`, which would also accept `inf`, `nan`
/// and exponents as numbers.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (unsigned, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    text.parse().ok()
}

fn check_balance(tokens: &[Token]) -> EvalResult<()> {
    let mut open: Vec<&Token> = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::OpenQuote | TokenKind::OpenArray => open.push(token),
            TokenKind::CloseQuote | TokenKind::CloseArray => {
                let expected = match token.kind {
                    TokenKind::CloseQuote => TokenKind::OpenQuote,
                    _ => TokenKind::OpenArray,
                };
                match open.pop() {
                    Some(opener) if opener.kind == expected => {}
                    Some(opener) => {
                        return Err(EvalError::parse(format!(
                            "'{}' at line {}, column {} does not match '{}' at line {}, column {}",
                            token, token.line, token.column, opener, opener.line, opener.column
                        )));
                    }
                    None => {
                        return Err(EvalError::parse(format!(
                            "unexpected '{}' at line {}, column {}",
                            token, token.line, token.column
                        )));
                    }
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(opener) => Err(EvalError::parse(format!(
            "unclosed '{}' at line {}, column {}",
            opener, opener.line, opener.column
        ))),
        None => Ok(()),
    }
}

/// Index of the delimiter closing the one at `open`.
///
/// Only valid on balanced token streams, which `tokenize` guarantees.
pub(crate) fn find_closing(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::OpenQuote | TokenKind::OpenArray => depth += 1,
            TokenKind::CloseQuote | TokenKind::CloseArray => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn word(name: &str) -> TokenKind {
        TokenKind::Word(name.to_string())
    }

    #[test]
    fn test_numbers_and_words() {
        assert_eq!(
            kinds("3 4 add"),
            vec![TokenKind::Number(3.0), TokenKind::Number(4.0), word("add")]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            kinds("-3 +2 0.5 .25 -.5 7."),
            vec![
                TokenKind::Number(-3.0),
                TokenKind::Number(2.0),
                TokenKind::Number(0.5),
                TokenKind::Number(0.25),
                TokenKind::Number(-0.5),
                TokenKind::Number(7.0),
            ]
        );
    }

    #[test]
    fn test_sign_only_tokens_are_words() {
        assert_eq!(
            kinds("++ -- - + ."),
            vec![word("++"), word("--"), word("-"), word("+"), word(".")]
        );
    }

    #[test]
    fn test_non_decimal_forms_are_words() {
        assert_eq!(
            kinds("inf nan 1e5 1.2.3 2x"),
            vec![word("inf"), word("nan"), word("1e5"), word("1.2.3"), word("2x")]
        );
    }

    #[test]
    fn test_quoted_word() {
        assert_eq!(
            kinds(",square"),
            vec![TokenKind::QuotedWord("square".to_string())]
        );
    }

    #[test]
    fn test_bare_comma_is_error() {
        assert!(tokenize("1 , 2").is_err());
    }

    #[test]
    fn test_comments_are_stripped() {
        assert_eq!(
            kinds("1 # the rest is ignored { [\n2"),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.0)]
        );
        assert_eq!(kinds("dup# trailing"), vec![word("dup")]);
    }

    #[test]
    fn test_delimiters_split_tokens() {
        assert_eq!(
            kinds("[1 2]{dup}"),
            vec![
                TokenKind::OpenArray,
                TokenKind::Number(1.0),
                TokenKind::Number(2.0),
                TokenKind::CloseArray,
                TokenKind::OpenQuote,
                word("dup"),
                TokenKind::CloseQuote,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("1\n  dup").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn test_unclosed_quotation() {
        let err = tokenize("{ 1 add").unwrap_err();
        assert!(err.to_string().contains("unclosed '{' at line 1, column 1"));
    }

    #[test]
    fn test_unexpected_close() {
        let err = tokenize("1 ]").unwrap_err();
        assert!(err.to_string().contains("unexpected ']'"));
    }

    #[test]
    fn test_crossed_delimiters() {
        assert!(tokenize("{ [ } ]").is_err());
    }

    #[test]
    fn test_find_closing_skips_nested() {
        let tokens = tokenize("{ 1 { 2 } [ 3 ] } 4").unwrap();
        assert_eq!(find_closing(&tokens, 0), Some(8));
        assert_eq!(find_closing(&tokens, 2), Some(4));
        assert_eq!(find_closing(&tokens, 5), Some(7));
    }
}

//! Query tokenisation and validation.

/// A token in a validated query stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Term(String),
    And,
    Or,
}

impl Token {
    fn is_operator(&self) -> bool {
        matches!(self, Token::And | Token::Or)
    }
}

/// Splits, normalises and validates a raw query line.
///
/// Returns `None` for any syntactically invalid query: a non-alphabetic
/// character in some token, an empty resulting stream, a leading/trailing
/// operator, or two adjacent operators.
///
/// Note the asymmetric length gate: tokens shorter than 3 characters are
/// dropped *unless* they are exactly the literal `or` — so `and` survives
/// naturally (it's 3 characters) while a lone `a` or `i` does not. This is
/// an intentional quirk, not a bug.
pub fn tokenize_and_validate(raw: &str) -> Option<Vec<Token>> {
    let mut normalized = Vec::new();
    for raw_token in raw.split(|c| c == ' ' || c == '\t') {
        if raw_token.is_empty() {
            continue;
        }
        let lower = raw_token.to_lowercase();
        if !lower.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        normalized.push(lower);
    }

    let mut stream: Vec<Token> = Vec::new();
    for word in normalized {
        if word.len() < 3 && word != "or" {
            continue;
        }

        let token = match word.as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            _ => Token::Term(word),
        };

        if let Token::Term(_) = &token {
            if matches!(stream.last(), Some(Token::Term(_))) {
                stream.push(Token::And);
            }
        }
        stream.push(token);
    }

    if stream.is_empty() {
        return None;
    }
    if stream.first().is_some_and(Token::is_operator) {
        return None;
    }
    if stream.last().is_some_and(Token::is_operator) {
        return None;
    }
    if stream.windows(2).any(|pair| pair[0].is_operator() && pair[1].is_operator()) {
        return None;
    }

    Some(stream)
}

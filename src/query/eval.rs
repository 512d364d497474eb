//! Boolean expression parsing and evaluation.
//!
//! A small recursive-descent parser turns a validated token stream into an
//! AST honouring `and` > `or` precedence, then a separate pass evaluates it
//! against an `Index`, combining child results fresh rather than mutating
//! shared state in place.

use super::tokenize::Token;
use crate::index::Index;
use std::collections::HashMap;

/// Boolean query AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Term(String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

/// A scored match produced during evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub doc_id: u32,
    pub score: u32,
}

/// Parses a validated token stream (see `tokenize_and_validate`) into an
/// `Expr`. The stream is assumed already validated: no leading/trailing/
/// adjacent operators.
pub fn parse(tokens: &[Token]) -> Expr {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or();
    debug_assert_eq!(parser.pos, tokens.len(), "validated stream fully consumed");
    expr
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_or(&mut self) -> Expr {
        let mut left = self.parse_and();
        while matches!(self.tokens.get(self.pos), Some(Token::Or)) {
            self.pos += 1;
            let right = self.parse_and();
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        left
    }

    fn parse_and(&mut self) -> Expr {
        let mut left = self.parse_term();
        while matches!(self.tokens.get(self.pos), Some(Token::And)) {
            self.pos += 1;
            let right = self.parse_term();
            left = Expr::And(Box::new(left), Box::new(right));
        }
        left
    }

    fn parse_term(&mut self) -> Expr {
        match self.tokens.get(self.pos) {
            Some(Token::Term(word)) => {
                self.pos += 1;
                Expr::Term(word.clone())
            }
            other => unreachable!("validated token stream cannot start a term with {other:?}"),
        }
    }
}

/// Evaluates `expr` against `index`, returning one `Hit` per matching
/// document. Order is unspecified; ranking happens downstream.
pub fn evaluate(expr: &Expr, index: &Index) -> Vec<Hit> {
    match expr {
        Expr::Term(word) => match index.get(word) {
            Some(entry) => entry
                .postings
                .iter()
                .map(|p| Hit {
                    doc_id: p.doc_id,
                    score: p.count,
                })
                .collect(),
            None => Vec::new(),
        },
        Expr::And(lhs, rhs) => and_combine(evaluate(lhs, index), evaluate(rhs, index)),
        Expr::Or(lhs, rhs) => or_combine(evaluate(lhs, index), evaluate(rhs, index)),
    }
}

/// One `Hit` per `doc_id` present in both `a` and `b`, scored `min`.
fn and_combine(a: Vec<Hit>, b: Vec<Hit>) -> Vec<Hit> {
    let b_scores: HashMap<u32, u32> = b.into_iter().map(|h| (h.doc_id, h.score)).collect();
    a.into_iter()
        .filter_map(|h| {
            b_scores.get(&h.doc_id).map(|&b_score| Hit {
                doc_id: h.doc_id,
                score: h.score.min(b_score),
            })
        })
        .collect()
}

/// One `Hit` per `doc_id` present in either `a` or `b`, scored by sum when
/// present in both.
fn or_combine(a: Vec<Hit>, b: Vec<Hit>) -> Vec<Hit> {
    let mut scores: HashMap<u32, u32> = HashMap::new();
    for h in a.into_iter().chain(b) {
        *scores.entry(h.doc_id).or_insert(0) += h.score;
    }
    scores
        .into_iter()
        .map(|(doc_id, score)| Hit { doc_id, score })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tokenize::tokenize_and_validate;

    fn corpus() -> Index {
        let mut index = Index::new();
        for _ in 0..3 {
            index.record("dartmouth", 1);
        }
        index.record("computer", 1);
        index.record("computer", 2);
        index.record("computer", 2);
        for _ in 0..5 {
            index.record("science", 2);
        }
        index
    }

    fn eval_query(raw: &str, index: &Index) -> Vec<Hit> {
        let tokens = tokenize_and_validate(raw).expect("valid query");
        let expr = parse(&tokens);
        evaluate(&expr, index)
    }

    #[test]
    fn scenario_single_term() {
        let hits = eval_query("dartmouth", &corpus());
        assert_eq!(hits, vec![Hit { doc_id: 1, score: 3 }]);
    }

    #[test]
    fn scenario_and_takes_min() {
        let hits = eval_query("dartmouth and computer", &corpus());
        assert_eq!(hits, vec![Hit { doc_id: 1, score: 1 }]);
    }

    #[test]
    fn scenario_or_takes_sum_when_shared() {
        let index = corpus();
        let hits = eval_query("dartmouth or science", &index);
        let mut sorted = hits;
        sorted.sort_by_key(|h| h.doc_id);
        assert_eq!(
            sorted,
            vec![Hit { doc_id: 1, score: 3 }, Hit { doc_id: 2, score: 5 }]
        );
    }

    #[test]
    fn scenario_implicit_and_then_or() {
        let index = corpus();
        let hits = eval_query("dartmouth computer or science", &index);
        let mut sorted = hits;
        sorted.sort_by_key(|h| h.doc_id);
        assert_eq!(
            sorted,
            vec![Hit { doc_id: 1, score: 1 }, Hit { doc_id: 2, score: 5 }]
        );
    }

    #[test]
    fn and_is_commutative() {
        let index = corpus();
        let a = eval_query("dartmouth and computer", &index);
        let b = eval_query("computer and dartmouth", &index);
        assert_eq!(a, b);
    }

    #[test]
    fn or_is_commutative() {
        let index = corpus();
        let mut a = eval_query("dartmouth or science", &index);
        let mut b = eval_query("science or dartmouth", &index);
        a.sort_by_key(|h| h.doc_id);
        b.sort_by_key(|h| h.doc_id);
        assert_eq!(a, b);
    }

    #[test]
    fn and_distributes_over_or_at_doc_id_level() {
        // a and (b or c) should match the same doc_ids as (a and b) or (a and c),
        // even though scores may differ since `min` doesn't distribute over `+`.
        let mut index = Index::new();
        index.record("alpha", 1);
        index.record("beta", 1);
        index.record("alpha", 2);
        index.record("gamma", 2);
        index.record("gamma", 3); // alpha absent from doc 3

        let lhs = eval_query("alpha and beta or alpha and gamma", &index);
        let rhs_expr = parse(&tokenize_and_validate("alpha and beta").unwrap());
        let rhs_expr2 = parse(&tokenize_and_validate("alpha and gamma").unwrap());
        let rhs = or_combine(evaluate(&rhs_expr, &index), evaluate(&rhs_expr2, &index));

        let mut lhs_ids: Vec<u32> = lhs.iter().map(|h| h.doc_id).collect();
        let mut rhs_ids: Vec<u32> = rhs.iter().map(|h| h.doc_id).collect();
        lhs_ids.sort_unstable();
        rhs_ids.sort_unstable();
        assert_eq!(lhs_ids, rhs_ids);
        assert_eq!(lhs_ids, vec![1, 2]);
    }

    #[test]
    fn missing_term_contributes_empty_result() {
        let hits = eval_query("xyz", &corpus());
        assert!(hits.is_empty());
    }
}

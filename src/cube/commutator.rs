// Commutator and conjugate expansion.
//
// [A, B] is A B A' B' and [A: B] is A B A'. A and B are move sequences that may
// contain further brackets. A bracket without a separator just groups moves.

use pest::iterators::Pair;
use pest::Parser;

use super::CubeError;

#[derive(Parser)]
#[grammar = "cube/grammars/commutator.pest"]
struct CommutatorParser;

/// Inverse of a single move token: R <-> R', half turns are their own inverse.
pub fn invert_token(token: &str) -> String {
    if let Some(base) = token.strip_suffix('\'') {
        base.to_string()
    } else if token.ends_with('2') {
        token.to_string()
    } else {
        format!("{}'", token)
    }
}

fn invert(moves: &[String]) -> Vec<String> {
    moves.iter().rev().map(|m| invert_token(m)).collect()
}

/// Expands bracket notation in a string of move tokens, returning the flat
/// space-separated sequence.
pub fn parse_comm(input: &str) -> Result<String, CubeError> {
    let root = CommutatorParser::parse(Rule::algorithm, input)
        .map_err(|e| CubeError::Parse(e.to_string()))?
        .next()
        .ok_or_else(|| CubeError::Parse("empty input".to_string()))?;

    let mut out = Vec::new();
    for pair in root.into_inner() {
        expand_into(pair, &mut out);
    }
    Ok(out.join(" "))
}

fn expand(pair: Pair<Rule>) -> Vec<String> {
    let mut out = Vec::new();
    expand_into(pair, &mut out);
    out
}

fn expand_into(pair: Pair<Rule>, out: &mut Vec<String>) {
    match pair.as_rule() {
        Rule::token => out.push(pair.as_str().to_string()),

        Rule::sequence => {
            for p in pair.into_inner() {
                expand_into(p, out);
            }
        }

        Rule::bracket => {
            let mut inner = pair.into_inner();
            let a = inner.next().map(expand).unwrap_or_default();

            match inner.next() {
                None => out.extend(a),
                Some(tail) => {
                    let commutator = tail.as_rule() == Rule::commutator_tail;
                    let b = tail.into_inner().next().map(expand).unwrap_or_default();
                    let a_inv = invert(&a);
                    let b_inv = invert(&b);

                    out.extend(a);
                    out.extend(b);
                    out.extend(a_inv);
                    if commutator {
                        out.extend(b_inv);
                    }
                }
            }
        }

        // Separators outside brackets and end of input.
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use super::{invert_token, parse_comm};
    use crate::cube::CubeError;

    #[test]
    fn test_invert_token() {
        assert_eq!(invert_token("R"), "R'");
        assert_eq!(invert_token("R'"), "R");
        assert_eq!(invert_token("R2"), "R2");
        assert_eq!(invert_token("Rw"), "Rw'");
        assert_eq!(invert_token("x2'"), "x2");
        assert_eq!(invert_token("U3"), "U3'");
    }

    #[test]
    fn test_plain_sequence() {
        assert_eq!(parse_comm("R U R' U'").unwrap(), "R U R' U'");
        assert_eq!(parse_comm("").unwrap(), "");
        assert_eq!(parse_comm("R , U : F").unwrap(), "R U F");
    }

    #[test]
    fn test_commutator() {
        assert_eq!(parse_comm("[R, U]").unwrap(), "R U R' U'");
        assert_eq!(parse_comm("[R U R', D]").unwrap(), "R U R' D R U' R' D'");
        assert_eq!(parse_comm("[R2 , U']").unwrap(), "R2 U' R2 U");
    }

    #[test]
    fn test_conjugate() {
        assert_eq!(parse_comm("[R: U]").unwrap(), "R U R'");
        assert_eq!(parse_comm("[F: [R, U]]").unwrap(), "F R U R' U' F'");
    }

    #[test]
    fn test_nesting() {
        assert_eq!(parse_comm("[[R, U], D]").unwrap(),
                   "R U R' U' D U R U' R' D'");
        assert_eq!(parse_comm("[R U] F [L]").unwrap(), "R U F L");
        assert_eq!(parse_comm("[R2 F2 U2: R2] [U': [F2, U2] F2]").unwrap(),
                   "R2 F2 U2 R2 U2 F2 R2 U' F2 U2 F2 U2 F2 U");
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(parse_comm("[R, U"), Err(CubeError::Parse(_))));
        assert!(matches!(parse_comm("R, U]"), Err(CubeError::Parse(_))));
        assert!(matches!(parse_comm("[[R, U]"), Err(CubeError::Parse(_))));
        assert!(matches!(parse_comm("[R, U, F]"), Err(CubeError::Parse(_))));
    }
}

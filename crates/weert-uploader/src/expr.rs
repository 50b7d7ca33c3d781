//! Filter expressions, compiled once at startup.
//!
//! Grammar:
//!
//! ```text
//! expr := field | field op number
//! op   := '*' | '/' | '+' | '-'
//! ```
//!
//! The scaled form covers unit conversions in the filter table, e.g.
//! `windSpeed * 0.44704` (mph to m/s). Evaluation against a packet yields
//! `None` — never an error — when the referenced field is absent or null.

use weert_common::{Error, LoopPacket, Result};

/// Arithmetic operator in a scaled expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

/// A compiled filter expression. Immutable after parse.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpr {
    field: String,
    scale: Option<(Op, f64)>,
}

impl FieldExpr {
    /// Parse an expression string.
    pub fn parse(expr: &str) -> Result<Self> {
        let text = expr.trim();
        if text.is_empty() {
            return Err(invalid(expr, "empty expression"));
        }

        let op_at = text
            .char_indices()
            .find(|&(_, c)| matches!(c, '*' | '/' | '+' | '-'));
        let Some((pos, op_char)) = op_at else {
            return Ok(Self {
                field: parse_field(expr, text)?,
                scale: None,
            });
        };

        let op = match op_char {
            '*' => Op::Mul,
            '/' => Op::Div,
            '+' => Op::Add,
            _ => Op::Sub,
        };
        let field = parse_field(expr, &text[..pos])?;
        let number: f64 = text[pos + op_char.len_utf8()..]
            .trim()
            .parse()
            .map_err(|_| invalid(expr, "operand is not a number"))?;
        if op == Op::Div && number == 0.0 {
            return Err(invalid(expr, "division by zero"));
        }
        Ok(Self {
            field,
            scale: Some((op, number)),
        })
    }

    /// The packet field this expression reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Evaluate against a packet. Absent or null fields yield `None`.
    pub fn eval(&self, packet: &LoopPacket) -> Option<f64> {
        let value = packet.get(&self.field)?;
        Some(match self.scale {
            None => value,
            Some((Op::Add, n)) => value + n,
            Some((Op::Sub, n)) => value - n,
            Some((Op::Mul, n)) => value * n,
            Some((Op::Div, n)) => value / n,
        })
    }
}

fn parse_field(expr: &str, part: &str) -> Result<String> {
    let field = part.trim();
    if field.is_empty() {
        return Err(invalid(expr, "missing field name"));
    }
    if !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(expr, "field name must be alphanumeric"));
    }
    Ok(field.to_string())
}

fn invalid(expr: &str, reason: &str) -> Error {
    Error::InvalidExpression {
        expr: expr.to_string(),
        reason: reason.to_string(),
    }
}

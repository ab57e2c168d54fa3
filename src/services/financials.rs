//! Cash verification from bank-statement text.

use crate::error::CollaboratorError;
use crate::models::subject::Subject;
use crate::services::collaborators::FinancialVerifier;
use tracing::{info, warn};

const BALANCE_QUALIFIERS: &[&str] = &["ending", "closing", "total", "current"];
const BALANCE_WORD: &str = "balance";

/// Find the first "<qualifier> balance" line item and return its amount.
///
/// The qualifier is one of ending, closing, total or current, separated from
/// "balance" by whitespace. Between "balance" and the amount only colons,
/// dashes, whitespace and a dollar sign may appear. The amount is digits with
/// optional thousands commas followed by exactly two decimal places.
pub fn parse_statement_balance(text: &str) -> Option<f64> {
    let lower = text.to_ascii_lowercase();
    let mut from = 0;
    while let Some(offset) = lower[from..].find(BALANCE_WORD) {
        let start = from + offset;
        let end = start + BALANCE_WORD.len();
        if has_qualifier(&lower[..start]) {
            if let Some(amount) = read_amount(&lower[end..]) {
                return Some(amount);
            }
        }
        from = end;
    }
    None
}

fn has_qualifier(before: &str) -> bool {
    let trimmed = before.trim_end();
    trimmed.len() < before.len() && BALANCE_QUALIFIERS.iter().any(|q| trimmed.ends_with(q))
}

fn read_amount(after: &str) -> Option<f64> {
    let rest = after.trim_start_matches(|c: char| matches!(c, ':' | '-' | '$') || c.is_whitespace());
    let integral_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ','))
        .unwrap_or(rest.len());
    let (integral, tail) = rest.split_at(integral_len);
    let cents = tail.strip_prefix('.')?.get(..2)?;
    if !cents.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: String = integral.chars().filter(|c| *c != ',').collect();
    if digits.is_empty() {
        return None;
    }
    format!("{}.{}", digits, cents).parse().ok()
}

/// Verifies cash from the text of an uploaded statement.
#[derive(Debug, Clone)]
pub struct StatementBalanceVerifier {
    statement_text: String,
}

impl StatementBalanceVerifier {
    pub fn new(statement_text: impl Into<String>) -> Self {
        Self {
            statement_text: statement_text.into(),
        }
    }
}

impl FinancialVerifier for StatementBalanceVerifier {
    fn name(&self) -> &str {
        "statement-balance"
    }

    fn verify(&self, subject: &mut Subject) -> Result<(), CollaboratorError> {
        if self.statement_text.trim().is_empty() {
            return Err(CollaboratorError::FinancialVerifier(
                "statement text is empty".to_string(),
            ));
        }

        match parse_statement_balance(&self.statement_text) {
            Some(balance) => {
                info!(subject = %subject.name, balance, "Verified cash balance from statement");
                subject.verify_financials(balance);
            }
            None => {
                warn!(subject = %subject.name, "No balance line found in statement");
            }
        }
        Ok(())
    }
}

//! Maps raw submission failures onto symbolic error codes and user copy.
//!
//! The known-code copy lives in one lookup, so the whole taxonomy is
//! visible (and testable) in a single place.

use serde_json::Value;

use crate::session::SubmissionFailure;

/// A submission failure reduced to one symbolic code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedError {
    /// The request never reached the ledger gateway.
    Client(String),
    /// Transaction-level result code, verbatim.
    Transaction(String),
    /// Per-operation result code (offers carry exactly one operation).
    Operation(String),
    /// The failure payload itself could not be understood.
    UnknownResponse(String),
}

impl ClassifiedError {
    /// The symbolic `errorType` string the terminal renders and logs.
    pub fn code(&self) -> String {
        match self {
            ClassifiedError::Client(message) => format!("clientError - {}", message),
            ClassifiedError::Transaction(code) | ClassifiedError::Operation(code) => code.clone(),
            ClassifiedError::UnknownResponse(message) => {
                format!("unknownResponse - {}", message)
            }
        }
    }

    /// Dedicated copy for the known result codes; `None` falls through to
    /// the generic presentation.
    pub fn known_copy(&self) -> Option<&'static str> {
        let code = match self {
            ClassifiedError::Transaction(code) | ClassifiedError::Operation(code) => code.as_str(),
            _ => return None,
        };
        match code {
            "buy_not_authorized" => Some(
                "Unable to create offer because the issuer has not authorized you to trade \
                 this asset. To fix this issue, check with the issuer's website.",
            ),
            "op_low_reserve" => Some(
                "Your account does not have enough XLM to meet the minimum balance. Send at \
                 least 1 XLM to your account, cancel an existing offer, or decrease your \
                 minimum balance by unaccepting an asset.",
            ),
            "tx_bad_seq" => Some(
                "Transaction failed because sequence got out of sync. Please reload the \
                 terminal and try again.",
            ),
            "op_underfunded" => Some("Transaction failed due to a lack of funds."),
            _ => None,
        }
    }

    /// Copy for the overview pane: dedicated text for known codes, the
    /// generic "failed, code: X" line otherwise.
    pub fn user_message(&self) -> String {
        match self.known_copy() {
            Some(copy) => copy.to_string(),
            None => format!("Failed to create offer. Error code: {}", self.code()),
        }
    }
}

/// Classify a raw failure; checks run in order and the first match wins.
pub fn classify(failure: &SubmissionFailure) -> ClassifiedError {
    let Some(data) = &failure.data else {
        return ClassifiedError::Client(failure.message.clone());
    };
    inspect(data).unwrap_or_else(|| {
        tracing::warn!(message = %failure.message, "unrecognized failure payload");
        ClassifiedError::UnknownResponse(failure.message.clone())
    })
}

/// Walks `data.extras.result_codes`. `None` for any shape the gateway is
/// not supposed to send — the caller treats that as an unknown response
/// instead of crashing on a malformed payload.
fn inspect(data: &Value) -> Option<ClassifiedError> {
    let result_codes = data.get("extras")?.get("result_codes")?;
    match result_codes.get("operations") {
        None | Some(Value::Null) => {
            let transaction = result_codes.get("transaction")?.as_str()?;
            Some(ClassifiedError::Transaction(transaction.to_string()))
        }
        Some(operations) => {
            let first = operations.as_array()?.first()?.as_str()?;
            Some(ClassifiedError::Operation(first.to_string()))
        }
    }
}

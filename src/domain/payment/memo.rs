//! Memo types and validation for outgoing payments.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MemoType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "MEMO_ID")]
    Id,
    #[serde(rename = "MEMO_TEXT")]
    Text,
    #[serde(rename = "MEMO_HASH")]
    Hash,
    #[serde(rename = "MEMO_RETURN")]
    Return,
}

impl MemoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoType::None => "none",
            MemoType::Id => "MEMO_ID",
            MemoType::Text => "MEMO_TEXT",
            MemoType::Hash => "MEMO_HASH",
            MemoType::Return => "MEMO_RETURN",
        }
    }
}

impl std::fmt::Display for MemoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of checking memo content against its type: whether the step
/// can proceed, and the message shown when it can't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoCheck {
    pub ready: bool,
    pub message: Option<String>,
}

impl MemoCheck {
    fn ok() -> Self {
        Self {
            ready: true,
            message: None,
        }
    }

    fn incomplete() -> Self {
        Self {
            ready: false,
            message: None,
        }
    }

    fn invalid(message: String) -> Self {
        Self {
            ready: false,
            message: Some(message),
        }
    }
}

pub fn validate_memo(memo_type: MemoType, content: &str) -> MemoCheck {
    match memo_type {
        MemoType::None => MemoCheck::ok(),
        MemoType::Id => {
            if content.is_empty() {
                return MemoCheck::incomplete();
            }
            match content.parse::<u64>() {
                Ok(_) => MemoCheck::ok(),
                Err(_) => MemoCheck::invalid("MEMO_ID only accepts a positive integer.".into()),
            }
        }
        MemoType::Text => {
            if content.is_empty() {
                return MemoCheck::incomplete();
            }
            let bytes = content.len();
            if bytes <= 28 {
                MemoCheck::ok()
            } else {
                MemoCheck::invalid(format!(
                    "MEMO_TEXT accepts a string of up to 28 bytes. {} bytes entered.",
                    bytes
                ))
            }
        }
        MemoType::Hash | MemoType::Return => {
            if content.is_empty() {
                return MemoCheck::incomplete();
            }
            let hex = content.len() == 64 && content.bytes().all(|b| b.is_ascii_hexdigit());
            if hex {
                MemoCheck::ok()
            } else {
                MemoCheck::invalid(format!(
                    "{} accepts a 64 character hexadecimal encoded string. {} characters entered.",
                    memo_type,
                    content.len()
                ))
            }
        }
    }
}

use std::fmt;

/// Classified failure for a single contract interaction.
///
/// Every error surfaced to the user falls into one of these buckets; the
/// result panel renders the kind alongside the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The request never made sense (malformed amount, missing address, ...).
    BadInput(String),
    /// Transport or node-side problem; retrying later may help.
    Network(String),
    /// The RPC deadline elapsed before the node answered.
    Timeout(String),
    /// The contract rejected the call or the transaction reverted.
    Revert(String),
}

impl Failure {
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::BadInput(_) => "bad input",
            Failure::Network(_) => "network error",
            Failure::Timeout(_) => "rpc timeout",
            Failure::Revert(_) => "contract revert",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Failure::BadInput(m)
            | Failure::Network(m)
            | Failure::Timeout(m)
            | Failure::Revert(m) => m,
        }
    }

    /// Classify a raw RPC error by its message. Revert reasons come back from
    /// the node as error strings containing "revert"; anything else that made
    /// it onto the wire is a network-level problem.
    pub fn from_rpc(what: &str, err: impl fmt::Display) -> Failure {
        let msg = err.to_string();
        let lowered = msg.to_lowercase();
        if lowered.contains("revert") {
            Failure::Revert(format!("{what}: {msg}"))
        } else if lowered.contains("timed out") || lowered.contains("timeout") {
            Failure::Timeout(format!("{what}: {msg}"))
        } else {
            Failure::Network(format!("{what}: {msg}"))
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for Failure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_revert() {
        let f = Failure::from_rpc("buyInsurance", "VM Exception: revert insufficient funds");
        assert!(matches!(f, Failure::Revert(_)));
        assert_eq!(f.kind(), "contract revert");
    }

    #[test]
    fn test_classify_execution_reverted() {
        let f = Failure::from_rpc("call", "execution reverted: not operational");
        assert!(matches!(f, Failure::Revert(_)));
    }

    #[test]
    fn test_classify_timeout() {
        let f = Failure::from_rpc("eth_call", "request timed out");
        assert!(matches!(f, Failure::Timeout(_)));
    }

    #[test]
    fn test_classify_network() {
        let f = Failure::from_rpc("eth_accounts", "connection refused");
        assert!(matches!(f, Failure::Network(_)));
        assert!(f.message().contains("eth_accounts"));
    }

    #[test]
    fn test_display_includes_kind() {
        let f = Failure::BadInput("amount must be positive".to_string());
        assert_eq!(f.to_string(), "bad input: amount must be positive");
    }
}

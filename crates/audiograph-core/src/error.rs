use thiserror::Error;

/// Misconfiguration of a pass chain, detected before the first render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("pass chain has no terminal pass")]
    NoTerminal,
    #[error("pass chain has {count} terminal passes, expected exactly one")]
    MultipleTerminals { count: usize },
    #[error("terminal pass `{label}` is at index {index}, expected the last position")]
    TerminalNotLast { label: String, index: usize },
}

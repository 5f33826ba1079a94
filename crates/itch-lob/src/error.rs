//! Error types for book mutations.

use itch_core::types::{OrderRef, Volume};
use thiserror::Error;

/// A rejected book mutation.
///
/// The book state is unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// An order with this reference is already live
    #[error("duplicate order reference {0}")]
    DuplicateRef(OrderRef),

    /// No live order carries this reference
    #[error("unknown order reference {0}")]
    UnknownRef(OrderRef),

    /// Execution for more shares than the order has remaining
    #[error("over-executed order {reference}: requested {requested}, remaining {remaining}")]
    OverExecuted {
        /// Order reference
        reference: OrderRef,
        /// Shares the message asked to execute
        requested: Volume,
        /// Shares actually remaining
        remaining: Volume,
    },

    /// Cancel for more shares than the order has remaining
    #[error("over-cancelled order {reference}: requested {requested}, remaining {remaining}")]
    OverCancelled {
        /// Order reference
        reference: OrderRef,
        /// Shares the message asked to cancel
        requested: Volume,
        /// Shares actually remaining
        remaining: Volume,
    },

    /// Internal structures disagree; the book can no longer be trusted
    #[error("book inconsistency: {0}")]
    Inconsistent(&'static str),
}

/// Result type for book operations
pub type BookResult<T> = Result<T, BookError>;

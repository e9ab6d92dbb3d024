//! # Domain Invariants
//!
//! Structural invariants that MUST hold for every state tree the reducer
//! produces:
//!
//! - INVARIANT-1: a method record never holds `result` and `error` at once.
//! - INVARIANT-2: a created contract always has an address.
//! - INVARIANT-3: a pending deploy (`new` record with a transaction hash)
//!   never coexists with `created = true`.

use crate::domain::entities::{ContractsState, MethodRecord, NEW_METHOD};
use std::fmt;

// =============================================================================
// VIOLATIONS
// =============================================================================

/// A detected invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// INVARIANT-1: `result` and `error` are both set on one method record.
    ResultErrorOverlap {
        /// Contract name.
        contract: String,
        /// Method name.
        method: String,
    },
    /// INVARIANT-2: `created` is true but no address is recorded.
    CreatedWithoutAddress {
        /// Contract name.
        contract: String,
    },
    /// INVARIANT-3: a pending deploy coexists with `created = true`.
    PendingWhileCreated {
        /// Contract name.
        contract: String,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResultErrorOverlap { contract, method } => {
                write!(f, "{contract}.{method}: result and error both set")
            }
            Self::CreatedWithoutAddress { contract } => {
                write!(f, "{contract}: created without an address")
            }
            Self::PendingWhileCreated { contract } => {
                write!(f, "{contract}: pending deploy on a created contract")
            }
        }
    }
}

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: `result` and `error` are mutually exclusive.
#[must_use]
pub fn check_result_error_exclusive(record: &MethodRecord) -> bool {
    record.result.is_none() || record.error.is_none()
}

/// Checks the whole state tree; returns every violation found.
///
/// An empty vector means the tree is well-formed.
#[must_use]
pub fn check_state_invariants(state: &ContractsState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (contract, record) in state {
        for (method, method_record) in &record.methods {
            if !check_result_error_exclusive(method_record) {
                violations.push(InvariantViolation::ResultErrorOverlap {
                    contract: contract.clone(),
                    method: method.clone(),
                });
            }
        }

        if record.created && record.address.is_none() {
            violations.push(InvariantViolation::CreatedWithoutAddress {
                contract: contract.clone(),
            });
        }

        let pending = record
            .methods
            .get(NEW_METHOD)
            .is_some_and(|new_record| new_record.transaction_hash.is_some());
        if pending && record.created {
            violations.push(InvariantViolation::PendingWhileCreated {
                contract: contract.clone(),
            });
        }
    }

    violations
}

// =============================================================================
// TESTS
// =============================================================================

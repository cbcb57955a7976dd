//! Value objects for the Record Store

use serde::{Deserialize, Serialize};
use shared_types::Record;

/// Result of a successful `update`: the record before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryChange {
    /// Record as it was before the update.
    pub before: Record,
    /// Record as it is now stored.
    pub after: Record,
}

impl SalaryChange {
    pub fn old_salary(&self) -> u32 {
        self.before.salary
    }

    pub fn new_salary(&self) -> u32 {
        self.after.salary
    }
}

//! Append-only pool of sub-tour elimination cuts.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::Cut;
use crate::formulation::LinearConstraint;

#[derive(Debug, Default)]
struct PoolState {
    cuts: Vec<Cut>,
    members: HashSet<Vec<usize>>,
}

/// Cuts found during one solve.
///
/// Owned by the solving session and shared by reference with every
/// callback invocation. Appends are a single critical section, so a driver
/// may dispatch callbacks from several threads. Cuts are never removed, and
/// a component already in the pool is not added twice.
///
/// # Examples
///
/// ```
/// use u_vrptw::formulation::VarLayout;
/// use u_vrptw::separation::{Cut, CutPool};
///
/// let layout = VarLayout::new(4);
/// let pool = CutPool::new();
/// assert_eq!(pool.append(&[Cut::subtour(&layout, vec![1, 2])]), 1);
/// assert_eq!(pool.append(&[Cut::subtour(&layout, vec![2, 1])]), 0);
/// assert_eq!(pool.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CutPool {
    state: Mutex<PoolState>,
}

impl CutPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the cuts whose component is not yet pooled and returns how many
    /// were stored.
    ///
    /// Deduplication only affects storage: a caller separating a candidate
    /// must still reject it with every cut it violates.
    pub fn append(&self, cuts: &[Cut]) -> usize {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut added = 0;
        for cut in cuts {
            if state.members.insert(cut.members().to_vec()) {
                state.cuts.push(cut.clone());
                added += 1;
            }
        }
        if added > 0 {
            debug!(
                component = "separation",
                operation = "pool_append",
                added = added as u64,
                total = state.cuts.len() as u64,
                "Appended sub-tour cuts"
            );
        }
        added
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every pooled cut, oldest first.
    pub fn snapshot(&self) -> Vec<Cut> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).cuts.clone()
    }

    /// Constraints of every pooled cut, oldest first.
    pub fn constraints(&self) -> Vec<LinearConstraint> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cuts
            .iter()
            .map(|cut| cut.constraint().clone())
            .collect()
    }
}

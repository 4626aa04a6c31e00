//! Current-set / target-set reconciliation for dependent resources
//! (user roles, event participants).

/// Insertion-ordered edit buffer over a dependent-resource id set.
///
/// `current` is the server-confirmed membership fetched when the modal
/// opened; `target` starts equal to it and is mutated by toggles until
/// submit. The first target element is the primary dependent resource
/// carried in the parent entity request.
#[derive(Debug, Clone)]
pub struct SetDraft<I> {
    current: Vec<I>,
    target: Vec<I>,
    min_members: usize,
}

impl<I: Copy + Eq> SetDraft<I> {
    pub fn from_current(current: Vec<I>, min_members: usize) -> Self {
        let target = current.clone();
        Self {
            current,
            target,
            min_members,
        }
    }

    pub fn empty(min_members: usize) -> Self {
        Self::from_current(Vec::new(), min_members)
    }

    pub fn current(&self) -> &[I] {
        &self.current
    }

    pub fn target(&self) -> &[I] {
        &self.target
    }

    pub fn contains(&self, id: I) -> bool {
        self.target.contains(&id)
    }

    /// First target element, in toggle insertion order.
    pub fn primary(&self) -> Option<I> {
        self.target.first().copied()
    }

    /// Flips membership of `id` in the target set. Removing a member below
    /// the relation's minimum cardinality is a no-op. Returns whether the
    /// target changed.
    pub fn toggle(&mut self, id: I) -> bool {
        if let Some(position) = self.target.iter().position(|member| *member == id) {
            if self.target.len() <= self.min_members {
                return false;
            }
            self.target.remove(position);
        } else {
            self.target.push(id);
        }
        true
    }

    /// Plan for an existing parent entity: attach everything the server
    /// does not have yet, detach everything the user dropped. The two id
    /// sets never overlap.
    pub fn plan_update(&self) -> SubmitPlan<I> {
        let attach = self
            .target
            .iter()
            .copied()
            .filter(|id| !self.current.contains(id))
            .collect();
        let detach = self
            .current
            .iter()
            .copied()
            .filter(|id| !self.target.contains(id))
            .collect();
        SubmitPlan {
            primary: self.primary(),
            attach,
            detach,
        }
    }

    /// Plan for a parent entity that does not exist yet: the primary id
    /// rides in the create body and establishes its relation there, so it
    /// must not be attached a second time.
    pub fn plan_create(&self) -> SubmitPlan<I> {
        SubmitPlan {
            primary: self.primary(),
            attach: self.target.iter().skip(1).copied().collect(),
            detach: Vec::new(),
        }
    }
}

/// Minimal request set converging server state to the target set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPlan<I> {
    pub primary: Option<I>,
    pub attach: Vec<I>,
    pub detach: Vec<I>,
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;

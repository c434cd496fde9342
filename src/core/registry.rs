//! # Task registry - arena of registered tasks plus lifecycle sets.
//!
//! The registry is the scheduler's bookkeeping. It knows nothing about hooks or
//! events; it only keeps state and set membership consistent:
//!
//! ```text
//! slots[index] ──► Entry { task, name, priority, state, epoch, pending }
//!      │
//!      ├─ names      : name → TaskId        (non-empty names only, unique)
//!      ├─ registered : TaskId…              (registration order)
//!      ├─ active     : TaskId…              (activation order, sorted on rebuild)
//!      └─ paused     : TaskId…
//! ```
//!
//! ## Rules
//! - `state == Active` ⇔ id ∈ `active` ∧ id ∉ `paused`
//! - `state == Paused` ⇔ id ∈ `paused` ∧ id ∉ `active`
//! - every live slot is in `registered`; every named live slot is in `names`
//! - mutators assume the caller already validated the transition

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::core::handle::{SchedulerId, TaskId};
use crate::error::SchedulerError;
use crate::tasks::{Hook, Priority, Task, TaskState};

/// Bookkeeping for one registered task.
pub(crate) struct Entry {
    /// Task behavior; `None` while one of its hooks is running.
    pub task: Option<Box<dyn Task>>,
    pub name: Arc<str>,
    pub priority: Priority,
    pub state: TaskState,
    /// Changes every time the task (re)enters `Active`.
    pub epoch: u64,
    pub executions: u64,
    /// Hooks addressed to the task while it was checked out.
    pub pending: VecDeque<Hook>,
}

impl Entry {
    /// Name for messages; anonymous tasks fall back to their handle.
    pub fn label(&self, id: TaskId) -> String {
        if self.name.is_empty() {
            id.to_string()
        } else {
            self.name.to_string()
        }
    }

    #[inline]
    pub fn is_checked_out(&self) -> bool {
        self.task.is_none()
    }
}

struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Arena and lifecycle sets of one scheduler.
pub(crate) struct Registry {
    owner: SchedulerId,
    slots: Vec<Slot>,
    free: Vec<u32>,
    names: HashMap<Arc<str>, TaskId>,
    registered: Vec<TaskId>,
    active: Vec<TaskId>,
    paused: Vec<TaskId>,
    next_epoch: u64,
}

impl Registry {
    pub fn new(owner: SchedulerId, capacity: usize) -> Self {
        Self {
            owner,
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            names: HashMap::with_capacity(capacity),
            registered: Vec::with_capacity(capacity),
            active: Vec::with_capacity(capacity),
            paused: Vec::new(),
            next_epoch: 0,
        }
    }

    /// Moves a task into the arena.
    ///
    /// The name is checked before anything is allocated, so a conflict leaves the
    /// registry untouched.
    pub fn insert(&mut self, task: Box<dyn Task>) -> Result<TaskId, SchedulerError> {
        let name: Arc<str> = Arc::from(task.name());
        if !name.is_empty() && self.names.contains_key(&name) {
            return Err(SchedulerError::NameConflict {
                name: name.to_string(),
            });
        }

        let entry = Entry {
            priority: task.priority(),
            task: Some(task),
            name: Arc::clone(&name),
            state: TaskState::Registered,
            epoch: 0,
            executions: 0,
            pending: VecDeque::new(),
        };

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entry = Some(entry);
                TaskId {
                    scheduler: self.owner,
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                TaskId {
                    scheduler: self.owner,
                    index,
                    generation: 0,
                }
            }
        };

        if !name.is_empty() {
            self.names.insert(name, id);
        }
        self.registered.push(id);
        Ok(id)
    }

    /// Removes a registered task from every set and vacates its slot.
    ///
    /// Callers terminate the task first; the returned entry is `Registered`.
    pub fn remove(&mut self, id: TaskId) -> Option<Entry> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        if !entry.name.is_empty() {
            self.names.remove(&entry.name);
        }
        self.registered.retain(|t| *t != id);
        self.active.retain(|t| *t != id);
        self.paused.retain(|t| *t != id);
        Some(entry)
    }

    /// Resolves a handle issued by this registry.
    pub fn get(&self, id: TaskId) -> Option<&Entry> {
        if id.scheduler != self.owner {
            return None;
        }
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_ref()
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Entry> {
        if id.scheduler != self.owner {
            return None;
        }
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Like [`get`](Self::get) but explains why a handle does not resolve.
    pub fn resolve(&self, id: TaskId) -> Result<&Entry, SchedulerError> {
        if id.scheduler != self.owner {
            return Err(SchedulerError::Ownership {
                task: id.to_string(),
                owner: Some(id.scheduler),
            });
        }
        self.get(id).ok_or_else(|| SchedulerError::Ownership {
            task: id.to_string(),
            owner: None,
        })
    }

    /// Current state; stale or foreign handles read as `Unregistered`.
    pub fn state(&self, id: TaskId) -> TaskState {
        self.get(id)
            .map(|e| e.state)
            .unwrap_or(TaskState::Unregistered)
    }

    pub fn lookup(&self, name: &str) -> Option<TaskId> {
        if name.is_empty() {
            return None;
        }
        self.names.get(name).copied()
    }

    /// `Registered → Active`, appended to the active set.
    pub fn activate(&mut self, id: TaskId) {
        let epoch = self.bump_epoch();
        if let Some(entry) = self.get_mut(id) {
            entry.state = TaskState::Active;
            entry.epoch = epoch;
            self.active.push(id);
        }
    }

    /// `Active → Paused`.
    pub fn pause(&mut self, id: TaskId) {
        if let Some(entry) = self.get_mut(id) {
            entry.state = TaskState::Paused;
            self.active.retain(|t| *t != id);
            self.paused.push(id);
        }
    }

    /// `Paused → Active`, appended to the active set.
    pub fn resume(&mut self, id: TaskId) {
        let epoch = self.bump_epoch();
        if let Some(entry) = self.get_mut(id) {
            entry.state = TaskState::Active;
            entry.epoch = epoch;
            self.paused.retain(|t| *t != id);
            self.active.push(id);
        }
    }

    /// `Active | Paused → Registered`. Returns the state the task left.
    pub fn terminate(&mut self, id: TaskId) -> Option<TaskState> {
        let entry = self.get_mut(id)?;
        let previous = entry.state;
        entry.state = TaskState::Registered;
        match previous {
            TaskState::Active => self.active.retain(|t| *t != id),
            TaskState::Paused => self.paused.retain(|t| *t != id),
            _ => {}
        }
        Some(previous)
    }

    /// True while the task is Active and has not left `Active` since `epoch`.
    #[inline]
    pub fn is_live(&self, id: TaskId, epoch: u64) -> bool {
        self.get(id)
            .is_some_and(|e| e.state == TaskState::Active && e.epoch == epoch)
    }

    pub fn active(&self) -> &[TaskId] {
        &self.active
    }

    /// Stably reorders the active set; equal elements keep their relative order.
    pub fn sort_active<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Entry, &Entry) -> Ordering,
    {
        let slots = &self.slots;
        let entry = |id: &TaskId| slots[id.index as usize].entry.as_ref();
        self.active.sort_by(|a, b| match (entry(a), entry(b)) {
            (Some(a), Some(b)) => compare(a, b),
            _ => Ordering::Equal,
        });
    }

    pub fn paused(&self) -> &[TaskId] {
        &self.paused
    }

    pub fn registered(&self) -> &[TaskId] {
        &self.registered
    }

    pub fn named_count(&self) -> usize {
        self.names.len()
    }

    fn bump_epoch(&mut self) -> u64 {
        self.next_epoch += 1;
        self.next_epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;
    use crate::error::TaskError;

    struct Named(&'static str, Priority);

    impl Task for Named {
        fn name(&self) -> &str {
            self.0
        }
        fn priority(&self) -> Priority {
            self.1
        }
        fn on_activate(&mut self, _: &mut Context<'_>) -> Result<(), TaskError> {
            Ok(())
        }
        fn on_terminate(&mut self, _: &mut Context<'_>) -> Result<(), TaskError> {
            Ok(())
        }
        fn execute(&mut self, _: &mut Context<'_>) -> Result<(), TaskError> {
            Ok(())
        }
    }

    fn registry() -> Registry {
        Registry::new(SchedulerId::next(), 4)
    }

    #[test]
    fn test_insert_indexes_names() {
        let mut reg = registry();
        let a = reg.insert(Box::new(Named("a", 1))).unwrap();
        let anon = reg.insert(Box::new(Named("", 2))).unwrap();

        assert_eq!(reg.lookup("a"), Some(a));
        assert_eq!(reg.lookup(""), None);
        assert_eq!(reg.named_count(), 1);
        assert_eq!(reg.registered(), &[a, anon]);
        assert_eq!(reg.state(a), TaskState::Registered);
        assert_eq!(reg.get(a).unwrap().priority, 1);
    }

    #[test]
    fn test_name_conflict_leaves_registry_untouched() {
        let mut reg = registry();
        let a = reg.insert(Box::new(Named("a", 1))).unwrap();
        let err = reg.insert(Box::new(Named("a", 5))).unwrap_err();

        assert!(matches!(err, SchedulerError::NameConflict { ref name } if name == "a"));
        assert_eq!(reg.registered(), &[a]);
        assert_eq!(reg.lookup("a"), Some(a));
    }

    #[test]
    fn test_removed_slot_is_reused_with_new_generation() {
        let mut reg = registry();
        let a = reg.insert(Box::new(Named("a", 1))).unwrap();
        assert!(reg.remove(a).is_some());
        assert!(reg.get(a).is_none());
        assert_eq!(reg.state(a), TaskState::Unregistered);

        let b = reg.insert(Box::new(Named("b", 1))).unwrap();
        assert_eq!(b.index, a.index);
        assert_ne!(b.generation, a.generation);
        assert!(reg.get(a).is_none());
        assert!(reg.remove(a).is_none());
    }

    #[test]
    fn test_set_membership_follows_state() {
        let mut reg = registry();
        let a = reg.insert(Box::new(Named("a", 1))).unwrap();

        reg.activate(a);
        assert_eq!(reg.active(), &[a]);
        let first_epoch = reg.get(a).unwrap().epoch;
        assert!(reg.is_live(a, first_epoch));

        reg.pause(a);
        assert!(reg.active().is_empty());
        assert_eq!(reg.paused(), &[a]);
        assert!(!reg.is_live(a, first_epoch));

        reg.resume(a);
        assert_eq!(reg.active(), &[a]);
        assert!(reg.paused().is_empty());
        assert!(!reg.is_live(a, first_epoch));

        assert_eq!(reg.terminate(a), Some(TaskState::Active));
        assert!(reg.active().is_empty());
        assert_eq!(reg.state(a), TaskState::Registered);
    }

    #[test]
    fn test_foreign_handle_does_not_resolve() {
        let mut one = registry();
        let other = registry();
        let a = one.insert(Box::new(Named("a", 1))).unwrap();

        assert!(other.get(a).is_none());
        assert!(matches!(
            other.resolve(a),
            Err(SchedulerError::Ownership { owner: Some(_), .. })
        ));
    }
}

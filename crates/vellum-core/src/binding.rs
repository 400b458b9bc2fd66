//! Single-source-of-truth model with change notification.
//!
//! A [`Model`] owns one value and a list of `on_change` listeners. Setting a
//! value that is structurally equal to the current one is a no-op and emits
//! nothing, which is what keeps mirrored views from echoing changes back.

use std::fmt;

/// A change notification.
#[derive(Debug)]
pub struct Change<'a, T> {
    /// Model name
    pub name: &'a str,
    /// New value
    pub value: &'a T,
    /// Previous value
    pub old: &'a T,
}

/// Handle returned by [`Model::on_change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

type Listener<T> = Box<dyn FnMut(&Change<'_, T>)>;

/// Observable value holder.
pub struct Model<T> {
    name: String,
    value: T,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
}

impl<T: Clone + PartialEq> Model<T> {
    /// Create a named model.
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the value. Returns false (and notifies nobody) if unchanged.
    pub fn set(&mut self, value: T) -> bool {
        if value == self.value {
            return false;
        }
        let old = std::mem::replace(&mut self.value, value);
        self.notify(&old);
        true
    }

    /// Mutate in place. Listeners fire only if the value actually changed.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next)
    }

    /// Register a change listener.
    pub fn on_change<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change<'_, T>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    /// Drop all listeners.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Number of listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, old: &T) {
        let change = Change {
            name: &self.name,
            value: &self.value,
            old,
        };
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
        tracing::trace!(model = %self.name, listeners = self.listeners.len(), "model changed");
    }
}

impl<T: Clone + PartialEq + Default> Default for Model<T> {
    fn default() -> Self {
        Self::new("model", T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Model<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

use crate::models::GeometryEventKind;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Observer {
    label: String,
    kind: GeometryEventKind,
}

/// Move/resize subscriptions keyed by window label.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    next: u64,
    observers: BTreeMap<ObserverToken, Observer>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, label: &str, kind: GeometryEventKind) -> ObserverToken {
        self.next = self.next.wrapping_add(1);
        let token = ObserverToken(self.next);
        self.observers.insert(
            token,
            Observer {
                label: label.to_string(),
                kind,
            },
        );
        token
    }

    /// Returns false if the token was already removed.
    pub fn remove(&mut self, token: ObserverToken) -> bool {
        self.observers.remove(&token).is_some()
    }

    pub fn is_observing(&self, label: &str, kind: GeometryEventKind) -> bool {
        self.observers
            .values()
            .any(|o| o.label == label && o.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

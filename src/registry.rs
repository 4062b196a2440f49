//! Routing-key to limiter map, built once at startup.
//! Used by: admission, sweeper, state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Rules;
use crate::limiter::Limiter;

/// Immutable after construction: limiters mutate their own records, but no
/// routing key is ever added or removed, so lookups need no lock.
pub struct Registry {
    limiters: HashMap<String, Arc<Limiter>>,
}

impl Registry {
    /// Expand each rule into one limiter per listed key. Rules are applied
    /// in order; a later rule that names an already-registered key replaces
    /// the earlier limiter (last-registered-wins).
    pub fn from_rules(rules: &Rules) -> Self {
        let mut limiters = HashMap::new();
        for rule in rules.as_slice() {
            for key in rule.keys() {
                limiters.insert(key.clone(), Arc::new(Limiter::new(rule.limit, rule.window())));
            }
        }
        Self { limiters }
    }

    /// Ordered routing-key resolution: client IP first, endpoint path second.
    /// `None` means no rule governs the request and it passes through
    /// unthrottled.
    pub fn resolve(&self, ip: &str, path: &str) -> Option<&Arc<Limiter>> {
        self.limiters.get(ip).or_else(|| self.limiters.get(path))
    }

    pub fn limiters(&self) -> impl Iterator<Item = &Arc<Limiter>> {
        self.limiters.values()
    }

    pub fn len(&self) -> usize {
        self.limiters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiters.is_empty()
    }
}

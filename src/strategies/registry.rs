//! Ordered registry of search strategies

use super::traits::Strategy;
use std::sync::Arc;

/// Strategies in the order they are tried; earlier ones are preferred
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn Strategy>>,
}

impl StrategyRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy to the end of the chain. A strategy with a name
    /// that is already registered replaces the earlier one in place.
    pub fn register(&mut self, strategy: Arc<dyn Strategy>) {
        match self
            .strategies
            .iter()
            .position(|s| s.name() == strategy.name())
        {
            Some(index) => self.strategies[index] = strategy,
            None => self.strategies.push(strategy),
        }
    }

    /// Iterate strategies in declared order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Strategy>> {
        self.strategies.iter()
    }

    /// All strategy names, in declared order
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

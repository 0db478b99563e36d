//! Element value wrapping - transform values before caching, rebuild after

mod element;
mod strategy;

pub use element::{ElementWrapper, ValueWrapper, WrapState};
pub use strategy::{CloneStrategy, Detach, DetachStrategy, JsonStrategy, WrapStrategy};

/// Wrapper keeping the value as-is
pub type CloneWrapper<V> = ElementWrapper<CloneStrategy<V>>;

/// Wrapper keeping the value as JSON text
pub type JsonWrapper<V> = ElementWrapper<JsonStrategy<V>>;

/// Wrapper dropping non-cacheable parts of the value
pub type DetachWrapper<V> = ElementWrapper<DetachStrategy<V>>;

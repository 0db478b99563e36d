//! One-shot value wrapper enforcing the wrap-then-reconstruct lifecycle

use std::fmt;

use serde::{Deserialize, Serialize};

use super::strategy::WrapStrategy;
use crate::domain::CacheError;

/// Wraps a value before caching and rebuilds it after retrieval
///
/// `wrap` may succeed at most once per instance; `reconstruct` is only valid
/// once wrapped and may be called any number of times.
pub trait ValueWrapper<V> {
    /// Transforms `value` into the wrapper's internal state
    fn wrap(&mut self, value: V) -> Result<(), CacheError>;

    /// Rebuilds a value from the internal state
    fn reconstruct(&self) -> Result<V, CacheError>;

    fn is_wrapped(&self) -> bool;
}

/// Lifecycle of a wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "stored", rename_all = "snake_case")]
pub enum WrapState<T> {
    #[default]
    Unwrapped,
    Wrapped(T),
}

impl<T> WrapState<T> {
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped(_))
    }

    pub fn stored(&self) -> Option<&T> {
        match self {
            Self::Wrapped(stored) => Some(stored),
            Self::Unwrapped => None,
        }
    }
}

/// Value wrapper delegating the transformation to a [`WrapStrategy`]
///
/// Serializes as its lifecycle state only, so a wrapped instance can be put
/// in a distant cache tier and reconstructed after it is read back.
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "S::Stored: Serialize",
    deserialize = "S: Default, S::Stored: Deserialize<'de>"
))]
pub struct ElementWrapper<S: WrapStrategy> {
    #[serde(skip)]
    strategy: S,
    state: WrapState<S::Stored>,
}

impl<S: WrapStrategy + Default> ElementWrapper<S> {
    /// Creates an unwrapped instance
    pub fn new() -> Self {
        Self::with_strategy(S::default())
    }

    /// Creates an instance and wraps `value` right away
    pub fn wrapped(value: S::Value) -> Result<Self, CacheError> {
        let mut wrapper = Self::new();
        wrapper.wrap(value)?;
        Ok(wrapper)
    }
}

impl<S: WrapStrategy> ElementWrapper<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy,
            state: WrapState::Unwrapped,
        }
    }

    pub fn state(&self) -> &WrapState<S::Stored> {
        &self.state
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

impl<S: WrapStrategy + Default> Default for ElementWrapper<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: WrapStrategy> ValueWrapper<S::Value> for ElementWrapper<S> {
    fn wrap(&mut self, value: S::Value) -> Result<(), CacheError> {
        if self.state.is_wrapped() {
            tracing::warn!("Rejected second wrap of element value");
            return Err(CacheError::invalid_state("wrapping should happen only once"));
        }

        let stored = self.strategy.wrap(value)?;
        self.state = WrapState::Wrapped(stored);

        tracing::debug!("Wrapped element value");
        Ok(())
    }

    fn reconstruct(&self) -> Result<S::Value, CacheError> {
        match &self.state {
            WrapState::Wrapped(stored) => self.strategy.reconstruct(stored),
            WrapState::Unwrapped => {
                tracing::warn!("Rejected reconstruction of unwrapped element value");
                Err(CacheError::invalid_state(
                    "reconstruction can't happen before wrapping",
                ))
            }
        }
    }

    fn is_wrapped(&self) -> bool {
        self.state.is_wrapped()
    }
}

impl<S> Clone for ElementWrapper<S>
where
    S: WrapStrategy + Clone,
    S::Stored: Clone,
{
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy.clone(),
            state: self.state.clone(),
        }
    }
}

impl<S: WrapStrategy> fmt::Debug for ElementWrapper<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementWrapper")
            .field("wrapped", &self.state.is_wrapped())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wrapper::{CloneStrategy, CloneWrapper, JsonWrapper};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct CachedObject {
        id: u64,
        name: String,
    }

    fn cached_object() -> CachedObject {
        CachedObject {
            id: 7,
            name: "seven".to_string(),
        }
    }

    #[test]
    fn test_wrap() {
        let mut wrapper = CloneWrapper::<CachedObject>::new();
        assert!(!wrapper.is_wrapped());

        wrapper.wrap(cached_object()).unwrap();
        assert!(wrapper.is_wrapped());
        assert!(wrapper.state().stored().is_some());
    }

    #[test]
    fn test_reconstruct_returns_wrapped_value() {
        let mut wrapper = CloneWrapper::<CachedObject>::new();
        wrapper.wrap(cached_object()).unwrap();

        assert_eq!(wrapper.reconstruct().unwrap(), cached_object());
    }

    #[test]
    fn test_reconstruct_is_repeatable() {
        let wrapper = CloneWrapper::<CachedObject>::wrapped(cached_object()).unwrap();

        for _ in 0..3 {
            assert_eq!(wrapper.reconstruct().unwrap(), cached_object());
        }
    }

    #[test]
    fn test_wrapping_happens_only_once() {
        let mut wrapper = CloneWrapper::<CachedObject>::new();
        wrapper.wrap(cached_object()).unwrap();

        let other = CachedObject {
            id: 8,
            name: "eight".to_string(),
        };
        let err = wrapper.wrap(other).unwrap_err();

        assert!(err.is_invalid_state());
        assert_eq!(wrapper.reconstruct().unwrap(), cached_object());
    }

    #[test]
    fn test_cant_reconstruct_before_wrapping() {
        let wrapper = CloneWrapper::<CachedObject>::new();

        let err = wrapper.reconstruct().unwrap_err();
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_wrapped_instance_survives_serialization() {
        let wrapper = JsonWrapper::<CachedObject>::wrapped(cached_object()).unwrap();

        let persisted = serde_json::to_string(&wrapper).unwrap();
        let restored: JsonWrapper<CachedObject> = serde_json::from_str(&persisted).unwrap();

        assert!(restored.is_wrapped());
        assert_eq!(restored.reconstruct().unwrap(), cached_object());
    }

    #[test]
    fn test_restored_wrapper_still_rejects_second_wrap() {
        let wrapper = CloneWrapper::<CachedObject>::wrapped(cached_object()).unwrap();
        let persisted = serde_json::to_string(&wrapper).unwrap();

        let mut restored: CloneWrapper<CachedObject> = serde_json::from_str(&persisted).unwrap();
        assert!(restored.wrap(cached_object()).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_unwrapped_instance_serializes_state_tag() {
        let wrapper = CloneWrapper::<CachedObject>::new();

        let json = serde_json::to_value(&wrapper).unwrap();
        assert_eq!(json, serde_json::json!({ "state": { "state": "unwrapped" } }));
    }

    #[test]
    fn test_with_strategy_and_clone() {
        let mut wrapper = ElementWrapper::with_strategy(CloneStrategy::<u32>::default());
        wrapper.wrap(5).unwrap();

        let copy = wrapper.clone();
        assert_eq!(copy.reconstruct().unwrap(), 5);
        assert_eq!(format!("{:?}", copy), "ElementWrapper { wrapped: true, .. }");
    }
}

//! Wrap strategies - the transformation applied by a value wrapper

use std::fmt;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::CacheError;

/// Defines how a value is turned into cacheable state and back
///
/// Implementations should document their side effects, e.g. which fields a
/// reconstructed value no longer carries.
pub trait WrapStrategy {
    /// Value handed to `wrap` and returned by `reconstruct`
    type Value;
    /// Form kept inside the wrapper
    type Stored;

    fn wrap(&self, value: Self::Value) -> Result<Self::Stored, CacheError>;

    fn reconstruct(&self, stored: &Self::Stored) -> Result<Self::Value, CacheError>;
}

/// Keeps the value as-is; reconstruction clones it
pub struct CloneStrategy<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V: Clone> WrapStrategy for CloneStrategy<V> {
    type Value = V;
    type Stored = V;

    fn wrap(&self, value: V) -> Result<V, CacheError> {
        Ok(value)
    }

    fn reconstruct(&self, stored: &V) -> Result<V, CacheError> {
        Ok(stored.clone())
    }
}

/// Keeps the serde_json text of the value
pub struct JsonStrategy<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> WrapStrategy for JsonStrategy<V>
where
    V: Serialize + DeserializeOwned,
{
    type Value = V;
    type Stored = String;

    fn wrap(&self, value: V) -> Result<String, CacheError> {
        serde_json::to_string(&value).map_err(|e| {
            CacheError::serialization(format!("Failed to serialize element value: {}", e))
        })
    }

    fn reconstruct(&self, stored: &String) -> Result<V, CacheError> {
        serde_json::from_str(stored).map_err(|e| {
            CacheError::serialization(format!("Failed to deserialize element value: {}", e))
        })
    }
}

/// Values that hold parts which must not reach the cache
///
/// A typical case is a value owning a connection or handle: `detach` keeps
/// the cacheable fields only and `reattach` rebuilds the value with the
/// handle left empty.
pub trait Detach: Sized {
    type Detached;

    fn detach(self) -> Self::Detached;

    fn reattach(detached: &Self::Detached) -> Self;
}

/// Drops non-cacheable parts through [`Detach`]
pub struct DetachStrategy<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V: Detach> WrapStrategy for DetachStrategy<V> {
    type Value = V;
    type Stored = V::Detached;

    fn wrap(&self, value: V) -> Result<V::Detached, CacheError> {
        Ok(value.detach())
    }

    fn reconstruct(&self, stored: &V::Detached) -> Result<V, CacheError> {
        Ok(V::reattach(stored))
    }
}

macro_rules! marker_strategy_impls {
    ($($name:ident),*) => {
        $(
            impl<V> Default for $name<V> {
                fn default() -> Self {
                    Self {
                        _marker: PhantomData,
                    }
                }
            }

            impl<V> Clone for $name<V> {
                fn clone(&self) -> Self {
                    Self::default()
                }
            }

            impl<V> fmt::Debug for $name<V> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )*
    };
}

marker_strategy_impls!(CloneStrategy, JsonStrategy, DetachStrategy);

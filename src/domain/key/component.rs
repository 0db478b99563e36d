//! Key component generators - one per segment of an element key

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sha2::{Digest, Sha256};

/// Generates the value of a single element key segment
///
/// Given a key whose static form is `AA_BBBBB_C_DD`, each of `AA`, `BBBBB`,
/// `C` and `DD` is the static representation of one component.
pub trait KeyComponentGenerator<T>: Send + Sync {
    /// Returns the dynamic value for this segment, or `None` when no dynamic
    /// value applies and the static representation must be used instead
    fn generate(&self, object: Option<&T>) -> Option<String>;

    /// Fixed fallback token for this segment
    fn static_representation(&self) -> &str;
}

/// Boxed component, the element type of a key schema
pub type BoxedKeyComponent<T> = Box<dyn KeyComponentGenerator<T>>;

impl<T, C> KeyComponentGenerator<T> for Box<C>
where
    C: KeyComponentGenerator<T> + ?Sized,
{
    fn generate(&self, object: Option<&T>) -> Option<String> {
        (**self).generate(object)
    }

    fn static_representation(&self) -> &str {
        (**self).static_representation()
    }
}

impl<T, C> KeyComponentGenerator<T> for Arc<C>
where
    C: KeyComponentGenerator<T> + ?Sized,
{
    fn generate(&self, object: Option<&T>) -> Option<String> {
        (**self).generate(object)
    }

    fn static_representation(&self) -> &str {
        (**self).static_representation()
    }
}

/// Segment that never has a dynamic value (versions, fixed prefixes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticComponent {
    token: String,
}

impl StaticComponent {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl<T> KeyComponentGenerator<T> for StaticComponent {
    fn generate(&self, _object: Option<&T>) -> Option<String> {
        None
    }

    fn static_representation(&self) -> &str {
        &self.token
    }
}

/// Segment computed from a present object; an absent object yields `None`
pub struct FnComponent<T, F> {
    token: String,
    generator: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> FnComponent<T, F>
where
    F: Fn(&T) -> Option<String> + Send + Sync,
{
    pub fn new(token: impl Into<String>, generator: F) -> Self {
        Self {
            token: token.into(),
            generator,
            _marker: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for FnComponent<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComponent")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl<T, F> KeyComponentGenerator<T> for FnComponent<T, F>
where
    F: Fn(&T) -> Option<String> + Send + Sync,
{
    fn generate(&self, object: Option<&T>) -> Option<String> {
        object.and_then(|obj| (self.generator)(obj))
    }

    fn static_representation(&self) -> &str {
        &self.token
    }
}

/// Segment whose closure also decides what to do with an absent object
pub struct OptionalFnComponent<T, F> {
    token: String,
    generator: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> OptionalFnComponent<T, F>
where
    F: Fn(Option<&T>) -> Option<String> + Send + Sync,
{
    pub fn new(token: impl Into<String>, generator: F) -> Self {
        Self {
            token: token.into(),
            generator,
            _marker: PhantomData,
        }
    }
}

impl<T, F> fmt::Debug for OptionalFnComponent<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalFnComponent")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl<T, F> KeyComponentGenerator<T> for OptionalFnComponent<T, F>
where
    F: Fn(Option<&T>) -> Option<String> + Send + Sync,
{
    fn generate(&self, object: Option<&T>) -> Option<String> {
        (self.generator)(object)
    }

    fn static_representation(&self) -> &str {
        &self.token
    }
}

/// Replaces the dynamic value of another component with a SHA-256 hex prefix
///
/// Absent values stay absent, so the inner static representation still
/// applies. Use for long or key-unsafe material such as prompts or payloads.
#[derive(Debug, Clone)]
pub struct HashedComponent<C> {
    inner: C,
    length: usize,
}

impl<C> HashedComponent<C> {
    /// Hex characters kept by default (64 bits of the digest)
    pub const DEFAULT_LENGTH: usize = 16;

    pub fn new(inner: C) -> Self {
        Self {
            inner,
            length: Self::DEFAULT_LENGTH,
        }
    }

    /// Sets the number of hex characters kept, clamped to 1..=64
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.clamp(1, 64);
        self
    }

    fn hash_value(&self, value: &str) -> String {
        let digest = Sha256::digest(value.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(self.length);
        encoded
    }
}

impl<T, C> KeyComponentGenerator<T> for HashedComponent<C>
where
    C: KeyComponentGenerator<T>,
{
    fn generate(&self, object: Option<&T>) -> Option<String> {
        self.inner
            .generate(object)
            .map(|value| self.hash_value(&value))
    }

    fn static_representation(&self) -> &str {
        self.inner.static_representation()
    }
}

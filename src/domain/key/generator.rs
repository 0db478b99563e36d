//! Element key generation from an ordered component schema

use std::fmt;

use once_cell::sync::OnceCell;

#[cfg(test)]
use mockall::automock;

use super::component::{BoxedKeyComponent, KeyComponentGenerator};
use crate::domain::CacheError;

/// Ordered sequence of component generators making up a key
pub type KeyComponents<T> = Vec<BoxedKeyComponent<T>>;

/// Supplies the component sequence of a key generator
///
/// Invoked at most once per generator, on first use. Returning `None` or an
/// empty sequence leaves the generator unusable.
#[cfg_attr(test, automock)]
pub trait KeySchema<T: 'static> {
    fn components(&self) -> Option<KeyComponents<T>>;
}

impl<T, F> KeySchema<T> for F
where
    T: 'static,
    F: Fn() -> Option<KeyComponents<T>>,
{
    fn components(&self) -> Option<KeyComponents<T>> {
        self()
    }
}

/// Schema for generators built from an already known component list
#[derive(Debug, Clone, Copy, Default)]
pub struct PrebuiltSchema;

impl<T: 'static> KeySchema<T> for PrebuiltSchema {
    fn components(&self) -> Option<KeyComponents<T>> {
        None
    }
}

/// Trait for generating element keys from input objects
pub trait KeyGenerator<T> {
    /// Generates the key string for `object`
    fn generate(&self, object: Option<&T>) -> Result<String, CacheError>;

    /// Generates a key with a namespace prefix
    fn generate_with_namespace(
        &self,
        namespace: &str,
        object: Option<&T>,
    ) -> Result<String, CacheError> {
        Ok(format!("{}:{}", namespace, self.generate(object)?))
    }
}

/// How component values are assembled into a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFormat {
    /// Placed between segments, never leading or trailing
    pub separator: char,
    /// Prefix applied as `namespace:key`
    pub namespace: Option<String>,
}

impl Default for KeyFormat {
    fn default() -> Self {
        Self {
            separator: '_',
            namespace: None,
        }
    }
}

impl KeyFormat {
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Key generator joining component values in schema order
///
/// Each segment is the component's dynamic value, or its static
/// representation when the dynamic value is absent. An empty dynamic value
/// (`Some("")`) is kept as an empty segment.
pub struct ElementKeyGenerator<T: 'static, S = PrebuiltSchema> {
    schema: S,
    components: OnceCell<Option<KeyComponents<T>>>,
    format: KeyFormat,
}

impl<T: 'static, S: KeySchema<T>> ElementKeyGenerator<T, S> {
    /// Creates a generator whose components are loaded lazily from `schema`
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            components: OnceCell::new(),
            format: KeyFormat::default(),
        }
    }

    /// Sets the key format
    pub fn with_format(mut self, format: KeyFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format(&self) -> &KeyFormat {
        &self.format
    }

    /// Returns the key made only of static representations, e.g. `AA_BBBBB_C_DD`
    pub fn static_key(&self) -> Result<String, CacheError> {
        let components = self.components()?;
        let key = self.join(
            components
                .iter()
                .map(|c| c.static_representation().to_string()),
        );

        Ok(key)
    }

    fn components(&self) -> Result<&[BoxedKeyComponent<T>], CacheError> {
        let components = self.components.get_or_init(|| {
            let components = self.schema.components();
            tracing::debug!(
                component_count = components.as_ref().map(Vec::len),
                "Initialized key components"
            );
            components
        });

        match components {
            Some(components) if !components.is_empty() => Ok(components),
            _ => {
                tracing::warn!("Key components are absent or empty");
                Err(CacheError::invalid_state(
                    "components incorrectly initialized, should not be absent or empty",
                ))
            }
        }
    }

    fn join(&self, values: impl Iterator<Item = String>) -> String {
        let mut key = String::new();

        for value in values {
            key.push_str(&value);
            key.push(self.format.separator);
        }
        key.pop();

        match &self.format.namespace {
            Some(namespace) => format!("{}:{}", namespace, key),
            None => key,
        }
    }
}

impl<T: 'static> ElementKeyGenerator<T, PrebuiltSchema> {
    /// Creates a generator with an already known component list
    pub fn from_components(components: KeyComponents<T>) -> Self {
        Self {
            schema: PrebuiltSchema,
            components: OnceCell::with_value(Some(components)),
            format: KeyFormat::default(),
        }
    }
}

impl<T: 'static, S: KeySchema<T>> KeyGenerator<T> for ElementKeyGenerator<T, S> {
    fn generate(&self, object: Option<&T>) -> Result<String, CacheError> {
        let components = self.components()?;
        let key = self.join(components.iter().map(|c| {
            c.generate(object)
                .unwrap_or_else(|| c.static_representation().to_string())
        }));

        tracing::debug!(key = %key, "Generated element key");
        Ok(key)
    }
}

impl<T: 'static, S> fmt::Debug for ElementKeyGenerator<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementKeyGenerator")
            .field("format", &self.format)
            .field(
                "component_count",
                &self.components.get().map(|c| c.as_ref().map(Vec::len)),
            )
            .finish()
    }
}

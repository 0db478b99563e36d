//! Element Cache
//!
//! Building blocks for a caching layer:
//! - Element keys assembled from ordered component generators, each falling
//!   back to a static token when it has no dynamic value
//! - Value wrappers that transform a value once before caching and rebuild
//!   it on every read

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::CacheSettings;
pub use domain::{
    CacheError, ElementKeyGenerator, ElementWrapper, KeyComponentGenerator, KeyGenerator,
    ValueWrapper,
};

use domain::KeySchema;

/// Creates a key generator using the key format from `settings`
pub fn key_generator<T, S>(
    settings: &CacheSettings,
    schema: S,
) -> Result<ElementKeyGenerator<T, S>, CacheError>
where
    T: 'static,
    S: KeySchema<T>,
{
    Ok(ElementKeyGenerator::new(schema).with_format(settings.key_format()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyFormatConfig;
    use crate::domain::{FnComponent, KeyComponents, StaticComponent};

    struct Prompt {
        model: String,
        text: String,
    }

    fn prompt_components() -> Option<KeyComponents<Prompt>> {
        let components: KeyComponents<Prompt> = vec![
            Box::new(StaticComponent::new("v2")),
            Box::new(FnComponent::new("MODEL", |p: &Prompt| Some(p.model.clone()))),
            Box::new(domain::HashedComponent::new(FnComponent::new(
                "TEXT",
                |p: &Prompt| Some(p.text.clone()),
            ))),
        ];

        Some(components)
    }

    #[test]
    fn test_key_generator_from_settings() {
        let settings = CacheSettings {
            key: KeyFormatConfig {
                separator: "|".to_string(),
                namespace: Some("prompts".to_string()),
            },
            ..Default::default()
        };
        let generator = key_generator(&settings, prompt_components).unwrap();

        assert_eq!(generator.generate(None).unwrap(), "prompts:v2|MODEL|TEXT");

        let prompt = Prompt {
            model: "gpt-4".to_string(),
            text: "hello".to_string(),
        };
        let key = generator.generate(Some(&prompt)).unwrap();

        assert!(key.starts_with("prompts:v2|gpt-4|"));
        assert_eq!(key.len(), "prompts:v2|gpt-4|".len() + 16);
    }

    #[test]
    fn test_key_generator_rejects_invalid_settings() {
        let settings = CacheSettings {
            key: KeyFormatConfig {
                separator: String::new(),
                namespace: None,
            },
            ..Default::default()
        };

        let err = key_generator(&settings, prompt_components).unwrap_err();
        assert!(matches!(err, CacheError::Configuration { .. }));
    }
}

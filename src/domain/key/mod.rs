//! Element key domain - composable cache key generation

mod component;
mod generator;

pub use component::{
    BoxedKeyComponent, FnComponent, HashedComponent, KeyComponentGenerator, OptionalFnComponent,
    StaticComponent,
};
pub use generator::{
    ElementKeyGenerator, KeyComponents, KeyFormat, KeyGenerator, KeySchema, PrebuiltSchema,
};

#[cfg(test)]
pub use generator::MockKeySchema;

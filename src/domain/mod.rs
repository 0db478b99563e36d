//! Domain layer - key generation and value wrapping contracts

pub mod error;
pub mod key;
pub mod wrapper;

pub use error::CacheError;
pub use key::{
    BoxedKeyComponent, ElementKeyGenerator, FnComponent, HashedComponent, KeyComponentGenerator,
    KeyComponents, KeyFormat, KeyGenerator, KeySchema, OptionalFnComponent, PrebuiltSchema,
    StaticComponent,
};
pub use wrapper::{
    CloneStrategy, CloneWrapper, Detach, DetachStrategy, DetachWrapper, ElementWrapper,
    JsonStrategy, JsonWrapper, ValueWrapper, WrapState, WrapStrategy,
};

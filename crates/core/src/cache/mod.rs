mod error;
pub mod markup;
pub mod serialization;
mod tag;
mod traits;
mod typed;
mod value;

pub use error::{CacheError, Result};
pub use tag::TypeTag;
pub use traits::{ttl_from_seconds, Cache, Store};
pub use typed::{ReadMode, TypedCache};
pub use value::Value;

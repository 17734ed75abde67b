pub mod serialization;
pub mod store;
pub mod traits;
pub mod typed;

pub use serialization::*;
pub use store::*;
pub use traits::*;
pub use typed::{read_optional, read_or_default, write_value};

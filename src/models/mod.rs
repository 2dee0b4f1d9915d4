pub mod price;
pub mod wire;

pub use price::*;
pub use wire::*;

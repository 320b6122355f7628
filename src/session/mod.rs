pub mod identity;
pub mod store;

pub use store::Session;

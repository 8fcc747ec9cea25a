pub mod cart;
pub mod order;
pub mod product;
pub mod recommendation;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use recommendation::*;
pub use user::*;

/// Anything listed in a management table: carries a numeric id.
pub trait Record {
    fn record_id(&self) -> i64;
}

//! Domain models for the Agrimarket platform.
//!
//! Each entity comes in two shapes: the stored record (carrying `id` and
//! `createdAt`) and the insert shape a client submits. Insert shapes pair
//! a declarative field table with a `from_value` parser, so handlers can
//! report every structural problem in one response.

mod chat;
mod product;
mod rental;
mod tool;
mod user;

pub use chat::*;
pub use product::*;
pub use rental::*;
pub use tool::*;
pub use user::*;

/// A field-by-field update over a stored record.
///
/// Populated fields overwrite the stored value; absent fields leave the
/// stored value untouched.
pub trait Patch<T> {
    fn apply_to(self, record: &mut T);
}

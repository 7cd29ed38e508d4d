//! HTTP handlers for the Agrimarket platform

pub mod chat;
pub mod products;
pub mod rentals;
pub mod tools;
pub mod users;

pub use chat::{get_chat_messages, post_chat_message};
pub use products::{
    create_product, get_product, list_products, list_products_by_category, search_products,
};
pub use rentals::{create_rental, list_rentals, list_rentals_by_renter};
pub use tools::{create_tool, get_tool, list_available_tools, list_tools};
pub use users::{create_user, get_user};

//! Menu record types
//!
//! Two variants share the [`MenuEntity`](crate::core::MenuEntity) contract:
//! the simple [`MenuItem`] and the richer [`FoodItem`]. A deployment serves
//! one of them, chosen through [`ItemVariant`](crate::config::ItemVariant).

pub mod food_item;
pub mod menu_item;

pub use food_item::{Category, FoodItem, FoodItemForm};
pub use menu_item::{MenuItem, MenuItemForm};

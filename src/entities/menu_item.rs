//! Simple menu item: integer id, price edited as text

use crate::core::entity::{MenuEntity, Operation};
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};

/// Highest accepted price
pub const MAX_PRICE: f64 = 999.99;

/// A dish on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub price: f64,
    pub description: String,
}

/// Editable form of a [`MenuItem`]; the price stays text until submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub price: String,
    pub description: String,
}

impl MenuEntity for MenuItem {
    type Id = u64;
    type Form = MenuItemForm;

    fn display_name() -> &'static str {
        "Menu item"
    }

    fn store_resource() -> &'static str {
        "menuItems"
    }

    fn validation_config(operation: Operation) -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new("menu_item");

        if operation == Operation::Update {
            config
                .add_validator("id", validators::required("ID is required"))
                .add_validator(
                    "id",
                    validators::positive_integer("ID must be a positive integer"),
                );
        }

        config
            .add_filter("name", filters::trim())
            .add_validator("name", validators::not_empty("Name is required"))
            .add_validator("name", validators::text("Name must be text"))
            .add_validator(
                "name",
                validators::string_length(
                    1,
                    100,
                    "Name is required",
                    "Name must be less than 100 characters",
                ),
            );

        // Rule order is the order messages take precedence in.
        config
            .add_filter("price", filters::number_to_string())
            .add_validator("price", validators::not_empty("Price is required"))
            .add_validator("price", validators::text("Price must be a valid number"))
            .add_validator(
                "price",
                validators::numeric_string("Price must be a valid number"),
            )
            .add_validator("price", validators::positive("Price must be greater than 0"))
            .add_validator(
                "price",
                validators::max_value(MAX_PRICE, "Price must be less than $1000"),
            )
            .add_validator(
                "price",
                validators::decimal_places(2, "Price must have at most 2 decimal places"),
            );

        config
            .add_filter("description", filters::trim())
            .add_validator(
                "description",
                validators::not_empty("Description is required"),
            )
            .add_validator("description", validators::text("Description must be text"))
            .add_validator(
                "description",
                validators::string_length(
                    1,
                    500,
                    "Description is required",
                    "Description must be less than 500 characters",
                ),
            );

        config
    }

    fn parse_id(raw: &str) -> Option<u64> {
        raw.parse::<u64>().ok().filter(|id| *id > 0)
    }

    fn invalid_id_message() -> &'static str {
        "Item ID must be a positive integer"
    }

    fn id(&self) -> Option<&u64> {
        self.id.as_ref()
    }

    fn to_domain(form: MenuItemForm) -> Self {
        Self {
            id: form.id,
            name: form.name,
            price: form.price.trim().parse().unwrap_or_default(),
            description: form.description,
        }
    }

    fn to_form(&self) -> MenuItemForm {
        MenuItemForm {
            id: self.id,
            name: self.name.clone(),
            price: self.price.to_string(),
            description: self.description.clone(),
        }
    }
}

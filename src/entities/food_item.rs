//! Richer food item: text id, category, image and availability

use crate::core::entity::{MenuEntity, Operation};
use crate::core::validation::{EntityValidationConfig, filters, validators};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

/// Menu section a food item is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Appetizer,
    Entree,
    Dessert,
    Beverage,
    Side,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Appetizer,
        Category::Entree,
        Category::Dessert,
        Category::Beverage,
        Category::Side,
    ];

    /// Wire names, in menu order
    pub const NAMES: &'static [&'static str] = &["appetizer", "entree", "dessert", "beverage", "side"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Appetizer => "appetizer",
            Category::Entree => "entree",
            Category::Dessert => "dessert",
            Category::Beverage => "beverage",
            Category::Side => "side",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// A food item as stored and displayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub image_url: String,
    pub is_available: bool,
}

/// Admin form for a [`FoodItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub image_url: String,
    #[serde(default = "available_by_default")]
    pub is_available: bool,
}

fn available_by_default() -> bool {
    true
}

impl MenuEntity for FoodItem {
    type Id = String;
    type Form = FoodItemForm;

    fn display_name() -> &'static str {
        "Food item"
    }

    fn store_resource() -> &'static str {
        "foodItems"
    }

    fn validation_config(operation: Operation) -> EntityValidationConfig {
        let mut config = EntityValidationConfig::new("food_item");

        if operation == Operation::Update {
            config
                .add_filter("id", filters::trim())
                .add_validator("id", validators::not_empty("ID is required"))
                .add_validator("id", validators::text("ID must be text"));
        }

        config
            .add_filter("name", filters::trim())
            .add_validator("name", validators::not_empty("Name is required"))
            .add_validator("name", validators::text("Name must be text"))
            .add_validator(
                "name",
                validators::string_length(1, 100, "Name is required", "Name too long"),
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
                validators::string_length(1, 500, "Description is required", "Description too long"),
            );

        config
            .add_validator("price", validators::required("Price is required"))
            .add_validator("price", validators::number("Price must be a number"))
            .add_validator("price", validators::positive("Price must be positive"))
            .add_validator(
                "price",
                validators::decimal_places(2, "Price must have at most 2 decimal places"),
            );

        config
            .add_validator("category", validators::required("Category is required"))
            .add_validator(
                "category",
                validators::in_list(
                    Category::NAMES,
                    "Category must be one of: appetizer, entree, dessert, beverage, side",
                ),
            );

        config
            .add_filter("imageUrl", filters::trim())
            .add_validator("imageUrl", validators::not_empty("Image URL is required"))
            .add_validator("imageUrl", validators::url("Please enter a valid URL"));

        config
            .add_filter("isAvailable", filters::default_value(json!(true)))
            .add_validator(
                "isAvailable",
                validators::boolean("Availability must be true or false"),
            );

        config
    }

    fn parse_id(raw: &str) -> Option<String> {
        let raw = raw.trim();
        (!raw.is_empty()).then(|| raw.to_string())
    }

    fn invalid_id_message() -> &'static str {
        "Item ID must not be empty"
    }

    fn id(&self) -> Option<&String> {
        self.id.as_ref()
    }

    fn to_domain(form: FoodItemForm) -> Self {
        Self {
            id: form.id,
            name: form.name,
            description: form.description,
            price: form.price,
            category: form.category,
            image_url: form.image_url,
            is_available: form.is_available,
        }
    }

    fn to_form(&self) -> FoodItemForm {
        FoodItemForm {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category,
            image_url: self.image_url.clone(),
            is_available: self.is_available,
        }
    }

    fn supports_availability() -> bool {
        true
    }

    fn toggle_availability(&self) -> Option<Self> {
        Some(Self {
            is_available: !self.is_available,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn valid() -> Value {
        json!({
            "name": "Tiramisu",
            "description": "Coffee-soaked ladyfingers",
            "price": 6.5,
            "category": "dessert",
            "imageUrl": "https://cdn.example.com/tiramisu.jpg"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut input = valid();
        input[field] = value;
        input
    }

    #[test]
    fn test_availability_defaults_to_true() {
        let form = FoodItem::validate_create(&valid()).expect("valid form");
        assert!(form.is_available);
        assert_eq!(form.category, Category::Dessert);
    }

    #[test]
    fn test_category_must_be_in_enum() {
        let errors = FoodItem::validate_create(&with("category", json!("main"))).unwrap_err();
        assert_eq!(
            errors.get("category"),
            Some("Category must be one of: appetizer, entree, dessert, beverage, side")
        );
    }

    #[test]
    fn test_unreachable_url_is_accepted() {
        let input = with("imageUrl", json!("http://nowhere.invalid/x.png"));
        assert!(FoodItem::validate_create(&input).is_ok());

        let errors = FoodItem::validate_create(&with("imageUrl", json!("pic.png"))).unwrap_err();
        assert_eq!(errors.get("imageUrl"), Some("Please enter a valid URL"));
    }

    #[test]
    fn test_price_rules() {
        let errors = FoodItem::validate_create(&with("price", json!("6.50"))).unwrap_err();
        assert_eq!(errors.get("price"), Some("Price must be a number"));

        let errors = FoodItem::validate_create(&with("price", json!(0))).unwrap_err();
        assert_eq!(errors.get("price"), Some("Price must be positive"));

        let errors = FoodItem::validate_create(&with("price", json!(12.999))).unwrap_err();
        assert_eq!(
            errors.get("price"),
            Some("Price must have at most 2 decimal places")
        );

        // No upper bound on this variant
        assert!(FoodItem::validate_create(&with("price", json!(2500.75))).is_ok());
        assert!(FoodItem::validate_create(&with("price", json!(1e30))).is_ok());
    }

    #[test]
    fn test_text_limits() {
        let errors = FoodItem::validate_create(&with("name", json!("  "))).unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));

        let errors = FoodItem::validate_create(&with("description", json!("d".repeat(501)))).unwrap_err();
        assert_eq!(errors.get("description"), Some("Description too long"));
    }

    #[test]
    fn test_update_id_agreement() {
        let id = "abc".to_string();
        let form = FoodItem::validate_update(&valid(), Some(&id)).expect("valid form");
        assert_eq!(form.id.as_deref(), Some("abc"));

        let errors = FoodItem::validate_update(&with("id", json!("xyz")), Some(&id)).unwrap_err();
        assert!(errors.contains("id"));
    }

    #[test]
    fn test_numeric_body_id_must_be_text() {
        let id = "5".to_string();
        let errors = FoodItem::validate_update(&with("id", json!(5)), Some(&id)).unwrap_err();
        assert_eq!(errors.get("id"), Some("ID must be text"));
    }

    #[test]
    fn test_toggle_flips_only_availability() {
        let item = FoodItem::validate_record(with("id", json!("1"))).expect("valid record");
        let toggled = item.toggle_availability().expect("supported");
        assert!(!toggled.is_available);
        assert_eq!(toggled.name, item.name);
        assert_eq!(toggled.id, item.id);
    }

    #[test]
    fn test_form_round_trip() {
        let item = FoodItem {
            id: Some("7".to_string()),
            name: "Lemonade".to_string(),
            description: "Fresh".to_string(),
            price: 3.25,
            category: Category::Beverage,
            image_url: "https://cdn.example.com/lemonade.jpg".to_string(),
            is_available: false,
        };
        assert_eq!(FoodItem::to_domain(item.to_form()), item);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let item = FoodItem::validate_record(with("id", json!("1"))).expect("valid record");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["imageUrl"], "https://cdn.example.com/tiramisu.jpg");
        assert_eq!(value["isAvailable"], true);
        assert_eq!(value["category"], "dessert");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("side".parse::<Category>(), Ok(Category::Side));
        assert!("Side".parse::<Category>().is_err());
        assert_eq!(Category::Entree.to_string(), "entree");
    }
}

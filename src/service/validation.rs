//! Form validation for item submissions.

use crate::error::AppError;
use crate::model::ItemFields;

pub const NAME_REQUIRED: &str = "Item name is required.";
pub const NUMBERS_INVALID: &str = "Quantity must be an integer and price must be a number.";

/// Raw add/edit form fields. `quantity` and `price` stay `None` when the field
/// was not submitted at all, which selects the column default.
#[derive(Clone, Debug, Default)]
pub struct ItemForm {
    pub name: String,
    pub quantity: Option<String>,
    pub price: Option<String>,
    pub description: String,
}

/// Builds a form from decoded `key=value` pairs. The first occurrence of a
/// repeated key wins; unknown keys are ignored.
impl FromIterator<(String, String)> for ItemForm {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut name = None;
        let mut description = None;
        let mut form = ItemForm::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut name,
                "quantity" => &mut form.quantity,
                "price" => &mut form.price,
                "description" => &mut description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form.name = name.unwrap_or_default();
        form.description = description.unwrap_or_default();
        form
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Name check first, then both numbers; nothing is parsed past the first failure.
    pub fn validate_item(form: &ItemForm) -> Result<ItemFields, AppError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(NAME_REQUIRED.into()));
        }
        let (quantity, price) = match (parse_quantity(form.quantity.as_deref()), parse_price(form.price.as_deref())) {
            (Some(q), Some(p)) => (q, p),
            _ => return Err(AppError::Validation(NUMBERS_INVALID.into())),
        };
        Ok(ItemFields {
            name: name.to_string(),
            quantity,
            price,
            description: Some(form.description.trim().to_string()),
        })
    }
}

fn parse_quantity(raw: Option<&str>) -> Option<i64> {
    match raw {
        None => Some(0),
        Some(s) => s.trim().parse().ok(),
    }
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    match raw {
        None => Some(0.0),
        // SQLite stores NaN as NULL, which the NOT NULL column refuses.
        Some(s) => s.trim().parse::<f64>().ok().filter(|p| !p.is_nan()),
    }
}

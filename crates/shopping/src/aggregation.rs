use std::fmt;

use sqlx::prelude::FromRow;

/// One line of the shopping list: an ingredient and the summed amount across
/// every recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

impl ShoppingListItem {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, total_amount: i64) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            total_amount,
        }
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}",
            self.name, self.measurement_unit, self.total_amount
        )
    }
}

/// Plain-text export, one newline-terminated line per item.
pub fn render(items: &[ShoppingListItem]) -> String {
    items.iter().map(|item| format!("{item}\n")).collect()
}

use serde::{Deserialize, Serialize};

use crate::domain::{OrderId, OrderItemId, PersonId};

/// Field edits for an order. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

impl OrderItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.quantity.is_none() && self.unit_price.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub customer_name: String,
    pub limit: f64,
    pub item_count: usize,
    pub total: f64,
    pub over_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemSummary {
    pub order_item_id: OrderItemId,
    pub order_id: OrderId,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order: OrderSummary,
    pub items: Vec<OrderItemSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub person_id: PersonId,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub person_id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub year_of_birth: i32,
    pub age: i64,
    /// Absent when the person has no friends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friend_names: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    #[serde(rename = "editName")]
    EditName,
    #[serde(rename = "personList")]
    PersonList,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EditName => "editName",
            Self::PersonList => "personList",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullNamePanel {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum Panel {
    EditName {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        person: Option<FullNamePanel>,
    },
    PersonList {
        persons: Vec<PersonSummary>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<PersonDetails>,
    },
}

/// Emitted by the data services after every successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ChangeEvent {
    OrderUpdated {
        order_id: OrderId,
    },
    CurrentOrderChanged {
        order_id: OrderId,
    },
    OrderItemAdded {
        order_id: OrderId,
        order_item_id: OrderItemId,
    },
    OrderItemUpdated {
        order_id: OrderId,
        order_item_id: OrderItemId,
    },
    OrderItemDeleted {
        order_id: OrderId,
        order_item_id: OrderItemId,
    },
    PersonUpdated {
        person_id: PersonId,
    },
    CurrentPersonChanged {
        person_id: PersonId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_event_uses_tagged_layout() {
        let event = ChangeEvent::OrderItemAdded {
            order_id: OrderId(1000),
            order_item_id: OrderItemId(1007),
        };
        let json = serde_json::to_value(&event).expect("json");
        assert_eq!(json["type"], "order_item_added");
        assert_eq!(json["payload"]["order_id"], 1000);
        assert_eq!(json["payload"]["order_item_id"], 1007);
    }

    #[test]
    fn display_mode_serializes_camel_case_strings() {
        assert_eq!(
            serde_json::to_string(&DisplayMode::EditName).expect("json"),
            "\"editName\""
        );
        let mode: DisplayMode = serde_json::from_str("\"personList\"").expect("mode");
        assert_eq!(mode, DisplayMode::PersonList);
        assert_eq!(mode.as_str(), "personList");
    }

    #[test]
    fn partial_updates_deserialize_with_missing_fields() {
        let update: OrderItemUpdate = serde_json::from_str(r#"{"quantity":3}"#).expect("update");
        assert_eq!(update.quantity, Some(3.0));
        assert!(update.product_name.is_none());
        assert!(!update.is_empty());
        assert!(OrderItemUpdate::default().is_empty());
    }
}

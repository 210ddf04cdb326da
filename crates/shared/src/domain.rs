use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(OrderId);
id_newtype!(OrderItemId);
id_newtype!(PersonId);

/// Year used for every age computation in the person demo.
pub const REFERENCE_YEAR: i32 = 2016;

/// Monotonic id source owned by a data service.
///
/// The order demo shares one allocator between orders and their items, so an
/// item id never collides with an order id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: i64,
}

impl IdAllocator {
    pub fn starting_at(first: i64) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }

    pub fn peek(&self) -> i64 {
        self.next
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_name: String,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: OrderItemId,
    pub order_id: OrderId,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn blank(order_item_id: OrderItemId, order_id: OrderId) -> Self {
        Self {
            order_item_id,
            order_id,
            product_name: String::new(),
            quantity: 0.0,
            unit_price: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub person_id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub year_of_birth: i32,
    pub friends: Vec<PersonId>,
}

impl Person {
    pub fn new(
        person_id: PersonId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        year_of_birth: i32,
    ) -> Self {
        Self {
            person_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            year_of_birth,
            friends: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Widened so every `i32` year of birth yields an age.
    pub fn age(&self) -> i64 {
        i64::from(REFERENCE_YEAR) - i64::from(self.year_of_birth)
    }
}

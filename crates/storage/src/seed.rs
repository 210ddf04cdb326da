//! Literal records both demos start from.

pub const FIRST_ORDER_ID: i64 = 1000;
pub const FIRST_PERSON_ID: i64 = 0;

pub struct OrderSeed {
    pub customer_name: &'static str,
    pub limit: f64,
    pub items: &'static [ItemSeed],
}

pub struct ItemSeed {
    pub product_name: &'static str,
    pub quantity: f64,
    pub unit_price: f64,
}

const fn item(product_name: &'static str, quantity: f64, unit_price: f64) -> ItemSeed {
    ItemSeed {
        product_name,
        quantity,
        unit_price,
    }
}

pub const ORDERS: &[OrderSeed] = &[
    OrderSeed {
        customer_name: "J. Coltrane",
        limit: 100.0,
        items: &[item("Bread", 5.0, 1.0), item("Brie", 5.0, 2.0), item("IPA", 5.0, 3.0)],
    },
    OrderSeed {
        customer_name: "B. Evans",
        limit: 200.0,
        items: &[item("Mozzarella", 5.0, 2.0), item("Wine", 5.0, 3.0)],
    },
];

/// (first name, last name, year of birth)
pub const PERSONS: &[(&str, &str, i32)] = &[
    ("Victor", "Savkin", 1980),
    ("Igor", "Minar", 1981),
    ("Victor", "Berchet", 1982),
    ("Vamsi", "Varikuti", 1983),
    ("Timothy", "Blasi", 1984),
    ("Tobias", "Bosch", 1985),
    ("Miško", "Hevery", 1986),
    ("Kara", "Puppylove", 1987),
    ("Flavio", "Corpa", 1988),
    ("Brian", "Ford", 1989),
    ("Alex", "Rickabaugh", 1990),
    ("João", "Dias", 1991),
    ("Alex", "Eagle", 1992),
    ("Nils", "Naegele", 1993),
];

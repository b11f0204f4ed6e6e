//! Common test utilities for query tests
//!
//! Provides a small typed data context with:
//! - `Customers`: Name, Age, First Name
//! - `Orders`: Id, Total, Note (optional)
//! - `Region`: a scalar member that cannot be queried

#![allow(dead_code)]

use gadgetry_core::{elements, entity, DataContext, Elements, Member};

pub struct Customer {
    pub name: String,
    pub age: u32,
    pub first_name: String,
}

entity!(Customer {
    "Name" => name,
    "Age" => age,
    "First Name" => first_name,
});

pub struct Order {
    pub id: u64,
    pub total: f64,
    pub note: Option<String>,
}

entity!(Order {
    "Id" => id,
    "Total" => total,
    "Note" => note,
});

#[derive(Default)]
pub struct TestContext {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub region: String,
}

impl DataContext for TestContext {
    fn members() -> Vec<Member> {
        vec![
            Member::collection::<Customer>("Customers"),
            Member::collection::<Order>("Orders"),
            Member::scalar::<String>("Region"),
        ]
    }

    fn scan(&self, member: &str) -> Option<Elements<'_>> {
        match member {
            "Customers" => Some(elements(&self.customers)),
            "Orders" => Some(elements(&self.orders)),
            _ => None,
        }
    }
}

pub fn customer(name: &str, age: u32) -> Customer {
    Customer {
        name: name.to_string(),
        age,
        first_name: name.to_string(),
    }
}

/// Joe and Fred, both 28, plus two orders.
pub fn seeded_context() -> TestContext {
    TestContext {
        customers: vec![customer("Joe", 28), customer("Fred", 28)],
        orders: vec![
            Order {
                id: 1,
                total: 12.5,
                note: None,
            },
            Order {
                id: 2,
                total: 3.0,
                note: Some("gift".to_string()),
            },
        ],
        region: "EU".to_string(),
    }
}

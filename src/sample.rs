//! Sample data context used by the CLI.
//!
//! Seeded with the two demo customers; a JSON file with the same shape
//! (`{"Customers": [...], "Orders": [...], "Company": "..."}`) can replace it.

use std::path::Path;

use gadgetry_core::{elements, entity, DataContext, Elements, Member};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub name: String,
    pub age: u32,
}

entity!(Customer {
    "Name" => name,
    "Age" => age,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub id: u64,
    pub customer: String,
    pub total: f64,
    #[serde(default, rename = "Shipped On")]
    pub shipped_on: Option<String>,
}

entity!(Order {
    "Id" => id,
    "Customer" => customer,
    "Total" => total,
    "Shipped On" => shipped_on,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SampleContext {
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub company: String,
}

impl SampleContext {
    /// The demo data set: Joe and Fred, both 28.
    pub fn demo() -> Self {
        Self {
            customers: vec![
                Customer {
                    name: "Joe".to_string(),
                    age: 28,
                },
                Customer {
                    name: "Fred".to_string(),
                    age: 28,
                },
            ],
            orders: vec![Order {
                id: 1,
                customer: "Joe".to_string(),
                total: 12.5,
                shipped_on: None,
            }],
            company: "Gadgetry".to_string(),
        }
    }

    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let context: SampleContext = serde_json::from_str(&content)?;
        tracing::info!(
            "Loaded {} customer(s) and {} order(s) from {}",
            context.customers.len(),
            context.orders.len(),
            path.display()
        );
        Ok(context)
    }
}

impl DataContext for SampleContext {
    fn members() -> Vec<Member> {
        vec![
            Member::collection::<Customer>("Customers"),
            Member::collection::<Order>("Orders"),
            Member::scalar::<String>("Company"),
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

// Request payload factory

use serde_json::{json, Value};

pub struct TestDataFactory;

impl TestDataFactory {
    pub fn client_payload(first_name: &str, last_name: &str) -> Value {
        json!({
            "first_name": first_name,
            "last_name": last_name,
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "phone": "707-555-0100",
            "client_type": "buyer",
            "status": "active",
            "city": "Petaluma"
        })
    }

    pub fn lead_payload(first_name: &str, last_name: &str) -> Value {
        json!({
            "first_name": first_name,
            "last_name": last_name,
            "email": format!("{}@example.com", first_name.to_lowercase()),
            "phone": "707-555-0199",
            "referral": "open_house",
            "address": "88 Oak Ave",
            "city": "Sonoma",
            "state": "CA",
            "zip_code": "95476",
            "notes": "Met at the Oak Ave open house"
        })
    }

    pub fn property_payload(title: &str) -> Value {
        json!({
            "title": title,
            "property_type": "single_family",
            "address": "12 Maple St",
            "city": "Petaluma",
            "state": "CA",
            "zip_code": "94952",
            "price": "850000.00",
            "bedrooms": 3,
            "bathrooms": "2.5"
        })
    }

    pub fn closed_transaction_payload(property_id: i64, representation: &str) -> Value {
        json!({
            "property_id": property_id,
            "status": "closed",
            "representation": representation,
            "commission_percentage": "2.50",
            "final_sales_price": "800000.00",
            "file_number": "F-1001"
        })
    }
}

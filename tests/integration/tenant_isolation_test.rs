// Tenant isolation tests.
//
// Two agents share one database; neither may read, change or count the
// other's records. Requires MySQL (TEST_DATABASE_URL):
//   cargo test --test tenant_isolation_test -- --ignored

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use serde_json::Value;

const API_KEY_HEADER: &str = "X-API-Key";

#[actix_web::test]
#[ignore]
async fn test_clients_are_scoped_to_their_agent() {
    let pool = create_test_pool().await;
    let alice = create_tenant(&pool).await;
    let bob = create_tenant(&pool).await;
    let srv = spawn_test_server(pool);

    let mut resp = srv
        .post("/clients")
        .insert_header((API_KEY_HEADER, alice.api_key.as_str()))
        .send_json(&TestDataFactory::client_payload("Maria", "Lopez"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let client: Value = resp.json().await.unwrap();
    let client_id = client["id"].as_i64().unwrap();

    // owner sees it
    let resp = srv
        .get(format!("/clients/{}", client_id))
        .insert_header((API_KEY_HEADER, alice.api_key.as_str()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    // another agent gets a plain 404
    let resp = srv
        .get(format!("/clients/{}", client_id))
        .insert_header((API_KEY_HEADER, bob.api_key.as_str()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = srv
        .put(format!("/clients/{}", client_id))
        .insert_header((API_KEY_HEADER, bob.api_key.as_str()))
        .send_json(&TestDataFactory::client_payload("Mallory", "Hijack"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = srv
        .delete(format!("/clients/{}", client_id))
        .insert_header((API_KEY_HEADER, bob.api_key.as_str()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let mut resp = srv
        .get("/clients")
        .insert_header((API_KEY_HEADER, bob.api_key.as_str()))
        .send()
        .await
        .unwrap();
    let page: Value = resp.json().await.unwrap();
    assert_eq!(page["total"], 0);
}

#[actix_web::test]
#[ignore]
async fn test_dashboard_counts_only_own_records() {
    let pool = create_test_pool().await;
    let alice = create_tenant(&pool).await;
    let bob = create_tenant(&pool).await;
    let srv = spawn_test_server(pool);

    let mut resp = srv
        .post("/properties")
        .insert_header((API_KEY_HEADER, alice.api_key.as_str()))
        .send_json(&TestDataFactory::property_payload("Maple cottage"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let property: Value = resp.json().await.unwrap();
    let property_id = property["id"].as_i64().unwrap();

    let resp = srv
        .post("/transactions")
        .insert_header((API_KEY_HEADER, alice.api_key.as_str()))
        .send_json(&TestDataFactory::closed_transaction_payload(property_id, "seller"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);

    // bob cannot hang a transaction on alice's property
    let resp = srv
        .post("/transactions")
        .insert_header((API_KEY_HEADER, bob.api_key.as_str()))
        .send_json(&TestDataFactory::closed_transaction_payload(property_id, "buyer"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let mut resp = srv
        .get("/dashboard")
        .insert_header((API_KEY_HEADER, alice.api_key.as_str()))
        .send()
        .await
        .unwrap();
    let dashboard: Value = resp.json().await.unwrap();
    assert_eq!(dashboard["counts"]["properties"], 1);
    assert_eq!(dashboard["counts"]["transactions"], 1);
    // 2.5% of 800,000
    assert_eq!(dashboard["total_income"], 20000.0);

    let mut resp = srv
        .get("/dashboard")
        .insert_header((API_KEY_HEADER, bob.api_key.as_str()))
        .send()
        .await
        .unwrap();
    let dashboard: Value = resp.json().await.unwrap();
    assert_eq!(dashboard["counts"]["properties"], 0);
    assert_eq!(dashboard["counts"]["transactions"], 0);
    assert_eq!(dashboard["total_income"], 0.0);
}

#[actix_web::test]
#[ignore]
async fn test_requests_without_valid_key_are_rejected() {
    let pool = create_test_pool().await;
    let srv = spawn_test_server(pool);

    let resp = srv.get("/clients").send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    let resp = srv
        .get("/clients")
        .insert_header((API_KEY_HEADER, "not-a-real-key"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 401);

    // health stays public
    let resp = srv.get("/health").send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

// Lead conversion tests.
//
// Converting copies the lead into a new client exactly once; repeating the
// call returns the same client. Requires MySQL (TEST_DATABASE_URL):
//   cargo test --test lead_conversion_test -- --ignored

#[path = "../helpers/mod.rs"]
mod helpers;

use helpers::*;
use serde_json::Value;

const API_KEY_HEADER: &str = "X-API-Key";

#[actix_web::test]
#[ignore]
async fn test_convert_lead_once() {
    let pool = create_test_pool().await;
    let agent = create_tenant(&pool).await;
    let srv = spawn_test_server(pool);

    let mut resp = srv
        .post("/leads")
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send_json(&TestDataFactory::lead_payload("Dana", "Whitfield"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let lead: Value = resp.json().await.unwrap();
    let lead_id = lead["id"].as_i64().unwrap();
    assert_eq!(lead["is_converted"], false);

    let mut resp = srv
        .post(format!("/leads/{}/convert", lead_id))
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let first: Value = resp.json().await.unwrap();
    assert_eq!(first["created"], true);
    assert_eq!(first["client"]["first_name"], "Dana");
    assert_eq!(first["client"]["email"], "dana@example.com");
    assert_eq!(first["client"]["city"], "Sonoma");
    let client_id = first["client"]["id"].as_i64().unwrap();

    let mut resp = srv
        .post(format!("/leads/{}/convert", lead_id))
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let second: Value = resp.json().await.unwrap();
    assert_eq!(second["created"], false);
    assert_eq!(second["client"]["id"].as_i64(), Some(client_id));

    let mut resp = srv
        .get(format!("/leads/{}", lead_id))
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send()
        .await
        .unwrap();
    let lead: Value = resp.json().await.unwrap();
    assert_eq!(lead["converted_to_client_id"].as_i64(), Some(client_id));
    assert_eq!(lead["is_converted"], true);

    let mut resp = srv
        .get("/clients")
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send()
        .await
        .unwrap();
    let clients: Value = resp.json().await.unwrap();
    assert_eq!(clients["total"], 1);
}

#[actix_web::test]
#[ignore]
async fn test_converted_leads_leave_the_default_list() {
    let pool = create_test_pool().await;
    let agent = create_tenant(&pool).await;
    let srv = spawn_test_server(pool);

    let mut resp = srv
        .post("/leads")
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send_json(&TestDataFactory::lead_payload("Eli", "Navarro"))
        .await
        .unwrap();
    let lead: Value = resp.json().await.unwrap();
    let lead_id = lead["id"].as_i64().unwrap();

    srv.post(format!("/leads/{}/convert", lead_id))
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send()
        .await
        .unwrap();

    let mut resp = srv
        .get("/leads")
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send()
        .await
        .unwrap();
    let page: Value = resp.json().await.unwrap();
    assert_eq!(page["total"], 0);

    let mut resp = srv
        .get("/leads?show_all=1")
        .insert_header((API_KEY_HEADER, agent.api_key.as_str()))
        .send()
        .await
        .unwrap();
    let page: Value = resp.json().await.unwrap();
    assert_eq!(page["total"], 1);
}

#[actix_web::test]
#[ignore]
async fn test_cannot_convert_another_agents_lead() {
    let pool = create_test_pool().await;
    let owner = create_tenant(&pool).await;
    let stranger = create_tenant(&pool).await;
    let srv = spawn_test_server(pool);

    let mut resp = srv
        .post("/leads")
        .insert_header((API_KEY_HEADER, owner.api_key.as_str()))
        .send_json(&TestDataFactory::lead_payload("Fay", "Okafor"))
        .await
        .unwrap();
    let lead: Value = resp.json().await.unwrap();
    let lead_id = lead["id"].as_i64().unwrap();

    let resp = srv
        .post(format!("/leads/{}/convert", lead_id))
        .insert_header((API_KEY_HEADER, stranger.api_key.as_str()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

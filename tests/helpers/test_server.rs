// Test server helpers.
//
// Spawns the real application wiring (routes, API key auth, request ids) on a
// random port with actix-test.

use actix_web::App;
use realtydesk::core::AppTimezone;
use realtydesk::middleware::{ApiKeyAuth, RequestId};
use realtydesk::AppState;
use sqlx::MySqlPool;

pub use actix_test::TestServer;

pub fn spawn_test_server(pool: MySqlPool) -> TestServer {
    let state = AppState::new(pool, AppTimezone::utc());

    actix_test::start(move || {
        App::new()
            .configure(|cfg| state.configure(cfg))
            .wrap(ApiKeyAuth::new(state.pool.clone()))
            .wrap(RequestId)
    })
}

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::csv_io::{self, MAX_IMPORT_BYTES};
use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::clients::models::{ClientInput, ClientListQuery};
use crate::modules::clients::services::ClientService;
use crate::modules::notes::NoteInput;

/// GET /clients
pub async fn list_clients(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    query: web::Query<ClientListQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_clients(tenant_id.0, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /clients
pub async fn create_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    request: web::Json<ClientInput>,
) -> Result<HttpResponse, AppError> {
    let client = service.create_client(tenant_id.0, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(client))
}

/// GET /clients/{id}
pub async fn get_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let client = service.get_client(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(client))
}

/// PUT /clients/{id}
pub async fn update_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<ClientInput>,
) -> Result<HttpResponse, AppError> {
    let client = service
        .update_client(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(client))
}

/// DELETE /clients/{id}
pub async fn delete_client(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_client(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /clients/{id}/notes
pub async fn add_note(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<NoteInput>,
) -> Result<HttpResponse, AppError> {
    let note = service
        .add_note(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(note))
}

/// GET /clients/export
pub async fn export_clients(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let file = service.export_clients(tenant_id.0).await?;
    Ok(csv_io::attachment("clients.csv", file))
}

/// POST /clients/import
///
/// Body is the raw CSV file.
pub async fn import_clients(
    service: web::Data<Arc<ClientService>>,
    tenant_id: TenantId,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let report = service.import_clients(tenant_id.0, &body).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::get().to(list_clients))
            .route("", web::post().to(create_client))
            .route("/export", web::get().to(export_clients))
            .service(
                web::resource("/import")
                    .app_data(web::PayloadConfig::new(MAX_IMPORT_BYTES))
                    .route(web::post().to(import_clients)),
            )
            .route("/{id}", web::get().to(get_client))
            .route("/{id}", web::put().to(update_client))
            .route("/{id}", web::delete().to(delete_client))
            .route("/{id}/notes", web::post().to(add_note)),
    );
}

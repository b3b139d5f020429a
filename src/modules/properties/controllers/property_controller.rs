use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::csv_io::{self, MAX_IMPORT_BYTES};
use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::notes::NoteInput;
use crate::modules::properties::models::{PropertyInput, PropertyListQuery};
use crate::modules::properties::services::PropertyService;

type Service = web::Data<Arc<PropertyService>>;

/// GET /properties
pub async fn list_properties(
    service: Service,
    tenant_id: TenantId,
    query: web::Query<PropertyListQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_properties(tenant_id.0, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /properties
pub async fn create_property(
    service: Service,
    tenant_id: TenantId,
    request: web::Json<PropertyInput>,
) -> Result<HttpResponse, AppError> {
    let property = service
        .create_property(tenant_id.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(property))
}

/// GET /properties/{id}
pub async fn get_property(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let property = service.get_property(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(property))
}

/// PUT /properties/{id}
pub async fn update_property(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<PropertyInput>,
) -> Result<HttpResponse, AppError> {
    let property = service
        .update_property(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(property))
}

/// DELETE /properties/{id}
pub async fn delete_property(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service
        .delete_property(tenant_id.0, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /properties/{id}/notes
pub async fn add_note(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<NoteInput>,
) -> Result<HttpResponse, AppError> {
    let note = service
        .add_note(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(note))
}

pub async fn export_properties(
    service: Service,
    tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let file = service.export_properties(tenant_id.0).await?;
    Ok(csv_io::attachment("properties.csv", file))
}

/// Body is the raw CSV file.
pub async fn import_properties(
    service: Service,
    tenant_id: TenantId,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let report = service.import_properties(tenant_id.0, &body).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/properties")
            .route("", web::get().to(list_properties))
            .route("", web::post().to(create_property))
            .route("/export", web::get().to(export_properties))
            .service(
                web::resource("/import")
                    .app_data(web::PayloadConfig::new(MAX_IMPORT_BYTES))
                    .route(web::post().to(import_properties)),
            )
            .route("/{id}", web::get().to(get_property))
            .route("/{id}", web::put().to(update_property))
            .route("/{id}", web::delete().to(delete_property))
            .route("/{id}/notes", web::post().to(add_note)),
    );
}

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::csv_io::{self, MAX_IMPORT_BYTES};
use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::contacts::models::{ContactInput, ContactListQuery};
use crate::modules::contacts::services::ContactService;
use crate::modules::notes::NoteInput;

type Service = web::Data<Arc<ContactService>>;

pub async fn list_contacts(
    service: Service,
    tenant_id: TenantId,
    query: web::Query<ContactListQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_contacts(tenant_id.0, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn create_contact(
    service: Service,
    tenant_id: TenantId,
    request: web::Json<ContactInput>,
) -> Result<HttpResponse, AppError> {
    let contact = service
        .create_contact(tenant_id.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(contact))
}

pub async fn get_contact(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let contact = service.get_contact(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(contact))
}

pub async fn update_contact(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<ContactInput>,
) -> Result<HttpResponse, AppError> {
    let contact = service
        .update_contact(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(contact))
}

pub async fn delete_contact(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_contact(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

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

/// Configure contact routes
pub async fn export_contacts(
    service: Service,
    tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let file = service.export_contacts(tenant_id.0).await?;
    Ok(csv_io::attachment("contacts.csv", file))
}

/// Body is the raw CSV file.
pub async fn import_contacts(
    service: Service,
    tenant_id: TenantId,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let report = service.import_contacts(tenant_id.0, &body).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contacts")
            .route("", web::get().to(list_contacts))
            .route("", web::post().to(create_contact))
            .route("/export", web::get().to(export_contacts))
            .service(
                web::resource("/import")
                    .app_data(web::PayloadConfig::new(MAX_IMPORT_BYTES))
                    .route(web::post().to(import_contacts)),
            )
            .route("/{id}", web::get().to(get_contact))
            .route("/{id}", web::put().to(update_contact))
            .route("/{id}", web::delete().to(delete_contact))
            .route("/{id}/notes", web::post().to(add_note)),
    );
}

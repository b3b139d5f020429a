use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::csv_io::{self, MAX_IMPORT_BYTES};
use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::leads::models::{LeadInput, LeadListQuery};
use crate::modules::leads::services::LeadService;
use crate::modules::notes::NoteInput;

/// GET /leads
pub async fn list_leads(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    query: web::Query<LeadListQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_leads(tenant_id.0, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /leads
pub async fn create_lead(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    request: web::Json<LeadInput>,
) -> Result<HttpResponse, AppError> {
    let lead = service.create_lead(tenant_id.0, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(lead))
}

/// GET /leads/export
pub async fn export_leads(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
) -> Result<HttpResponse, AppError> {
    let file = service.export_leads(tenant_id.0).await?;
    Ok(csv_io::attachment("leads.csv", file))
}

/// POST /leads/import
///
/// Body is the raw CSV file.
pub async fn import_leads(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let report = service.import_leads(tenant_id.0, &body).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /leads/{id}
pub async fn get_lead(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let lead = service.get_lead(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(lead))
}

/// PUT /leads/{id}
pub async fn update_lead(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<LeadInput>,
) -> Result<HttpResponse, AppError> {
    let lead = service
        .update_lead(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(lead))
}

/// DELETE /leads/{id}
pub async fn delete_lead(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_lead(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /leads/{id}/convert
///
/// 201 when a client was created, 200 when the lead was already converted.
pub async fn convert_lead(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let conversion = service
        .convert_to_client(tenant_id.0, path.into_inner())
        .await?;

    if conversion.created {
        Ok(HttpResponse::Created().json(conversion))
    } else {
        Ok(HttpResponse::Ok().json(conversion))
    }
}

/// POST /leads/{id}/notes
pub async fn add_note(
    service: web::Data<Arc<LeadService>>,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<NoteInput>,
) -> Result<HttpResponse, AppError> {
    let note = service
        .add_note(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(note))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/leads")
            .route("", web::get().to(list_leads))
            .route("", web::post().to(create_lead))
            .route("/export", web::get().to(export_leads))
            .service(
                web::resource("/import")
                    .app_data(web::PayloadConfig::new(MAX_IMPORT_BYTES))
                    .route(web::post().to(import_leads)),
            )
            .route("/{id}", web::get().to(get_lead))
            .route("/{id}", web::put().to(update_lead))
            .route("/{id}", web::delete().to(delete_lead))
            .route("/{id}/convert", web::post().to(convert_lead))
            .route("/{id}/notes", web::post().to(add_note)),
    );
}

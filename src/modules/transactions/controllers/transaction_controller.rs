use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::TenantId;
use crate::modules::notes::NoteInput;
use crate::modules::transactions::models::{
    MilestoneInput, PartyInput, TaskInput, TransactionInput, TransactionListQuery,
};
use crate::modules::transactions::services::TransactionService;

type Service = web::Data<Arc<TransactionService>>;

/// GET /transactions
pub async fn list_transactions(
    service: Service,
    tenant_id: TenantId,
    query: web::Query<TransactionListQuery>,
) -> Result<HttpResponse, AppError> {
    let page = service.list_transactions(tenant_id.0, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// POST /transactions
pub async fn create_transaction(
    service: Service,
    tenant_id: TenantId,
    request: web::Json<TransactionInput>,
) -> Result<HttpResponse, AppError> {
    let transaction = service
        .create_transaction(tenant_id.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(transaction))
}

/// GET /transactions/{id}
pub async fn get_transaction(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let detail = service.get_transaction(tenant_id.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// PUT /transactions/{id}
pub async fn update_transaction(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<TransactionInput>,
) -> Result<HttpResponse, AppError> {
    let transaction = service
        .update_transaction(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// DELETE /transactions/{id}
pub async fn delete_transaction(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service
        .delete_transaction(tenant_id.0, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /transactions/{id}/parties
pub async fn add_party(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<PartyInput>,
) -> Result<HttpResponse, AppError> {
    let party = service
        .add_party(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(party))
}

/// DELETE /transactions/{id}/parties/{party_id}
pub async fn delete_party(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (transaction_id, party_id) = path.into_inner();
    service
        .delete_party(tenant_id.0, transaction_id, party_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /transactions/{id}/milestones
pub async fn add_milestone(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<MilestoneInput>,
) -> Result<HttpResponse, AppError> {
    let milestone = service
        .add_milestone(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(milestone))
}

/// POST /transactions/{id}/tasks
pub async fn add_task(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<i64>,
    request: web::Json<TaskInput>,
) -> Result<HttpResponse, AppError> {
    let task = service
        .add_task(tenant_id.0, path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// POST /transactions/{id}/tasks/{task_id}/toggle
pub async fn toggle_task(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (transaction_id, task_id) = path.into_inner();
    let task = service
        .toggle_task(tenant_id.0, transaction_id, task_id)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// DELETE /transactions/{id}/tasks/{task_id}
pub async fn delete_task(
    service: Service,
    tenant_id: TenantId,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (transaction_id, task_id) = path.into_inner();
    service
        .delete_task(tenant_id.0, transaction_id, task_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /transactions/{id}/notes
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

/// Configure transaction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .route("", web::get().to(list_transactions))
            .route("", web::post().to(create_transaction))
            .route("/{id}", web::get().to(get_transaction))
            .route("/{id}", web::put().to(update_transaction))
            .route("/{id}", web::delete().to(delete_transaction))
            .route("/{id}/parties", web::post().to(add_party))
            .route("/{id}/parties/{party_id}", web::delete().to(delete_party))
            .route("/{id}/milestones", web::post().to(add_milestone))
            .route("/{id}/tasks", web::post().to(add_task))
            .route("/{id}/tasks/{task_id}/toggle", web::post().to(toggle_task))
            .route("/{id}/tasks/{task_id}", web::delete().to(delete_task))
            .route("/{id}/notes", web::post().to(add_note)),
    );
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::PaymentService;
use crate::models::payments::requests::PaymentListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_student_payments(
    service: &PaymentService,
    request: &HttpRequest,
    student_id: i64,
    query: PaymentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_student_payments(student_id, query).await {
        Ok(payments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            payments,
            "Payments retrieved successfully",
        ))),
        Err(e) => {
            error!("Failed to list payments for student {}: {}", student_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list payments: {e}"),
                )),
            )
        }
    }
}

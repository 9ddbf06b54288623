use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EnrollmentService;
use crate::models::enrollments::requests::WithdrawStudentsRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn withdraw_students(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    withdraw_data: WithdrawStudentsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if withdraw_data.student_ids.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Student id list must not be empty",
        )));
    }

    match storage
        .withdraw_students(class_id, withdraw_data.student_ids)
        .await
    {
        Ok(summary) => {
            info!(
                "Class {} withdrawal: {} withdrawn, {} not enrolled, {} error(s)",
                class_id, summary.withdrawn, summary.not_enrolled, summary.errors
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(summary, "Withdrawal processed successfully")))
        }
        Err(e) => {
            error!("Withdrawal failed for class {}: {}", class_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Withdrawal failed: {e}"),
                )),
            )
        }
    }
}

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EnrollmentService;
use crate::errors::TuitionError;
use crate::models::enrollments::requests::EnrollStudentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn enroll_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    enroll_data: EnrollStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let student_id = enroll_data.student_id;

    match storage.enroll_student(class_id, enroll_data).await {
        Ok(summary) => {
            info!(
                "Student {} enrolled in class {}, {} payment(s) pre-generated",
                student_id, class_id, summary.payments_created
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(summary, "Student enrolled successfully")))
        }
        Err(e) => Ok(handle_enroll_error(&e)),
    }
}

/// 错误响应辅助函数
fn handle_enroll_error(e: &TuitionError) -> HttpResponse {
    match e {
        TuitionError::ClassNotFound(_) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            e.message(),
        )),
        TuitionError::UserNotFound(_) | TuitionError::NotFound(_) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                e.message(),
            )),
        TuitionError::ClassFull(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassFull,
            e.message(),
        )),
        TuitionError::Conflict(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::DuplicateEnrollment,
            e.message(),
        )),
        TuitionError::ClassClosed(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassUnavailable,
            e.message(),
        )),
        TuitionError::DiscountRange(_) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::DiscountOutOfRange, e.message()),
        ),
        TuitionError::Validation(_) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::ValidationFailed, e.message()),
        ),
        _ => {
            error!("Enrollment failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Enrollment failed: {e}"),
            ))
        }
    }
}

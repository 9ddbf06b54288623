use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AttendanceService;
use crate::errors::TuitionError;
use crate::models::attendance::requests::MarkAttendanceRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    class_id: i64,
    mark_data: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if mark_data.students_attendance.is_empty() {
        return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Student attendance list must not be empty",
        )));
    }

    match storage.mark_class_attendance(class_id, mark_data).await {
        Ok(record) => {
            info!(
                "Attendance marked for class {} on {}, {} student(s)",
                class_id,
                record.lesson_date.format("%Y-%m-%d"),
                record.students.len()
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(record, "Attendance marked successfully")))
        }
        Err(e) => Ok(handle_mark_attendance_error(&e)),
    }
}

/// 错误响应辅助函数
fn handle_mark_attendance_error(e: &TuitionError) -> HttpResponse {
    match e {
        TuitionError::ClassNotFound(_) | TuitionError::NotFound(_) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                e.message(),
            )),
        TuitionError::ScheduleViolation(_) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::ScheduleViolation, e.message()),
        ),
        TuitionError::NotEnrolled(_) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::StudentNotEnrolled, e.message()),
        ),
        TuitionError::ClassClosed(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::ClassUnavailable,
            e.message(),
        )),
        TuitionError::Validation(_) | TuitionError::DateParse(_) => {
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            ))
        }
        _ => {
            error!("Attendance marking failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Attendance marking failed: {e}"),
            ))
        }
    }
}

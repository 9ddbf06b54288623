use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AttendanceService;
use crate::errors::TuitionError;
use crate::models::attendance::requests::AttendanceListQuery;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    class_id: i64,
    query: AttendanceListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_class_attendance(class_id, query).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            records,
            "Attendance records retrieved successfully",
        ))),
        Err(TuitionError::DateParse(msg)) => Ok(HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::BadRequest, msg),
        )),
        Err(e) => {
            error!("Failed to list attendance for class {}: {}", class_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list attendance records: {e}"),
                )),
            )
        }
    }
}

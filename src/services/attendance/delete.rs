use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, warn};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_attendance(attendance_id).await {
        Ok(true) => {
            // 已产生的账单/工资不回滚，留痕便于人工对账
            warn!(
                "Attendance record {} deleted; ledger entries are kept as-is",
                attendance_id
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success_empty("Attendance record deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        ))),
        Err(e) => {
            error!("Failed to delete attendance record {}: {}", attendance_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete attendance record: {e}"),
                )),
            )
        }
    }
}

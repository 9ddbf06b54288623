use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::errors::TuitionError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn assign_teacher(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    teacher_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.assign_teacher(class_id, teacher_id).await {
        Ok(class) => {
            info!("Teacher {} assigned to class {}", teacher_id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Teacher assigned successfully")))
        }
        Err(e) => Ok(handle_assign_teacher_error(&e)),
    }
}

/// 错误响应辅助函数
fn handle_assign_teacher_error(e: &TuitionError) -> HttpResponse {
    match e {
        TuitionError::ClassNotFound(_) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            e.message(),
        )),
        TuitionError::UserNotFound(_) | TuitionError::NotFound(_) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                e.message(),
            )),
        TuitionError::Validation(_) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::ValidationFailed, e.message()),
        ),
        TuitionError::Conflict(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::TeacherOverAssigned,
            e.message(),
        )),
        _ => {
            error!("Teacher assignment failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Teacher assignment failed: {e}"),
            ))
        }
    }
}

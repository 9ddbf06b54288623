use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::errors::TuitionError;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} ({}) created", class.id, class.class_name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(handle_class_create_error(&e)),
    }
}

/// 错误响应辅助函数
fn handle_class_create_error(e: &TuitionError) -> HttpResponse {
    match e {
        TuitionError::Validation(_) | TuitionError::DateParse(_) => HttpResponse::UnprocessableEntity()
            .json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                e.message(),
            )),
        TuitionError::UserNotFound(_) | TuitionError::NotFound(_) => HttpResponse::NotFound()
            .json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                e.message(),
            )),
        TuitionError::Conflict(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::TeacherOverAssigned,
            e.message(),
        )),
        _ => {
            error!("Class creation failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Class creation failed: {e}"),
            ))
        }
    }
}

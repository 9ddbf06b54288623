use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::WageService;
use crate::models::wages::requests::WageListQuery;
use crate::models::wages::responses::TeacherWageResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_teacher_wages(
    service: &WageService,
    request: &HttpRequest,
    teacher_id: i64,
    query: WageListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(month) = query.month {
        if !(1..=12).contains(&month) {
            return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                format!("Month must be between 1 and 12: {month}"),
            )));
        }
    }

    match storage.list_teacher_wages(teacher_id, query).await {
        Ok(wages) => {
            let wages: Vec<TeacherWageResponse> =
                wages.into_iter().map(TeacherWageResponse::from).collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                wages,
                "Wages retrieved successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list wages for teacher {}: {}", teacher_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list wages: {e}"),
                )),
            )
        }
    }
}

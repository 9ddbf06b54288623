use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::attendance::requests::{AttendanceListQuery, MarkAttendanceRequest};
use crate::services::AttendanceService;
use crate::utils::{SafeAttendanceIdI64, SafeClassIdI64};

// 懒加载的全局 ATTENDANCE_SERVICE 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

// HTTP处理程序
pub async fn mark_attendance(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    mark_data: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(&req, class_id.0, mark_data.into_inner())
        .await
}

pub async fn list_attendance(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, class_id.0, query.into_inner())
        .await
}

pub async fn delete_attendance(
    req: HttpRequest,
    attendance_id: SafeAttendanceIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .delete_attendance(&req, attendance_id.0)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/attendance").service(
            web::resource("")
                .route(web::post().to(mark_attendance))
                .route(web::get().to(list_attendance)),
        ),
    );
    cfg.service(
        web::scope("/api/v1/attendance")
            .service(web::resource("/{attendance_id}").route(web::delete().to(delete_attendance))),
    );
}

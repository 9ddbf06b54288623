use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::enrollments::requests::{EnrollStudentRequest, WithdrawStudentsRequest};
use crate::services::EnrollmentService;
use crate::utils::SafeClassIdI64;

// 懒加载的全局 ENROLLMENT_SERVICE 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// HTTP处理程序
pub async fn enroll_student(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .enroll_student(&req, class_id.0, enroll_data.into_inner())
        .await
}

pub async fn withdraw_students(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    withdraw_data: web::Json<WithdrawStudentsRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .withdraw_students(&req, class_id.0, withdraw_data.into_inner())
        .await
}

// 配置路由
pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/students").service(
            web::resource("")
                .route(web::post().to(enroll_student))
                // 批量退班，请求体携带学生ID列表
                .route(web::delete().to(withdraw_students)),
        ),
    );
}

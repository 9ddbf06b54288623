use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::wages::requests::WageListQuery;
use crate::services::WageService;
use crate::utils::SafeTeacherIdI64;

// 懒加载的全局 WAGE_SERVICE 实例
static WAGE_SERVICE: Lazy<WageService> = Lazy::new(WageService::new_lazy);

// HTTP处理程序
pub async fn list_teacher_wages(
    req: HttpRequest,
    teacher_id: SafeTeacherIdI64,
    query: web::Query<WageListQuery>,
) -> ActixResult<HttpResponse> {
    WAGE_SERVICE
        .list_teacher_wages(&req, teacher_id.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_wage_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers/{teacher_id}/wages")
            .service(web::resource("").route(web::get().to(list_teacher_wages))),
    );
}

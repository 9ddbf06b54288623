use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::payments::requests::{PaymentListQuery, RecordPaymentRequest};
use crate::services::PaymentService;
use crate::utils::{SafePaymentIdI64, SafeStudentIdI64};

// 懒加载的全局 PAYMENT_SERVICE 实例
static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

// HTTP处理程序
pub async fn record_payment(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
    payment_data: web::Json<RecordPaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .record_payment(&req, payment_id.0, payment_data.into_inner().amount)
        .await
}

pub async fn get_payment(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_payment(&req, payment_id.0).await
}

pub async fn list_student_payments(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<PaymentListQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .list_student_payments(&req, student_id.0, query.into_inner())
        .await
}

// 配置路由
pub fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .service(web::resource("/{payment_id}").route(web::get().to(get_payment)))
            .service(
                web::resource("/{payment_id}/records").route(web::post().to(record_payment)),
            ),
    );
    cfg.service(
        web::scope("/api/v1/students/{student_id}/payments")
            .service(web::resource("").route(web::get().to(list_student_payments))),
    );
}

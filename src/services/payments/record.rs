use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::PaymentService;
use crate::errors::TuitionError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn record_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment_id: i64,
    amount: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.record_payment(payment_id, amount).await {
        Ok(payment) => {
            info!(
                "Payment of {} recorded on bill {}, outstanding {}",
                amount,
                payment_id,
                payment.outstanding_balance()
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(payment, "Payment recorded successfully")))
        }
        Err(TuitionError::Validation(msg)) => Ok(HttpResponse::UnprocessableEntity().json(
            ApiResponse::error_empty(ErrorCode::PaymentAmountInvalid, msg),
        )),
        Err(TuitionError::NotFound(msg)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::PaymentNotFound, msg),
        )),
        Err(e) => {
            error!("Failed to record payment on bill {}: {}", payment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to record payment: {e}"),
                )),
            )
        }
    }
}

pub mod get;
pub mod list;
pub mod record;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::PaymentListQuery;
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 登记缴费
    pub async fn record_payment(
        &self,
        req: &HttpRequest,
        payment_id: i64,
        amount: i64,
    ) -> ActixResult<HttpResponse> {
        record::record_payment(self, req, payment_id, amount).await
    }

    // 根据账单 ID 获取账单（含缴费流水）
    pub async fn get_payment(
        &self,
        req: &HttpRequest,
        payment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_payment(self, req, payment_id).await
    }

    // 学生账单列表
    pub async fn list_student_payments(
        &self,
        req: &HttpRequest,
        student_id: i64,
        query: PaymentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_student_payments(self, req, student_id, query).await
    }
}

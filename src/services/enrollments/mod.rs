pub mod enroll;
pub mod withdraw;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{EnrollStudentRequest, WithdrawStudentsRequest};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 学生报名
    pub async fn enroll_student(
        &self,
        req: &HttpRequest,
        class_id: i64,
        enroll_data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, req, class_id, enroll_data).await
    }

    // 批量退班
    pub async fn withdraw_students(
        &self,
        req: &HttpRequest,
        class_id: i64,
        withdraw_data: WithdrawStudentsRequest,
    ) -> ActixResult<HttpResponse> {
        withdraw::withdraw_students(self, req, class_id, withdraw_data).await
    }
}

pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::wages::requests::WageListQuery;
use crate::storage::Storage;

pub struct WageService {
    storage: Option<Arc<dyn Storage>>,
}

impl WageService {
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

    // 教师工资列表
    pub async fn list_teacher_wages(
        &self,
        req: &HttpRequest,
        teacher_id: i64,
        query: WageListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_teacher_wages(self, req, teacher_id, query).await
    }
}

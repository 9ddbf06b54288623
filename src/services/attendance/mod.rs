pub mod delete;
pub mod list;
pub mod mark;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{AttendanceListQuery, MarkAttendanceRequest};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 点名（创建/修改当日点名记录并联动账单和工资）
    pub async fn mark_attendance(
        &self,
        req: &HttpRequest,
        class_id: i64,
        mark_data: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, req, class_id, mark_data).await
    }

    // 班级点名记录列表
    pub async fn list_attendance(
        &self,
        req: &HttpRequest,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, req, class_id, query).await
    }

    // 删除点名记录
    pub async fn delete_attendance(
        &self,
        req: &HttpRequest,
        attendance_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, req, attendance_id).await
    }
}

use std::sync::Arc;

use crate::models::{
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceListQuery, MarkAttendanceRequest},
    },
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
        responses::ClassDetailResponse,
    },
    enrollments::{
        requests::EnrollStudentRequest,
        responses::{EnrollmentSummary, WithdrawSummary},
    },
    payments::{entities::Payment, requests::PaymentListQuery},
    users::{entities::User, requests::CreateUserRequest},
    wages::{entities::TeacherWage, requests::WageListQuery},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法（花名册，外部协作方的最小面）
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 获取班级详情（含在读学生ID列表）
    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetailResponse>>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 结课（软删除）
    async fn close_class(&self, class_id: i64) -> Result<bool>;
    // 指派授课教师（同一教师最多同时带 5 个班）
    async fn assign_teacher(&self, class_id: i64, teacher_id: i64) -> Result<Class>;

    /// 报名管理方法
    // 学生报名：建立花名册关联并按课表逐月预生成学费账单
    async fn enroll_student(
        &self,
        class_id: i64,
        enroll: EnrollStudentRequest,
    ) -> Result<EnrollmentSummary>;
    // 批量退班：未缴费账单删除，部分缴费打标保留，缴清的不动
    async fn withdraw_students(
        &self,
        class_id: i64,
        student_ids: Vec<i64>,
    ) -> Result<WithdrawSummary>;

    /// 考勤方法
    // 点名：创建/修改当日点名记录并联动学费账单与教师工资（单事务）
    async fn mark_class_attendance(
        &self,
        class_id: i64,
        mark: MarkAttendanceRequest,
    ) -> Result<AttendanceRecord>;
    // 列出班级点名记录
    async fn list_class_attendance(
        &self,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>>;
    // 管理员显式删除点名记录；不回滚已产生的账单/工资
    async fn delete_attendance(&self, attendance_id: i64) -> Result<bool>;

    /// 学费账单方法
    // 登记缴费（追加流水并累加已缴金额）
    async fn record_payment(&self, payment_id: i64, amount: i64) -> Result<Payment>;
    // 通过ID获取账单
    async fn get_payment_by_id(&self, payment_id: i64) -> Result<Option<Payment>>;
    // 列出学生账单
    async fn list_student_payments(
        &self,
        student_id: i64,
        query: PaymentListQuery,
    ) -> Result<Vec<Payment>>;

    /// 教师工资方法
    // 列出教师工资记录
    async fn list_teacher_wages(
        &self,
        teacher_id: i64,
        query: WageListQuery,
    ) -> Result<Vec<TeacherWage>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

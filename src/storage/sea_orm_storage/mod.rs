//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 点名、报名、缴费等核心写入均在单个数据库事务内完成：事务提交前
//! 发生任何错误，整条写入链路一并回滚。

mod attendance;
mod classes;
mod enrollments;
mod payments;
mod users;
mod wages;

use crate::config::AppConfig;
use crate::errors::{Result, TuitionError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TuitionError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TuitionError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TuitionError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TuitionError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TuitionError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_detail(&self, class_id: i64) -> Result<Option<ClassDetailResponse>> {
        self.get_class_detail_impl(class_id).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn close_class(&self, class_id: i64) -> Result<bool> {
        self.close_class_impl(class_id).await
    }

    async fn assign_teacher(&self, class_id: i64, teacher_id: i64) -> Result<Class> {
        self.assign_teacher_impl(class_id, teacher_id).await
    }

    // 报名模块
    async fn enroll_student(
        &self,
        class_id: i64,
        enroll: EnrollStudentRequest,
    ) -> Result<EnrollmentSummary> {
        self.enroll_student_impl(class_id, enroll).await
    }

    async fn withdraw_students(
        &self,
        class_id: i64,
        student_ids: Vec<i64>,
    ) -> Result<WithdrawSummary> {
        self.withdraw_students_impl(class_id, student_ids).await
    }

    // 考勤模块
    async fn mark_class_attendance(
        &self,
        class_id: i64,
        mark: MarkAttendanceRequest,
    ) -> Result<AttendanceRecord> {
        self.mark_class_attendance_impl(class_id, mark).await
    }

    async fn list_class_attendance(
        &self,
        class_id: i64,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_class_attendance_impl(class_id, query).await
    }

    async fn delete_attendance(&self, attendance_id: i64) -> Result<bool> {
        self.delete_attendance_impl(attendance_id).await
    }

    // 学费账单模块
    async fn record_payment(&self, payment_id: i64, amount: i64) -> Result<Payment> {
        self.record_payment_impl(payment_id, amount).await
    }

    async fn get_payment_by_id(&self, payment_id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(payment_id).await
    }

    async fn list_student_payments(
        &self,
        student_id: i64,
        query: PaymentListQuery,
    ) -> Result<Vec<Payment>> {
        self.list_student_payments_impl(student_id, query).await
    }

    // 教师工资模块
    async fn list_teacher_wages(
        &self,
        teacher_id: i64,
        query: WageListQuery,
    ) -> Result<Vec<TeacherWage>> {
        self.list_teacher_wages_impl(teacher_id, query).await
    }
}

#[cfg(test)]
mod test_support {
    use super::SeaOrmStorage;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    /// 内存 SQLite 存储；限制单连接，保证所有语句落在同一个库上
    pub(super) async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    pub(super) async fn create_student(storage: &SeaOrmStorage, name: &str) -> i64 {
        create_user(storage, name, UserRole::Student).await
    }

    pub(super) async fn create_teacher(storage: &SeaOrmStorage, name: &str) -> i64 {
        create_user(storage, name, UserRole::Teacher).await
    }

    async fn create_user(storage: &SeaOrmStorage, name: &str, role: UserRole) -> i64 {
        storage
            .create_user_impl(CreateUserRequest {
                display_name: name.to_string(),
                role,
            })
            .await
            .expect("create user")
            .id
    }

    /// 周一三五上课的班级，开课日 2030-03-01
    /// （2030 年 3 月和 4 月各 13 节课，5 月 14 节）
    pub(super) async fn create_scheduled_class(
        storage: &SeaOrmStorage,
        teacher_id: Option<i64>,
        end_date: &str,
    ) -> i64 {
        storage
            .create_class_impl(CreateClassRequest {
                class_name: "数学强化班".to_string(),
                teacher_id,
                fee_per_lesson: 100_000,
                wage_per_lesson: 150_000,
                max_students: 30,
                schedule_start_date: Some("2030-03-01".to_string()),
                schedule_end_date: Some(end_date.to_string()),
                days_of_lesson_in_week: Some(vec![1, 3, 5]),
            })
            .await
            .expect("create class")
            .id
    }
}

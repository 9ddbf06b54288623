//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod attendance_records;
pub mod attendance_students;
pub mod class_students;
pub mod classes;
pub mod payment_records;
pub mod payments;
pub mod teacher_wages;
pub mod users;

//! 预导入模块，方便使用

pub use super::attendance_records::{
    ActiveModel as AttendanceRecordActiveModel, Entity as AttendanceRecords,
    Model as AttendanceRecordModel,
};
pub use super::attendance_students::{
    ActiveModel as AttendanceStudentActiveModel, Entity as AttendanceStudents,
    Model as AttendanceStudentModel,
};
pub use super::class_students::{
    ActiveModel as ClassStudentActiveModel, Entity as ClassStudents, Model as ClassStudentModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::payment_records::{
    ActiveModel as PaymentRecordActiveModel, Entity as PaymentRecords, Model as PaymentRecordModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::teacher_wages::{
    ActiveModel as TeacherWageActiveModel, Entity as TeacherWages, Model as TeacherWageModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};

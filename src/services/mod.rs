pub mod attendance;
pub mod classes;
pub mod enrollments;
pub mod payments;
pub mod users;
pub mod wages;

pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use enrollments::EnrollmentService;
pub use payments::PaymentService;
pub use users::UserService;
pub use wages::WageService;

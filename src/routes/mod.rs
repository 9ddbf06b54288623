pub mod attendance;

pub mod classes;

pub mod enrollments;

pub mod payments;

pub mod users;

pub mod wages;

pub use attendance::configure_attendance_routes;
pub use classes::configure_classes_routes;
pub use enrollments::configure_enrollment_routes;
pub use payments::configure_payment_routes;
pub use users::configure_user_routes;
pub use wages::configure_wage_routes;

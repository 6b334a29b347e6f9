pub mod academic_years;
pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod exports;
pub mod files;
pub mod frontend;
pub mod grade_scales;
pub mod public;
pub mod results;
pub mod semesters;
pub mod students;
pub mod subjects;
pub mod users;

pub use academic_years::configure_academic_year_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use enrollments::configure_enrollment_routes;
pub use exports::configure_export_routes;
pub use files::configure_file_routes;
pub use frontend::configure_frontend_routes;
pub use grade_scales::configure_grade_scale_routes;
pub use public::configure_public_routes;
pub use results::configure_result_routes;
pub use semesters::configure_semester_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use users::configure_user_routes;

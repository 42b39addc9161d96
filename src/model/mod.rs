pub use self::grade::{Grade, ProjectGrade, StudentGrade};
pub use self::project::Project;
pub use self::student::Student;

mod grade;
mod project;
mod student;

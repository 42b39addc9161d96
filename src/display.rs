use crate::model::{Project, ProjectGrade, Student, StudentGrade};

pub fn student_details(s: &Student) -> String {
    format!("Student: {}\nGitHub account: {}", s, s.github)
}

pub fn student_added(first_name: &str, last_name: &str) -> String {
    format!("Successfully added student: {first_name} {last_name}")
}

pub fn project_details(p: &Project) -> String {
    format!(
        "Project Title: {}\nDescription: {}\nMax Grade: {}",
        p.title, p.description, p.max_grade
    )
}

pub fn project_added() -> String {
    "Successfully added project".to_owned()
}

pub fn grade(github: &str, title: &str, grade: i64) -> String {
    format!("{github} got {grade} on their project {title}")
}

pub fn grade_assigned(github: &str, title: &str, grade: i64) -> String {
    format!("Successfully added a grade: {github} got {grade} on their project {title}")
}

pub fn student_grades(github: &str, grades: &[ProjectGrade]) -> String {
    if grades.is_empty() {
        return format!("{github} has not been graded yet");
    }
    grades
        .iter()
        .map(|g| self::grade(github, &g.project_title, g.grade))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn project_grades(title: &str, grades: &[StudentGrade]) -> String {
    if grades.is_empty() {
        return format!("Nobody has been graded on project {title} yet");
    }
    grades
        .iter()
        .map(|g| format!("{} got {} on project {}", g.student_github, g.grade, title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn students_and_projects(students: &[String], projects: &[String]) -> String {
    let mut lines = vec!["Students:".to_owned()];
    lines.extend(students.iter().map(|s| format!("  - {s}")));
    lines.push("Projects:".to_owned());
    lines.extend(projects.iter().map(|p| format!("  - {p}")));
    lines.join("\n")
}

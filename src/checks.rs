use crate::error::Error;
use crate::model::Grade;
use crate::store::Store;
use std::fmt;
use tracing::warn;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DuplicateGrade {
    pub github: String,
    pub title: String,
    pub count: i64,
}

/// Grades which do not fit the data model: dangling references to a student
/// or a project, and students graded more than once for the same project.
#[derive(Debug, Default)]
pub struct Report {
    pub unknown_students: Vec<Grade>,
    pub unknown_projects: Vec<Grade>,
    pub duplicates: Vec<DuplicateGrade>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.unknown_students.is_empty()
            && self.unknown_projects.is_empty()
            && self.duplicates.is_empty()
    }
}

pub async fn check_consistency(store: &Store) -> Result<Report, Error> {
    let report = Report {
        unknown_students: store.grades_without_student().await?,
        unknown_projects: store.grades_without_project().await?,
        duplicates: store.duplicated_grades().await?,
    };
    for g in &report.unknown_students {
        warn!(github = %g.student_github, title = %g.project_title, "grade for unknown student");
    }
    for g in &report.unknown_projects {
        warn!(github = %g.student_github, title = %g.project_title, "grade for unknown project");
    }
    for d in &report.duplicates {
        warn!(github = %d.github, title = %d.title, count = d.count, "student graded more than once");
    }
    Ok(report)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "No inconsistency found");
        }
        let mut sections = Vec::new();
        if !self.unknown_students.is_empty() {
            let mut s = String::from("Grades for unknown students:");
            for g in &self.unknown_students {
                s += &format!("\n  - {} got {} on project {}", g.student_github, g.grade, g.project_title);
            }
            sections.push(s);
        }
        if !self.unknown_projects.is_empty() {
            let mut s = String::from("Grades for unknown projects:");
            for g in &self.unknown_projects {
                s += &format!("\n  - {} got {} on project {}", g.student_github, g.grade, g.project_title);
            }
            sections.push(s);
        }
        if !self.duplicates.is_empty() {
            let mut s = String::from("Students graded more than once:");
            for d in &self.duplicates {
                s += &format!("\n  - {} on project {} ({} grades)", d.github, d.title, d.count);
            }
            sections.push(s);
        }
        write!(f, "{}", sections.join("\n"))
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::store::tests::{hackbright_store, memory_store};

    #[tokio::test]
    async fn clean_database() {
        let store = hackbright_store().await;
        store.assign_grade("jhacker", "Tic-Tac-Toe", 90).await.unwrap();
        let report = check_consistency(&store).await.unwrap();
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "No inconsistency found");
    }

    #[tokio::test]
    async fn dangling_and_duplicated_grades() {
        let store = memory_store(false).await;
        store.create_student("Jane", "Hacker", "jhacker").await.unwrap();
        store.assign_grade("jhacker", "Markov", 40).await.unwrap();
        store.assign_grade("jhacker", "Markov", 42).await.unwrap();
        store.assign_grade("nobody", "Markov", 10).await.unwrap();
        let report = check_consistency(&store).await.unwrap();
        assert_eq!(report.unknown_students.len(), 1);
        assert_eq!(report.unknown_students[0].student_github, "nobody");
        assert_eq!(report.unknown_projects.len(), 3);
        assert_eq!(
            report.duplicates,
            vec![DuplicateGrade {
                github: "jhacker".into(),
                title: "Markov".into(),
                count: 2,
            }]
        );
        assert!(report.to_string().contains("  - nobody got 10 on project Markov"));
    }
}

/// A grade as stored, linking a student to a project by their identifiers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grade {
    pub student_github: String,
    pub project_title: String,
    pub grade: i64,
}

/// One line of a student's report card.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct ProjectGrade {
    pub project_title: String,
    pub grade: i64,
}

/// One line of a project's grade sheet.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct StudentGrade {
    pub student_github: String,
    pub grade: i64,
}

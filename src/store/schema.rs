/// Tables, in creation order. No key is declared: students and projects are
/// referenced by their GitHub account and title.
pub const TABLES: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS students (
        first_name VARCHAR(30),
        last_name VARCHAR(30),
        github VARCHAR(30)
    )",
    "CREATE TABLE IF NOT EXISTS projects (
        title VARCHAR(30),
        description TEXT,
        max_grade BIGINT
    )",
    "CREATE TABLE IF NOT EXISTS grades (
        student_github VARCHAR(30),
        project_title VARCHAR(30),
        grade BIGINT
    )",
];

use crate::checks::DuplicateGrade;
use crate::config::{Config, DatabaseConfig};
use crate::error::{Error, Missing};
use crate::model::{Grade, Project, ProjectGrade, Student, StudentGrade};
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyConnection, AnyPool, Row};
use tracing::{debug, info, instrument};

pub use self::dialect::Dialect;

mod dialect;
mod schema;

/// Access to the students, projects and grades tables. Every operation
/// borrows a connection from the pool for the duration of its statement.
pub struct Store {
    pool: AnyPool,
    dialect: Dialect,
    check_references: bool,
}

impl Store {
    pub async fn connect(config: &Config, dialect: Dialect) -> Result<Self, Error> {
        let DatabaseConfig {
            url,
            max_connections,
            create_schema,
        } = &config.database;
        sqlx::any::install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(*max_connections)
            .connect(url)
            .await?;
        debug!(?dialect, max_connections, "connected to database");
        let store = Self {
            pool,
            dialect,
            check_references: config.grades.check_references,
        };
        if *create_schema {
            store.create_schema().await?;
        }
        Ok(store)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn create_schema(&self) -> Result<(), Error> {
        for table in schema::TABLES {
            sqlx::query(table).execute(&self.pool).await?;
        }
        info!("database schema is ready");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_student_by_github(&self, github: &str) -> Result<Student, Error> {
        let query = self
            .dialect
            .prepare("SELECT first_name, last_name, github FROM students WHERE github = ?");
        sqlx::query(&query)
            .bind(github)
            .try_map(|row: AnyRow| {
                Ok(Student {
                    first_name: row.try_get("first_name")?,
                    last_name: row.try_get("last_name")?,
                    github: row.try_get("github")?,
                })
            })
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(Missing::Student(github.to_owned())))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn create_student(
        &self,
        first_name: &str,
        last_name: &str,
        github: &str,
    ) -> Result<(), Error> {
        let query = self
            .dialect
            .prepare("INSERT INTO students (first_name, last_name, github) VALUES (?, ?, ?)");
        let mut trans = self.pool.begin().await?;
        sqlx::query(&query)
            .bind(first_name)
            .bind(last_name)
            .bind(github)
            .execute(&mut *trans)
            .await?;
        trans.commit().await?;
        info!(github, "student added");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_project_by_title(&self, title: &str) -> Result<Project, Error> {
        let query = self
            .dialect
            .prepare("SELECT title, description, max_grade FROM projects WHERE title = ?");
        sqlx::query(&query)
            .bind(title)
            .try_map(|row: AnyRow| {
                Ok(Project {
                    title: row.try_get("title")?,
                    description: row.try_get("description")?,
                    max_grade: row.try_get("max_grade")?,
                })
            })
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(Missing::Project(title.to_owned())))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn create_project(
        &self,
        title: &str,
        max_grade: i64,
        description: &str,
    ) -> Result<(), Error> {
        let query = self
            .dialect
            .prepare("INSERT INTO projects (title, max_grade, description) VALUES (?, ?, ?)");
        let mut trans = self.pool.begin().await?;
        sqlx::query(&query)
            .bind(title)
            .bind(max_grade)
            .bind(description)
            .execute(&mut *trans)
            .await?;
        trans.commit().await?;
        info!(title, "project added");
        Ok(())
    }

    /// Grade of a student for a project. If the student has been graded
    /// several times for this project, any of those grades may be returned.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_grade(&self, github: &str, title: &str) -> Result<i64, Error> {
        let query = self
            .dialect
            .prepare("SELECT grade FROM grades WHERE student_github = ? AND project_title = ?");
        sqlx::query(&query)
            .bind(github)
            .bind(title)
            .try_map(|row: AnyRow| row.try_get::<i64, _>("grade"))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                Error::NotFound(Missing::Grade {
                    github: github.to_owned(),
                    title: title.to_owned(),
                })
            })
    }

    /// Record a grade. Grading the same student twice for the same project
    /// adds a second grade. When reference checks are enabled, the student
    /// and the project must exist.
    #[instrument(level = "debug", skip(self))]
    pub async fn assign_grade(&self, github: &str, title: &str, grade: i64) -> Result<(), Error> {
        let mut trans = self.pool.begin().await?;
        if self.check_references {
            if !self
                .exists(&mut trans, "SELECT github FROM students WHERE github = ?", github)
                .await?
            {
                return Err(Error::NotFound(Missing::Student(github.to_owned())));
            }
            if !self
                .exists(&mut trans, "SELECT title FROM projects WHERE title = ?", title)
                .await?
            {
                return Err(Error::NotFound(Missing::Project(title.to_owned())));
            }
        }
        let query = self.dialect.prepare(
            "INSERT INTO grades (student_github, project_title, grade) VALUES (?, ?, ?)",
        );
        sqlx::query(&query)
            .bind(github)
            .bind(title)
            .bind(grade)
            .execute(&mut *trans)
            .await?;
        trans.commit().await?;
        info!(github, title, grade, "grade assigned");
        Ok(())
    }

    async fn exists(&self, conn: &mut AnyConnection, query: &str, key: &str) -> Result<bool, Error> {
        let query = self.dialect.prepare(query);
        Ok(sqlx::query(&query)
            .bind(key)
            .fetch_optional(conn)
            .await?
            .is_some())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_all_grades_for_student(&self, github: &str) -> Result<Vec<ProjectGrade>, Error> {
        let query = self
            .dialect
            .prepare("SELECT project_title, grade FROM grades WHERE student_github = ?");
        Ok(sqlx::query(&query)
            .bind(github)
            .try_map(|row: AnyRow| {
                Ok(ProjectGrade {
                    project_title: row.try_get("project_title")?,
                    grade: row.try_get("grade")?,
                })
            })
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_all_grades_for_project(&self, title: &str) -> Result<Vec<StudentGrade>, Error> {
        let query = self
            .dialect
            .prepare("SELECT student_github, grade FROM grades WHERE project_title = ?");
        Ok(sqlx::query(&query)
            .bind(title)
            .try_map(|row: AnyRow| {
                Ok(StudentGrade {
                    student_github: row.try_get("student_github")?,
                    grade: row.try_get("grade")?,
                })
            })
            .fetch_all(&self.pool)
            .await?)
    }

    /// GitHub accounts of all students and titles of all projects.
    #[instrument(level = "debug", skip(self))]
    pub async fn list_students_and_projects(&self) -> Result<(Vec<String>, Vec<String>), Error> {
        let students = sqlx::query("SELECT github FROM students")
            .try_map(|row: AnyRow| row.try_get::<String, _>("github"))
            .fetch_all(&self.pool)
            .await?;
        let projects = sqlx::query("SELECT title FROM projects")
            .try_map(|row: AnyRow| row.try_get::<String, _>("title"))
            .fetch_all(&self.pool)
            .await?;
        Ok((students, projects))
    }

    pub async fn grades_without_student(&self) -> Result<Vec<Grade>, Error> {
        self.load_grades(
            "SELECT g.student_github, g.project_title, g.grade FROM grades g
             LEFT JOIN students s ON s.github = g.student_github
             WHERE s.github IS NULL",
        )
        .await
    }

    pub async fn grades_without_project(&self) -> Result<Vec<Grade>, Error> {
        self.load_grades(
            "SELECT g.student_github, g.project_title, g.grade FROM grades g
             LEFT JOIN projects p ON p.title = g.project_title
             WHERE p.title IS NULL",
        )
        .await
    }

    async fn load_grades(&self, query: &str) -> Result<Vec<Grade>, Error> {
        Ok(sqlx::query(query)
            .try_map(|row: AnyRow| {
                Ok(Grade {
                    student_github: row.try_get("student_github")?,
                    project_title: row.try_get("project_title")?,
                    grade: row.try_get("grade")?,
                })
            })
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn duplicated_grades(&self) -> Result<Vec<DuplicateGrade>, Error> {
        Ok(sqlx::query(
            "SELECT student_github, project_title, COUNT(*) AS n FROM grades
             GROUP BY student_github, project_title
             HAVING COUNT(*) > 1",
        )
        .try_map(|row: AnyRow| {
            Ok(DuplicateGrade {
                github: row.try_get("student_github")?,
                title: row.try_get("project_title")?,
                count: row.try_get("n")?,
            })
        })
        .fetch_all(&self.pool)
        .await?)
    }
}

use crate::checks;
use crate::command::{Command, HELP};
use crate::display;
use crate::error::Error;
use crate::store::Store;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

pub const PROMPT: &str = "HBA Database> ";

/// Run a command against the store and return the text to show.
pub async fn execute(store: &Store, command: &Command) -> Result<String, Error> {
    debug!(?command, "executing");
    Ok(match command {
        Command::Student { github } => {
            display::student_details(&store.get_student_by_github(github).await?)
        }
        Command::NewStudent {
            first_name,
            last_name,
            github,
        } => {
            store.create_student(first_name, last_name, github).await?;
            display::student_added(first_name, last_name)
        }
        Command::GetProject { title } => {
            display::project_details(&store.get_project_by_title(title).await?)
        }
        Command::GetGrade { github, title } => {
            display::grade(github, title, store.get_grade(github, title).await?)
        }
        Command::AssignGrade {
            github,
            title,
            grade,
        } => {
            store.assign_grade(github, title, *grade).await?;
            display::grade_assigned(github, title, *grade)
        }
        Command::NewProject {
            title,
            max_grade,
            description,
        } => {
            store.create_project(title, *max_grade, description).await?;
            display::project_added()
        }
        Command::GetAllGrades { github } => {
            display::student_grades(github, &store.get_all_grades_for_student(github).await?)
        }
        Command::ProjectGrades { title } => {
            display::project_grades(title, &store.get_all_grades_for_project(title).await?)
        }
        Command::List => {
            let (students, projects) = store.list_students_and_projects().await?;
            display::students_and_projects(&students, &projects)
        }
        Command::Check => checks::check_consistency(store).await?.to_string(),
        Command::Help => HELP.to_owned(),
        Command::Quit => String::new(),
    })
}

/// Read commands from `input` until `quit` or end of input. Failures are
/// reported to the user and do not stop the loop.
pub async fn run<R, W>(store: &Store, input: R, output: &mut W) -> eyre::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        match execute(store, &command).await {
            Ok(text) => writeln!(output, "{text}")?,
            Err(Error::Database(e)) => {
                error!(%e, ?command, "database error");
                writeln!(output, "Error: {e}")?;
            }
            Err(e) => writeln!(output, "{e}")?,
        }
    }
    Ok(())
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::store::tests::{hackbright_store, memory_store};

    async fn session(store: &Store, input: &str) -> String {
        let mut output = Vec::new();
        run(store, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn original_session() {
        let store = memory_store(true).await;
        let output = session(
            &store,
            "new_student Jane Hacker jhacker\n\
             student jhacker\n\
             new_project Tic-Tac-Toe 100 Build a tic-tac-toe game\n\
             get_project Tic-Tac-Toe\n\
             assign_grade jhacker Tic-Tac-Toe 90\n\
             get_grade jhacker Tic-Tac-Toe\n\
             get_all_grades jhacker\n\
             quit\n\
             student jhacker\n",
        )
        .await;
        let expected = [
            "Successfully added student: Jane Hacker",
            "Student: Jane Hacker\nGitHub account: jhacker",
            "Successfully added project",
            "Project Title: Tic-Tac-Toe\nDescription: Build a tic-tac-toe game\nMax Grade: 100",
            "Successfully added a grade: jhacker got 90 on their project Tic-Tac-Toe",
            "jhacker got 90 on their project Tic-Tac-Toe",
            "jhacker got 90 on their project Tic-Tac-Toe",
        ]
        .iter()
        .map(|s| format!("{PROMPT}{s}\n"))
        .collect::<String>()
            + PROMPT;
        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn errors_do_not_stop_the_session() {
        let store = hackbright_store().await;
        let output = session(
            &store,
            "frobnicate\n\
             \n\
             student\n\
             student nobody\n\
             assign_grade jhacker Tic-Tac-Toe A+\n\
             get_grade jhacker Tic-Tac-Toe\n",
        )
        .await;
        assert!(output.contains("Invalid Entry. Try again.\n"));
        assert!(output.contains("student expects 1 argument(s), got 0\n"));
        assert!(output.contains("no student with GitHub account nobody\n"));
        assert!(output.contains("grade must be an integer, got \"A+\"\n"));
        assert!(output.contains("jhacker has no grade for project Tic-Tac-Toe\n"));
        assert!(output.ends_with(&format!("{PROMPT}\n")));
    }

    #[tokio::test]
    async fn listing_commands() {
        let store = hackbright_store().await;
        store.assign_grade("jhacker", "Tic-Tac-Toe", 90).await.unwrap();
        assert_eq!(
            execute(&store, &Command::List).await.unwrap(),
            "Students:\n  - jhacker\nProjects:\n  - Tic-Tac-Toe"
        );
        assert_eq!(
            execute(
                &store,
                &Command::ProjectGrades {
                    title: "Tic-Tac-Toe".into()
                }
            )
            .await
            .unwrap(),
            "jhacker got 90 on project Tic-Tac-Toe"
        );
        assert_eq!(
            execute(&store, &Command::Check).await.unwrap(),
            "No inconsistency found"
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let store = hackbright_store().await;
        let err = execute(
            &store,
            &Command::GetProject {
                title: "Markov".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}

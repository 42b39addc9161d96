/// A console command with its arguments checked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Student {
        github: String,
    },
    NewStudent {
        first_name: String,
        last_name: String,
        github: String,
    },
    GetProject {
        title: String,
    },
    GetGrade {
        github: String,
        title: String,
    },
    AssignGrade {
        github: String,
        title: String,
        grade: i64,
    },
    NewProject {
        title: String,
        max_grade: i64,
        description: String,
    },
    GetAllGrades {
        github: String,
    },
    ProjectGrades {
        title: String,
    },
    List,
    Check,
    Help,
    Quit,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid Entry. Try again.")]
    Unknown(String),
    #[error("{command} expects {expected} argument(s), got {found}")]
    Arity {
        command: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("{name} must be an integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

pub const HELP: &str = "\
Commands:
  student <github>
  new_student <first_name> <last_name> <github>
  get_project <title>
  new_project <title> <max_grade> <description...>
  get_grade <github> <title>
  assign_grade <github> <title> <grade>
  get_all_grades <github>
  project_grades <title>
  list
  check
  help
  quit";

/// Number of arguments each command expects.
fn expected_arguments(name: &str) -> Option<(&'static str, &'static str)> {
    Some(match name {
        "student" => ("student", "1"),
        "new_student" => ("new_student", "3"),
        "get_project" => ("get_project", "1"),
        "get_grade" => ("get_grade", "2"),
        "assign_grade" => ("assign_grade", "3"),
        "new_project" => ("new_project", "at least 2"),
        "get_all_grades" => ("get_all_grades", "1"),
        "project_grades" => ("project_grades", "1"),
        "list" => ("list", "no"),
        "check" => ("check", "no"),
        _ => return None,
    })
}

fn number(name: &'static str, value: &str) -> Result<i64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        name,
        value: value.to_owned(),
    })
}

impl Command {
    /// Parse a console line. Blank lines give `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        let Some((&name, args)) = tokens.split_first() else {
            return Ok(None);
        };
        Self::from_tokens(name, args).map(Some)
    }

    pub fn from_tokens(name: &str, args: &[&str]) -> Result<Command, ParseError> {
        let command = match (name, args) {
            ("student", [github]) => Command::Student {
                github: github.to_string(),
            },
            ("new_student", [first_name, last_name, github]) => Command::NewStudent {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                github: github.to_string(),
            },
            ("get_project", [title]) => Command::GetProject {
                title: title.to_string(),
            },
            ("get_grade", [github, title]) => Command::GetGrade {
                github: github.to_string(),
                title: title.to_string(),
            },
            ("assign_grade", [github, title, grade]) => Command::AssignGrade {
                github: github.to_string(),
                title: title.to_string(),
                grade: number("grade", grade)?,
            },
            ("new_project", [title, max_grade, description @ ..]) => Command::NewProject {
                title: title.to_string(),
                max_grade: number("max_grade", max_grade)?,
                description: description.join(" "),
            },
            ("get_all_grades", [github]) => Command::GetAllGrades {
                github: github.to_string(),
            },
            ("project_grades", [title]) => Command::ProjectGrades {
                title: title.to_string(),
            },
            ("list", []) => Command::List,
            ("check", []) => Command::Check,
            ("help", _) => Command::Help,
            ("quit", _) => Command::Quit,
            (name, args) => {
                return Err(match expected_arguments(name) {
                    Some((command, expected)) => ParseError::Arity {
                        command,
                        expected,
                        found: args.len(),
                    },
                    None => ParseError::Unknown(name.to_owned()),
                });
            }
        };
        Ok(command)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub max_grade: i64,
}

#[cfg(test)]
impl Project {
    pub fn new(title: &str, description: &str, max_grade: i64) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            max_grade,
        }
    }
}

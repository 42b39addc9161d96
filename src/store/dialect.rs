use std::borrow::Cow;

/// SQL flavour spoken by the database behind the connection URL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dialect {
    Sqlite,
    Postgres,
    MySql,
}

impl Dialect {
    pub fn from_url(url: &str) -> Option<Self> {
        match url.split_once(':').map(|(scheme, _)| scheme) {
            Some("sqlite") => Some(Dialect::Sqlite),
            Some("postgres" | "postgresql") => Some(Dialect::Postgres),
            Some("mysql" | "mariadb") => Some(Dialect::MySql),
            _ => None,
        }
    }

    /// Queries are written with `?` placeholders, PostgreSQL wants them numbered.
    pub fn prepare(self, query: &str) -> Cow<'_, str> {
        match self {
            Dialect::Sqlite | Dialect::MySql => Cow::Borrowed(query),
            Dialect::Postgres => {
                let mut n = 0;
                let mut result = String::with_capacity(query.len() + 8);
                for c in query.chars() {
                    if c == '?' {
                        n += 1;
                        result.push_str(&format!("${n}"));
                    } else {
                        result.push(c);
                    }
                }
                Cow::Owned(result)
            }
        }
    }
}

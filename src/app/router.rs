//! Client-side routes: the list screen at `/` and a detail screen at `/users/:id`.

use std::fmt::{Display, Formatter};

use crate::api::UserId;

/// Screens reachable by path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(UserId),
}

impl Route {
    /// Parse a path. Trailing slashes are tolerated; unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::List);
        }
        let id = trimmed.strip_prefix("/users/")?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::Detail(UserId::from(id)))
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/users/{id}"),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_routes() {
        assert_eq!(Route::parse("/"), Some(Route::List));
        assert_eq!(Route::parse(""), Some(Route::List));
        assert_eq!(Route::parse("/users/1"), Some(Route::Detail(UserId::Number(1))));
        assert_eq!(Route::parse("/users/1/"), Some(Route::Detail(UserId::Number(1))));
        assert_eq!(Route::parse("/users/ab-9"), Some(Route::Detail(UserId::Text("ab-9".into()))));
    }

    #[test]
    fn rejects_other_paths() {
        assert_eq!(Route::parse("/users"), None);
        assert_eq!(Route::parse("/users/"), None);
        assert_eq!(Route::parse("/users/1/edit"), None);
        assert_eq!(Route::parse("/groups/1"), None);
    }

    #[test]
    fn path_round_trips() {
        for p in ["/", "/users/42", "/users/x"] {
            assert_eq!(Route::parse(p).map(|r| r.path()), Some(p.to_string()));
        }
    }
}

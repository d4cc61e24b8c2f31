use crate::session::SessionContext;

/// Screens reachable in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Categories,
    Words,
    Flashcards,
    Quiz,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Categories => "/categories",
            Route::Words => "/words",
            Route::Flashcards => "/flashcards",
            Route::Quiz => "/quizz",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let route = match normalize(path) {
            "/" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/categories" => Route::Categories,
            "/words" => Route::Words,
            "/flashcards" => Route::Flashcards,
            "/quizz" => Route::Quiz,
            _ => return None,
        };
        Some(route)
    }

    /// Open to visitors without a session
    pub fn is_public(path: &str) -> bool {
        matches!(normalize(path), "/" | "/login" | "/register")
    }
}

/// Where a navigation request ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::Allow(route) | Navigation::Redirect(route) => *route,
        }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Guard a navigation to `path` against the current session.
///
/// Visitors are sent to the login screen for anything outside the public
/// paths; signed-in users are sent home from login and register. Unknown
/// paths land on the home screen.
pub fn resolve(path: &str, session: &SessionContext) -> Navigation {
    let signed_in = session.is_signed_in();

    if !signed_in && !Route::is_public(path) {
        return Navigation::Redirect(Route::Login);
    }

    match Route::from_path(path) {
        Some(Route::Login | Route::Register) if signed_in => Navigation::Redirect(Route::Home),
        Some(route) => Navigation::Allow(route),
        None => Navigation::Redirect(Route::Home),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vocab_types::{Id, SessionUser};

    use super::*;
    use crate::storage::MemoryStorage;

    fn session(signed_in: bool) -> SessionContext {
        let session = SessionContext::new(Arc::new(MemoryStorage::new()), "currentUser");
        if signed_in {
            session
                .sign_in(SessionUser {
                    id: Id::Num(1),
                    full_name: "Ann".into(),
                    email: "ann@example.com".into(),
                    role: "user".into(),
                })
                .unwrap();
        }
        session
    }

    #[test]
    fn test_visitor_is_sent_to_login() {
        let visitor = session(false);
        assert_eq!(resolve("/", &visitor), Navigation::Allow(Route::Home));
        assert_eq!(resolve("/register", &visitor), Navigation::Allow(Route::Register));
        assert_eq!(resolve("/words", &visitor), Navigation::Redirect(Route::Login));
        assert_eq!(resolve("/quizz", &visitor), Navigation::Redirect(Route::Login));
        assert_eq!(resolve("/nowhere", &visitor), Navigation::Redirect(Route::Login));
    }

    #[test]
    fn test_signed_in_user_skips_login() {
        let user = session(true);
        assert_eq!(resolve("/login", &user), Navigation::Redirect(Route::Home));
        assert_eq!(resolve("/register/", &user), Navigation::Redirect(Route::Home));
        assert_eq!(resolve("/flashcards", &user), Navigation::Allow(Route::Flashcards));
        assert_eq!(resolve("/categories?page=2", &user), Navigation::Allow(Route::Categories));
        assert_eq!(resolve("/nowhere", &user), Navigation::Redirect(Route::Home));
    }

    #[test]
    fn test_guard_follows_sign_out() {
        let user = session(true);
        assert_eq!(resolve("/words", &user), Navigation::Allow(Route::Words));
        user.sign_out().unwrap();
        assert_eq!(resolve("/words", &user), Navigation::Redirect(Route::Login));
    }
}

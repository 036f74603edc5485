//! Client-side routes and guarded resolution.
//!
//! Route table: sign-in, auth callback, guarded feed,
//! root redirect, catch-all not-found.

use crate::session::SessionStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    AuthCallback { username: Option<String> },
    Feed,
    Root,
    NotFound,
}

/// What the render layer should do for a route under a session status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
    /// Session check still in flight — render nothing yet.
    Hold,
}

/// Parse a path (plus optional query) into a route.
pub fn parse(path: &str) -> Route {
    let (path, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };
    match path.trim_end_matches('/') {
        "" => Route::Root,
        "/login" => Route::SignIn,
        "/auth/callback" => Route::AuthCallback {
            username: query
                .and_then(|q| crate::auth::param_in(q, "username"))
                .map(|u| crate::auth::decode_component(&u)),
        },
        "/dashboard" => Route::Feed,
        _ => Route::NotFound,
    }
}

/// Guarded resolution. While the session is Unknown no redirect decision
/// is made for guarded or sign-in views.
pub fn resolve(route: &Route, status: &SessionStatus) -> Resolution {
    match route {
        Route::Root => Resolution::Redirect(Route::Feed),
        Route::Feed => match status {
            SessionStatus::Unknown => Resolution::Hold,
            SessionStatus::Authenticated(_) => Resolution::Render(Route::Feed),
            SessionStatus::Unauthenticated => Resolution::Redirect(Route::SignIn),
        },
        Route::SignIn => match status {
            SessionStatus::Unknown => Resolution::Hold,
            // Already signed in: keep authenticated visitors off the sign-in view
            SessionStatus::Authenticated(_) => Resolution::Redirect(Route::Feed),
            SessionStatus::Unauthenticated => Resolution::Render(Route::SignIn),
        },
        Route::AuthCallback { .. } => Resolution::Render(route.clone()),
        Route::NotFound => Resolution::Render(Route::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;

    fn authed() -> SessionStatus {
        SessionStatus::Authenticated(Principal {
            id: "u1".into(),
            email: "a@b.c".into(),
        })
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(parse("/"), Route::Root);
        assert_eq!(parse("/login"), Route::SignIn);
        assert_eq!(parse("/dashboard"), Route::Feed);
        assert_eq!(parse("/nope"), Route::NotFound);
    }

    #[test]
    fn test_parse_callback_decodes_username() {
        let route = parse("/auth/callback?username=John%20Doe");
        assert_eq!(
            route,
            Route::AuthCallback {
                username: Some("John Doe".into())
            }
        );
        assert_eq!(parse("/auth/callback"), Route::AuthCallback { username: None });
    }

    #[test]
    fn test_root_always_redirects_to_feed() {
        assert_eq!(
            resolve(&Route::Root, &SessionStatus::Unknown),
            Resolution::Redirect(Route::Feed)
        );
    }

    #[test]
    fn test_feed_guard_matrix() {
        assert_eq!(resolve(&Route::Feed, &SessionStatus::Unknown), Resolution::Hold);
        assert_eq!(
            resolve(&Route::Feed, &SessionStatus::Unauthenticated),
            Resolution::Redirect(Route::SignIn)
        );
        assert_eq!(resolve(&Route::Feed, &authed()), Resolution::Render(Route::Feed));
    }

    #[test]
    fn test_sign_in_redirects_authenticated_visitors() {
        assert_eq!(resolve(&Route::SignIn, &authed()), Resolution::Redirect(Route::Feed));
        assert_eq!(
            resolve(&Route::SignIn, &SessionStatus::Unauthenticated),
            Resolution::Render(Route::SignIn)
        );
        assert_eq!(resolve(&Route::SignIn, &SessionStatus::Unknown), Resolution::Hold);
    }

    #[test]
    fn test_not_found_is_catch_all() {
        assert_eq!(
            resolve(&Route::NotFound, &SessionStatus::Unknown),
            Resolution::Render(Route::NotFound)
        );
    }
}

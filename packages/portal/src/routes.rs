//! Client-side route table (hash-based).
//!
//! Unmatched paths fall back to home; only the dashboard sits behind the
//! auth gate.

/// All application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Events,
    Workplan,
    Leadership,
    MedicalFund,
    Photos,
    Registration,
    SignIn,
    Dashboard,
}

impl Route {
    /// Resolve a location (with or without the leading `#`) to a route.
    pub fn parse(path: &str) -> Route {
        let path = path.trim_start_matches('#');
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        match path {
            "" | "/" => Route::Home,
            "/events" => Route::Events,
            "/workplan" => Route::Workplan,
            "/leadership" => Route::Leadership,
            "/medical-fund" => Route::MedicalFund,
            "/photos" => Route::Photos,
            "/registration" => Route::Registration,
            "/signin" => Route::SignIn,
            "/dashboard" => Route::Dashboard,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Events => "/events",
            Route::Workplan => "/workplan",
            Route::Leadership => "/leadership",
            Route::MedicalFund => "/medical-fund",
            Route::Photos => "/photos",
            Route::Registration => "/registration",
            Route::SignIn => "/signin",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Whether this route sits behind the auth gate.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/events"), Route::Events);
        assert_eq!(Route::parse("/medical-fund"), Route::MedicalFund);
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
    }

    #[test]
    fn tolerates_hash_prefix_and_trailing_slash() {
        assert_eq!(Route::parse("#/signin"), Route::SignIn);
        assert_eq!(Route::parse("/photos/"), Route::Photos);
        assert_eq!(Route::parse("#/"), Route::Home);
    }

    #[test]
    fn unknown_paths_fall_back_to_home() {
        assert_eq!(Route::parse("/no-such-page"), Route::Home);
        assert_eq!(Route::parse("/dashboard/settings"), Route::Home);
    }

    #[test]
    fn only_dashboard_is_gated() {
        let all = [
            Route::Home,
            Route::Events,
            Route::Workplan,
            Route::Leadership,
            Route::MedicalFund,
            Route::Photos,
            Route::Registration,
            Route::SignIn,
            Route::Dashboard,
        ];
        let gated: Vec<_> = all.iter().filter(|r| r.requires_auth()).collect();
        assert_eq!(gated, vec![&Route::Dashboard]);
    }

    #[test]
    fn paths_round_trip() {
        for route in [Route::Events, Route::Registration, Route::Dashboard] {
            assert_eq!(Route::parse(route.path()), route);
        }
    }
}

//! Client-side routes and the navigation seam.

use crate::models::Role;
use std::fmt;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// The unauthenticated landing page.
    Landing,
    AdminLogin,
    StudentLogin,
    AdminDashboard,
    TeacherDashboard,
    StudentDashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::AdminLogin => "/admin-login",
            Route::StudentLogin => "/student-login",
            Route::AdminDashboard => "/admin-dashboard",
            Route::TeacherDashboard => "/teacher-dashboard",
            Route::StudentDashboard => "/student-dashboard",
        }
    }

    pub fn dashboard(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::Teacher => Route::TeacherDashboard,
            Role::Student => Route::StudentDashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Performs client-side navigation.
pub trait Navigator: Send + Sync + 'static {
    fn navigate(&self, route: Route);
}

/// Forwards navigation requests to a channel the UI drains.
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, route: Route) {
        if self.tx.send(route).is_err() {
            tracing::debug!("navigation to {} dropped: receiver closed", route);
        }
    }
}

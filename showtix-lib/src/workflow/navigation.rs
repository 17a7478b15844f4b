//! Storefront routes and deferred navigation.

use std::fmt;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::model::ShowId;

/// A page of the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The show listing.
    Home,
    /// One show's details.
    ShowDetails(ShowId),
    /// The purchase form for a show.
    Tickets(ShowId),
}

impl Route {
    /// The URL path of this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::ShowDetails(id) => format!("/details/{}", urlencoding::encode(id.as_str())),
            Self::Tickets(id) => format!("/tickets/{}", urlencoding::encode(id.as_str())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A navigation that should happen after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: Route,
    pub delay: Duration,
}

/// Sends `redirect.route` to `navigator` once `redirect.delay` has elapsed.
///
/// Cancelling `cancel` drops the navigation. If the receiving view is gone by
/// the time the delay elapses, the navigation is dropped too.
pub fn schedule_redirect(
    redirect: Redirect,
    navigator: UnboundedSender<Route>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Redirect to {} cancelled", redirect.route);
            }
            _ = tokio::time::sleep(redirect.delay) => {
                let path = redirect.route.path();
                if navigator.send(redirect.route).is_err() {
                    debug!("Redirect to {} dropped, view closed", path);
                }
            }
        }
    })
}

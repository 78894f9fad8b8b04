//! Authorization gate: route-access decisions derived from session and
//! privilege state.
//!
//! DESIGN
//! ======
//! Two derivations with independent loading flags and error channels:
//! `authenticated` tracks the session store, `admin` tracks a remote
//! `is_admin` lookup. Every session transition bumps an epoch so a slow
//! lookup from a previous session can never resolve the current one —
//! stale privilege is discarded, not displayed.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::state::session::SessionSnapshot;

/// Remote-derivation lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Load<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Load<T> {
    fn default() -> Self {
        Self::Loading
    }
}

/// Derived authorization state consumed by the route guards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateState {
    /// False until the session store's initial lookup lands.
    pub session_resolved: bool,
    /// Latest session snapshot carried a session.
    pub authenticated: bool,
    /// Privilege derivation, with its own error channel.
    pub admin: Load<bool>,
    epoch: u64,
}

impl GateState {
    /// Fold a session snapshot into the gate. Every transition invalidates
    /// any in-flight privilege lookup; the returned epoch, when present,
    /// tags the lookup the caller must now issue.
    ///
    /// Without a session the privilege resolves to `false` immediately and
    /// no lookup is requested.
    pub fn apply_session(&mut self, snapshot: &SessionSnapshot) -> Option<u64> {
        self.session_resolved = snapshot.resolved;
        self.authenticated = snapshot.authenticated();
        self.epoch += 1;
        if snapshot.resolved && snapshot.authenticated() {
            self.admin = Load::Loading;
            Some(self.epoch)
        } else if snapshot.resolved {
            self.admin = Load::Ready(false);
            None
        } else {
            self.admin = Load::Loading;
            None
        }
    }

    /// Resolve the privilege lookup tagged `epoch`. Results tagged with an
    /// epoch older than the latest session transition are discarded.
    pub fn apply_admin_result(&mut self, epoch: u64, result: Result<bool, String>) {
        if epoch != self.epoch {
            return;
        }
        self.admin = match result {
            Ok(admin) => Load::Ready(admin),
            Err(reason) => Load::Failed(reason),
        };
    }

    #[must_use]
    pub fn admin_granted(&self) -> bool {
        matches!(self.admin, Load::Ready(true))
    }

    /// Reason the privilege lookup failed, if it did.
    #[must_use]
    pub fn admin_error(&self) -> Option<&str> {
        match &self.admin {
            Load::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Outcome of evaluating a guard against the gate.
///
/// `Pending` renders an indeterminate placeholder: while a derivation is
/// loading, neither the protected content nor the fallback may appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteCheck {
    Pending,
    Redirect(&'static str),
    Grant,
}

/// Authentication guard, evaluated before any privilege concern.
#[must_use]
pub fn check_authenticated(gate: &GateState) -> RouteCheck {
    if !gate.session_resolved {
        RouteCheck::Pending
    } else if gate.authenticated {
        RouteCheck::Grant
    } else {
        RouteCheck::Redirect("/login")
    }
}

/// Privilege guard, composed inside the authentication guard: an absent
/// session redirects to the login screen, while a session without privilege
/// (or with a failed lookup) redirects to the default authenticated screen.
/// The two destinations are deliberately distinct.
#[must_use]
pub fn check_admin(gate: &GateState) -> RouteCheck {
    match check_authenticated(gate) {
        RouteCheck::Grant => match &gate.admin {
            Load::Loading => RouteCheck::Pending,
            Load::Ready(true) => RouteCheck::Grant,
            Load::Ready(false) | Load::Failed(_) => RouteCheck::Redirect("/"),
        },
        other => other,
    }
}

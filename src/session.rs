//! Process-wide session context.
//!
//! Holds the signed-in user and token. Components read it through a cloned
//! handle and may subscribe to sign-in/sign-out notifications.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::table::Capabilities;

/// User kind returned by the login endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    /// Operations this role may perform on regular tables.
    pub fn capabilities(self) -> Capabilities {
        match self {
            Role::Admin => Capabilities::all(),
            Role::Staff => Capabilities::all().with_delete(false),
        }
    }

    /// Personnel records are admin-managed.
    pub fn may_manage_staff(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(SessionData),
    SignedOut,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct Inner {
    current: Option<SessionData>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

/// Cloneable handle to the shared session.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Inner>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("current", &self.get())
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<SessionData> {
        self.read(|inner| inner.current.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.read(|inner| inner.current.as_ref().map(|s| s.token.clone()))
    }

    pub fn role(&self) -> Option<Role> {
        self.read(|inner| inner.current.as_ref().map(|s| s.role))
    }

    pub fn is_signed_in(&self) -> bool {
        self.read(|inner| inner.current.is_some())
    }

    /// Stores the session and notifies subscribers.
    pub fn set(&self, data: SessionData) {
        info!(user = %data.username, role = data.role.name(), "signed in");
        let listeners = self.write(|inner| {
            inner.current = Some(data.clone());
            inner.listeners.iter().map(|(_, l)| l.clone()).collect::<Vec<_>>()
        });
        notify(&listeners, &SessionEvent::SignedIn(data));
    }

    /// Drops the session. Subscribers are notified only if one existed.
    pub fn clear(&self) {
        let (had_session, listeners) = self.write(|inner| {
            let had = inner.current.take().is_some();
            let listeners = inner.listeners.iter().map(|(_, l)| l.clone()).collect::<Vec<_>>();
            (had, listeners)
        });
        if had_session {
            info!("signed out");
            notify(&listeners, &SessionEvent::SignedOut);
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.write(|inner| {
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            inner.listeners.push((id, Arc::new(listener)));
            id
        })
    }

    /// Returns true if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.write(|inner| {
            let before = inner.listeners.len();
            inner.listeners.retain(|(sid, _)| *sid != id);
            inner.listeners.len() != before
        })
    }

    // A panicking listener runs outside the lock, so poisoning only comes from
    // a panic inside these short closures; the data is still consistent.
    fn read<R>(&self, f: impl FnOnce(&Inner) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

fn notify(listeners: &[Listener], event: &SessionEvent) {
    for listener in listeners {
        listener(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn admin() -> SessionData {
        SessionData {
            token: "t0k3n".into(),
            username: "ana".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn get_set_clear() {
        let session = Session::new();
        assert!(!session.is_signed_in());

        session.set(admin());
        assert_eq!(session.token().as_deref(), Some("t0k3n"));
        assert_eq!(session.role(), Some(Role::Admin));

        let clone = session.clone();
        clone.clear();
        assert_eq!(session.get(), None);
    }

    #[test]
    fn subscribers_see_changes_until_unsubscribed() {
        let session = Session::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let id = session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        session.set(admin());
        session.clear();
        session.clear(); // no session: no event

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.set(admin());

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![SessionEvent::SignedIn(admin()), SessionEvent::SignedOut]
        );
    }

    #[test]
    fn listener_may_read_the_session() {
        let session = Session::new();
        let reader = session.clone();
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        session.subscribe(move |_| *sink.lock().unwrap() = reader.token());

        session.set(admin());
        assert_eq!(observed.lock().unwrap().as_deref(), Some("t0k3n"));
    }

    #[test]
    fn staff_cannot_delete() {
        assert!(!Role::Staff.capabilities().delete);
        assert!(Role::Staff.capabilities().edit);
        assert!(!Role::Staff.may_manage_staff());
        assert!(Role::Admin.capabilities().delete);
    }
}

use crate::gallery::SessionIdentity;

/// The signed-in user's data as the session collaborator reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInData {
    pub user_id: String,
}

/// Source of the visitor's identity.
pub trait SessionProvider {
    fn is_signed_in(&self) -> bool;
    fn current_session(&self) -> Option<SignInData>;
}

/// A session fixed at startup from the command line or config file.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    user_id: Option<String>,
}

impl StaticSession {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id: user_id.filter(|id| !id.trim().is_empty()),
        }
    }
}

impl SessionProvider for StaticSession {
    fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    fn current_session(&self) -> Option<SignInData> {
        self.user_id.clone().map(|user_id| SignInData { user_id })
    }
}

impl From<&dyn SessionProvider> for SessionIdentity {
    fn from(session: &dyn SessionProvider) -> Self {
        Self {
            signed_in: session.is_signed_in(),
            user_id: session.current_session().map(|data| data.user_id),
        }
    }
}

/// The visitor as reported by the session collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIdentity {
    pub signed_in: bool,
    pub user_id: Option<String>,
}

impl SessionIdentity {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            signed_in: true,
            user_id: Some(user_id.into()),
        }
    }
}

/// Flags derived from who is looking at whose gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    pub is_owner: bool,
    pub full_width: bool,
}

impl Permissions {
    pub fn compute(session: &SessionIdentity, viewed_id: Option<&str>) -> Self {
        let is_owner = viewed_id.is_some_and(|id| is_owner(session, id));
        Self {
            is_owner,
            full_width: layout_full_width(viewed_id, is_owner),
        }
    }
}

pub fn is_owner(session: &SessionIdentity, viewed_id: &str) -> bool {
    session.signed_in && session.user_id.as_deref() == Some(viewed_id)
}

/// All-streets listings and other people's galleries take the full width.
pub fn layout_full_width(viewed_id: Option<&str>, is_owner: bool) -> bool {
    viewed_id.is_none() || !is_owner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owner() {
        assert!(is_owner(&SessionIdentity::signed_in("u1"), "u1"));
        assert!(!is_owner(&SessionIdentity::signed_out(), "u1"));
        assert!(!is_owner(&SessionIdentity::signed_in("u1"), "u2"));
    }

    #[test]
    fn test_is_owner_requires_signed_in_flag() {
        let stale = SessionIdentity {
            signed_in: false,
            user_id: Some("u1".to_string()),
        };
        assert!(!is_owner(&stale, "u1"));
    }

    #[test]
    fn test_layout_full_width() {
        assert!(layout_full_width(None, false));
        assert!(layout_full_width(Some("u1"), false));
        assert!(!layout_full_width(Some("u1"), true));
    }

    #[test]
    fn test_permissions_compute() {
        let owner = Permissions::compute(&SessionIdentity::signed_in("alice"), Some("alice"));
        assert_eq!(owner, Permissions { is_owner: true, full_width: false });

        let visitor = Permissions::compute(&SessionIdentity::signed_in("bob"), Some("alice"));
        assert_eq!(visitor, Permissions { is_owner: false, full_width: true });

        let all = Permissions::compute(&SessionIdentity::signed_in("alice"), None);
        assert_eq!(all, Permissions { is_owner: false, full_width: true });
    }
}

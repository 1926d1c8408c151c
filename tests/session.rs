mod common;

#[cfg(test)]
mod tests {
    use super::*;

    use common::*;
    use dairy_session::store::{MemoryStore, PersistentStore};
    use dairy_session::{ClientState, Error, Role, Session, StorageKeys};
    use http::StatusCode;
    use http::header::{AUTHORIZATION, CONTENT_TYPE};
    use std::sync::Arc;

    fn session() -> (Arc<MemoryStore>, Session<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), Session::new(store))
    }

    #[test]
    fn test_headers_without_token() {
        let (_, session) = session();

        let headers = session.auth_headers();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_headers_with_token() {
        let (_, session) = session();
        session.set_token("abc").unwrap();

        let headers = session.auth_headers();
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[AUTHORIZATION], "Bearer abc");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_token_lifecycle() {
        let (store, session) = session();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());

        session.set_token("first").unwrap();
        session.set_token("second").unwrap();
        assert_eq!(session.token().unwrap().as_str(), "second");
        assert_eq!(store.get("token").unwrap().as_deref(), Some("second"));

        session.remove_token().unwrap();
        assert!(!session.is_authenticated());
        assert!(store.get("token").unwrap().is_none());

        // removing twice is fine
        session.remove_token().unwrap();
    }

    #[test]
    fn test_sign_in_stores_token() {
        let (store, session) = session();
        let token = make_token("asha@example.com", "ADMIN");
        let body = serde_json::json!({ "access_token": token }).to_string();

        let claims = session.sign_in(&body).unwrap();
        assert_eq!(claims.sub, "asha@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(store.get("token").unwrap(), Some(token));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_sign_in_as_customer() {
        let (_, session) = session();
        let body = serde_json::json!({ "access_token": make_token("ravi", "USER") }).to_string();

        let claims = session.sign_in(&body).unwrap();
        assert_eq!(claims.role, Role::User);
        assert!(!claims.is_admin());
        assert_eq!(session.claims().unwrap(), Some(claims));
    }

    #[test]
    fn test_sign_in_rejects_undecodable_token() {
        let (_, session) = session();
        let body = serde_json::json!({ "access_token": "abc" }).to_string();

        let result = session.sign_in(&body);
        assert!(matches!(result, Err(Error::MalformedToken(_))));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_sign_in_rejects_empty_token() {
        let (_, session) = session();

        let result = session.sign_in(r#"{"access_token":""}"#);
        assert!(matches!(result, Err(Error::MalformedToken(_))));
    }

    #[test]
    fn test_sign_in_rejects_unreadable_body() {
        let (_, session) = session();

        let result = session.sign_in(r#"{"message":"Bad credentials"}"#);
        assert!(matches!(result, Err(Error::InvalidAuthResponse(_))));
        assert!(!session.is_authenticated());

        let result = session.sign_in("<html>Bad Gateway</html>");
        assert!(matches!(result, Err(Error::InvalidAuthResponse(_))));
    }

    #[test]
    fn test_unauthorized_clears_token() {
        let (_, session) = session();
        session.set_token(make_token("ravi", "USER")).unwrap();

        assert!(session.check_status(StatusCode::OK).is_ok());
        assert!(session.check_status(StatusCode::INTERNAL_SERVER_ERROR).is_ok());
        assert!(session.is_authenticated());

        let result = session.check_status(StatusCode::UNAUTHORIZED);
        assert!(matches!(result, Err(Error::Unauthorized)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_failed_write_is_reported() {
        let store = Arc::new(FlakyStore::new());
        let session = Session::new(store.clone());

        store.fail_writes(true);
        assert!(matches!(session.set_token("abc"), Err(Error::Store(_))));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_client_state_shares_one_store() {
        let store = Arc::new(MemoryStore::new());
        let keys = StorageKeys::build().prefix("app:");
        let state = ClientState::restore_with_keys(store.clone(), &keys).unwrap();

        state.session.set_token("abc").unwrap();
        state.cart.add_line(paneer()).unwrap();
        state.wishlist.add(snapshot(1, "Malai Paneer 200g")).unwrap();

        assert!(store.get("app:token").unwrap().is_some());
        assert!(store.get("app:cart").unwrap().is_some());
        assert!(store.get("app:wishlist").unwrap().is_some());
        assert_eq!(store.len(), 3);

        let restored = ClientState::restore_with_keys(store, &keys).unwrap();
        assert!(restored.session.is_authenticated());
        assert_eq!(restored.cart.item_count(), 1);
        assert_eq!(restored.wishlist.len(), 1);
    }
}

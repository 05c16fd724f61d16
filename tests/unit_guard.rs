use jobify::jobify_auth::SessionClaims;
use jobify::jobify_core::ErrorKind;
use jobify::middleware::guard::{authorize, permits};
use jobify_models::{Role, UserId};

fn claims(role: Role) -> SessionClaims {
    SessionClaims {
        user_id: UserId::new(),
        role,
        iat: 1_700_000_000,
        exp: 9_999_999_999,
    }
}

#[test]
fn test_owner_is_permitted() {
    let caller = claims(Role::User);
    assert!(permits(&caller, caller.user_id));
    assert!(authorize(&caller, caller.user_id).is_ok());
}

#[test]
fn test_stranger_is_forbidden() {
    let caller = claims(Role::User);
    let err = authorize(&caller, UserId::new()).unwrap_err();

    assert!(!permits(&caller, UserId::new()));
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.public_message(), "not authorized to access this route");
}

#[test]
fn test_admin_is_permitted_everywhere() {
    let admin = claims(Role::Admin);
    assert!(permits(&admin, UserId::new()));
    assert!(authorize(&admin, UserId::new()).is_ok());
}

use chrono::{Duration, Utc};
use scoutbase_server::http::auth::{sign_claims, verify_claims, Claims};

const SECRET: &[u8] = b"test-secret";

fn claims_expiring_in(offset: Duration) -> Claims {
    Claims {
        sub: "7c9e6679-7425-40de-944b-e07fc1f90ae7".into(),
        email: "scout@example.com".into(),
        role: "user".into(),
        exp: (Utc::now() + offset).timestamp() as usize,
    }
}

#[test]
fn claims_survive_a_round_trip() {
    let claims = claims_expiring_in(Duration::minutes(59));
    let token = sign_claims(&claims, SECRET).unwrap();

    let decoded = verify_claims(&token, SECRET).unwrap();
    assert_eq!(decoded.sub, claims.sub);
    assert_eq!(decoded.email, claims.email);
    assert_eq!(decoded.role, claims.role);
}

#[test]
fn token_within_its_lifetime_verifies() {
    // One minute of a one-hour lifetime left.
    let token = sign_claims(&claims_expiring_in(Duration::minutes(1)), SECRET).unwrap();
    assert!(verify_claims(&token, SECRET).is_ok());
}

#[test]
fn token_past_its_lifetime_is_rejected() {
    // Expired one minute ago, i.e. verified at T+61min of a 1 h token.
    let token = sign_claims(&claims_expiring_in(Duration::minutes(-1)), SECRET).unwrap();
    let err = verify_claims(&token, SECRET).unwrap_err();
    assert!(matches!(
        err.kind(),
        jsonwebtoken::errors::ErrorKind::ExpiredSignature
    ));
}

#[test]
fn wrong_secret_is_rejected() {
    let token = sign_claims(&claims_expiring_in(Duration::minutes(30)), SECRET).unwrap();
    assert!(verify_claims(&token, b"other-secret").is_err());
}

#[test]
fn garbage_is_rejected() {
    assert!(verify_claims("not.a.token", SECRET).is_err());
    assert!(verify_claims("", SECRET).is_err());
}

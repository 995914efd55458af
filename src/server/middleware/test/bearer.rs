use super::*;

/// Tests extracting a well-formed bearer token.
///
/// Expected: Ok(Some) with surrounding whitespace trimmed
#[test]
fn extracts_bearer_token() {
    let headers = headers_with("Bearer  abc.def ");

    let token = bearer_token(&headers).unwrap();

    assert_eq!(token, Some("abc.def"));
}

/// Tests that the scheme is matched case-insensitively.
///
/// Expected: Ok(Some)
#[test]
fn accepts_lowercase_scheme() {
    let headers = headers_with("bearer token-1");

    assert_eq!(bearer_token(&headers).unwrap(), Some("token-1"));
}

/// Tests a request without an Authorization header.
///
/// Expected: Ok(None)
#[test]
fn returns_none_without_header() {
    let headers = HeaderMap::new();

    assert_eq!(bearer_token(&headers).unwrap(), None);
}

/// Tests headers that are present but not a bearer token.
///
/// Expected: Err(MalformedHeader) for each value
#[test]
fn rejects_malformed_headers() {
    for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer   ", "token-only"] {
        let headers = headers_with(value);

        let result = bearer_token(&headers);

        assert!(
            matches!(result, Err(AuthError::MalformedHeader)),
            "{value:?} should be rejected"
        );
    }
}

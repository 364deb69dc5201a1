//! Tests for the status code offset encoding

use super::*;

#[test]
fn test_from_grpc_applies_offset() {
    // native OK (0) -> domain 1
    assert_eq!(StatusCode::from_grpc(0), StatusCode::OK);
    assert_eq!(StatusCode::from_grpc(0).value(), 1);

    // native NOT_FOUND (5) -> domain 6
    assert_eq!(StatusCode::from_grpc(5), StatusCode::NOT_FOUND);
    assert_eq!(StatusCode::from_grpc(5).value(), 6);

    // native UNAUTHENTICATED (16) -> domain 17
    assert_eq!(StatusCode::from_grpc(16), StatusCode::UNAUTHENTICATED);
}

#[test]
fn test_zero_is_unspecified() {
    assert_eq!(StatusCode::default(), StatusCode::UNSPECIFIED);
    assert_eq!(StatusCode::UNSPECIFIED.value(), 0);
    assert_eq!(StatusCode::UNSPECIFIED.as_str(), "UNSPECIFIED");
}

#[test]
fn test_canonical_names() {
    let cases = [
        (0, "UNSPECIFIED"),
        (1, "OK"),
        (2, "CANCELLED"),
        (3, "UNKNOWN"),
        (4, "INVALID_ARGUMENT"),
        (5, "DEADLINE_EXCEEDED"),
        (6, "NOT_FOUND"),
        (7, "ALREADY_EXISTS"),
        (8, "PERMISSION_DENIED"),
        (9, "RESOURCE_EXHAUSTED"),
        (10, "FAILED_PRECONDITION"),
        (11, "ABORTED"),
        (12, "OUT_OF_RANGE"),
        (13, "UNIMPLEMENTED"),
        (14, "INTERNAL"),
        (15, "UNAVAILABLE"),
        (16, "DATA_LOSS"),
        (17, "UNAUTHENTICATED"),
    ];
    for (value, name) in cases {
        assert_eq!(StatusCode::from_domain(value).as_str(), name);
    }
}

#[test]
fn test_out_of_range_renders_unknown() {
    assert_eq!(StatusCode::from_domain(18).as_str(), "UNKNOWN");
    assert_eq!(StatusCode::from_domain(99).as_str(), "UNKNOWN");
    assert_eq!(StatusCode::from_domain(-1).as_str(), "UNKNOWN");
    assert_eq!(StatusCode::from_domain(i32::MAX).as_str(), "UNKNOWN");
    assert_eq!(StatusCode::from_domain(i32::MIN).as_str(), "UNKNOWN");
}

#[test]
fn test_display() {
    assert_eq!(StatusCode::OK.to_string(), "OK");
    assert_eq!(StatusCode::from_domain(42).to_string(), "UNKNOWN");
}

#[test]
fn test_is_ok() {
    assert!(StatusCode::OK.is_ok());
    assert!(!StatusCode::UNSPECIFIED.is_ok());
    assert!(!StatusCode::NOT_FOUND.is_ok());
}

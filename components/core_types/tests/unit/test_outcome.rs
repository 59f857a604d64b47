//! Unit tests for Outcome settlement records

use core_types::{Outcome, TaskError};

#[test]
fn test_fulfilled_record() {
    let outcome: Outcome<&str, &str> = Outcome::Fulfilled { value: "data" };
    assert!(outcome.is_fulfilled());
    assert_eq!(outcome.status(), "fulfilled");
    assert_eq!(outcome.value(), Some(&"data"));
    assert!(outcome.reason().is_none());
}

#[test]
fn test_rejected_record() {
    let outcome: Outcome<&str, &str> = Outcome::Rejected {
        reason: TaskError::Rejected("offline"),
    };
    assert!(!outcome.is_fulfilled());
    assert_eq!(outcome.status(), "rejected");
    assert!(outcome.value().is_none());
    assert_eq!(outcome.reason(), Some(&TaskError::Rejected("offline")));
}

#[test]
fn test_fulfilled_serializes_with_status_tag() {
    let outcome: Outcome<&str, &str> = Outcome::Fulfilled { value: "data" };
    let json = serde_json::to_string(&outcome).expect("serialize");
    assert_eq!(json, "{\"status\":\"fulfilled\",\"value\":\"data\"}");
}

#[test]
fn test_rejected_serializes_reason_inline() {
    let outcome: Outcome<&str, &str> = Outcome::Rejected {
        reason: TaskError::Rejected("offline"),
    };
    let json = serde_json::to_string(&outcome).expect("serialize");
    assert_eq!(json, "{\"status\":\"rejected\",\"reason\":\"offline\"}");
}

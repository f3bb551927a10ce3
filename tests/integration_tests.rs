#![cfg(feature = "json")]

use serde_json::json;
use sovran_mapparams::{MapParams, ParamError, Params, Value};
use std::collections::HashMap;

fn job_args() -> Params {
    Params::from_json_value(json!({
        "queue": "mailers",
        "dry_run": true,
        "attempt": 3,
        "ratio": 3.5,
        "whole": 3.0,
        "count": 7,
        "too_big": 9007199254740893.0,
        "limit": 9007199254740892.0,
        "negative": -42,
        "huge": 18446744073709551615u64,
        "tags": ["a", "b"],
        "meta": {"owner": "ops"},
        "nothing": null
    }))
    .unwrap()
}

#[test]
fn test_missing_keys() {
    let params = job_args();

    let mut args = params.accessor();
    assert_eq!(args.string("absent"), "");
    assert_eq!(
        args.error(),
        Some(&ParamError::MissingKey {
            expected: "string",
            key: "absent".to_string(),
        })
    );

    let mut args = params.accessor();
    assert!(!args.bool("absent"));
    assert_eq!(args.error().map(ParamError::expected), Some("bool"));

    let mut args = params.accessor();
    assert_eq!(args.int64("absent"), 0);
    assert_eq!(args.error().map(ParamError::expected), Some("int64"));

    let mut args = params.accessor();
    assert_eq!(args.float64("absent"), 0.0);
    let err = args.error().unwrap();
    assert!(err.is_missing_key());
    assert_eq!(err.expected(), "float64");
    assert_eq!(err.key(), "absent");
}

#[test]
fn test_type_mismatches() {
    let params = job_args();

    let mut args = params.accessor();
    assert_eq!(args.string("dry_run"), "");
    let err = args.error().unwrap();
    assert!(err.is_type_mismatch());
    assert_eq!(
        err.to_string(),
        "looking for a string in job.Arg[dry_run] but value wasn't right type: bool(true)"
    );

    let mut args = params.accessor();
    assert!(!args.bool("queue"));
    assert_eq!(
        args.error(),
        Some(&ParamError::TypeMismatch {
            expected: "bool",
            key: "queue".to_string(),
            actual: "string",
            value: "mailers".to_string(),
        })
    );

    let mut args = params.accessor();
    assert_eq!(args.float64("tags"), 0.0);
    assert!(matches!(
        args.error(),
        Some(ParamError::TypeMismatch { actual: "array", .. })
    ));

    let mut args = params.accessor();
    assert_eq!(args.int64("nothing"), 0);
    assert!(matches!(
        args.error(),
        Some(ParamError::TypeMismatch { actual: "null", .. })
    ));

    let mut args = params.accessor();
    assert_eq!(args.string("meta"), "");
    assert!(matches!(
        args.error(),
        Some(ParamError::TypeMismatch { actual: "object", .. })
    ));
}

#[test]
fn test_int64_from_json_numbers() {
    let params = job_args();
    let mut args = params.accessor();

    assert_eq!(args.int64("attempt"), 3);
    assert_eq!(args.int64("negative"), -42);
    assert_eq!(args.int64("whole"), 3);
    assert_eq!(args.int64("limit"), 9007199254740892);
    assert!(args.error().is_none());

    assert_eq!(args.int64("ratio"), 0);
    assert_eq!(
        args.error().map(ToString::to_string),
        Some("looking for a int64 in job.Arg[ratio] but value wasn't right type: float64(3.5)".to_string())
    );

    let mut args = params.accessor();
    assert_eq!(args.int64("too_big"), 0);
    assert!(matches!(
        args.error(),
        Some(ParamError::TypeMismatch { key, actual: "float64", .. }) if key == "too_big"
    ));

    let mut args = params.accessor();
    assert_eq!(args.int64("huge"), 0);
    assert!(matches!(
        args.error(),
        Some(ParamError::TypeMismatch { actual: "uint64", .. })
    ));
}

#[test]
fn test_float64_from_integers() {
    let params = job_args();
    let mut args = params.accessor();

    assert_eq!(args.float64("count"), 7.0);
    assert_eq!(args.float64("negative"), -42.0);
    assert_eq!(args.float64("huge"), u64::MAX as f64);
    assert_eq!(args.float64("ratio"), 3.5);
    assert!(args.error().is_none());
}

#[test]
fn test_last_error_wins() {
    let params = job_args();
    let mut args = params.accessor();

    args.string("missing1");
    args.bool("missing2");

    assert_eq!(
        args.error(),
        Some(&ParamError::MissingKey {
            expected: "bool",
            key: "missing2".to_string(),
        })
    );
}

#[test]
fn test_success_does_not_clear_error() {
    let params = job_args();
    let mut args = params.accessor();

    args.bool("missing");
    assert_eq!(args.string("queue"), "mailers");

    let err = args.finish().unwrap_err();
    assert_eq!(err.key(), "missing");
    assert!(err.is_missing_key());
}

#[test]
fn test_decode_into_plain_map() {
    let map: HashMap<String, Value> =
        serde_json::from_str(r#"{"id": 12, "big": 18446744073709551615, "name": "x"}"#).unwrap();

    assert_eq!(map["id"], Value::Int(12));
    assert_eq!(map["big"], Value::Uint(u64::MAX));

    let mut args = MapParams::new(&map);
    assert_eq!(args.int64("id"), 12);
    assert_eq!(args.string("name"), "x");
    assert!(args.finish().is_ok());
}

#[test]
fn test_non_object_json_is_rejected() {
    assert!(Params::from_json_str("[1, 2, 3]").is_err());
    assert!(Params::from_json_value(json!("text")).is_err());
}

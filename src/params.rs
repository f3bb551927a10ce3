use crate::error::ParamError;
use crate::value::Value;
use log::{debug, trace};
use serde::Deserialize;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Largest magnitude a float may have and still be read back as an `i64`.
///
/// 2^53 minus a margin of 100; integral floats beyond it are rejected even
/// though they would fit an `i64`.
pub const MAX_SAFE_FLOAT_INT: i64 = 9_007_199_254_740_892;

/// An owned argument map, typically decoded from a job's JSON payload
///
/// # Examples
///
/// ```
/// use sovran_mapparams::Params;
///
/// let mut params = Params::new();
/// params.insert("user_id", 17);
/// params.insert("notify", true);
///
/// let mut args = params.accessor();
/// assert_eq!(args.int64("user_id"), 17);
/// assert!(args.bool("notify"));
/// assert!(args.error().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Params(HashMap<String, Value>);

impl Params {
    /// Creates a new, empty parameter map
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Decodes a JSON object into a parameter map
    ///
    /// # Errors
    ///
    /// Returns the decoder's error if `json` is not a JSON object.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Converts an already-parsed JSON value into a parameter map
    ///
    /// # Errors
    ///
    /// Returns the decoder's error if `json` is not a JSON object.
    #[cfg(feature = "json")]
    pub fn from_json_value(json: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json)
    }

    /// Stores a value, returning whatever was previously under `key`
    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns a fresh accessor with no recorded error
    pub fn accessor(&self) -> MapParams<'_> {
        MapParams::new(&self.0)
    }

    /// Unwraps the underlying map
    pub fn into_inner(self) -> HashMap<String, Value> {
        self.0
    }
}

impl Deref for Params {
    type Target = HashMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Params {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<HashMap<String, Value>> for Params {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Typed, error-deferring reads over a borrowed argument map
///
/// Each accessor returns the zero value of its type when the key is missing or
/// the value cannot be coerced, and records the failure instead of returning it.
/// Only the most recent failure is kept; a later successful read does not clear
/// it. Check [`error`](MapParams::error) once after a batch of reads.
///
/// The underlying map is never written to.
///
/// # Examples
///
/// ```
/// use sovran_mapparams::{MapParams, ParamError, Value};
/// use std::collections::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("name".to_string(), Value::from("report"));
/// map.insert("retries".to_string(), Value::from(3.0));
///
/// let mut args = MapParams::new(&map);
/// let name = args.string("name");
/// let retries = args.int64("retries");
/// let verbose = args.bool("verbose");
///
/// assert_eq!(name, "report");
/// assert_eq!(retries, 3);
/// assert!(!verbose);
/// assert!(matches!(
///     args.error(),
///     Some(ParamError::MissingKey { expected: "bool", .. })
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct MapParams<'a> {
    map: &'a HashMap<String, Value>,
    error: Option<ParamError>,
}

impl<'a> MapParams<'a> {
    /// Wraps an existing map. The map is only ever read.
    pub fn new(map: &'a HashMap<String, Value>) -> Self {
        Self { map, error: None }
    }

    /// Returns the last recorded error without clearing it
    pub fn error(&self) -> Option<&ParamError> {
        self.error.as_ref()
    }

    /// Returns the last recorded error and resets the accessor to a clean state
    pub fn take_error(&mut self) -> Option<ParamError> {
        self.error.take()
    }

    /// Consumes the accessor, turning the last recorded error into a `Result`
    ///
    /// # Errors
    ///
    /// Returns the most recent failure recorded by any accessor call.
    pub fn finish(self) -> Result<(), ParamError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Returns true if the wrapped map has an entry for `key`, whatever its type
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Returns an owned copy of the string under `key`, or `""` on failure
    pub fn string(&mut self, key: &str) -> String {
        self.str(key).to_string()
    }

    /// Borrowing form of [`string`](MapParams::string)
    pub fn str(&mut self, key: &str) -> &'a str {
        let result = self.try_str(key);
        self.or_record(result)
    }

    /// Returns the boolean under `key`, or `false` on failure
    pub fn bool(&mut self, key: &str) -> bool {
        let result = self.try_bool(key);
        self.or_record(result)
    }

    /// Returns the value under `key` as an `i64`, or `0` on failure
    ///
    /// Signed integers are returned as-is. Unsigned integers are accepted when
    /// they fit in an `i64`. Floats are accepted when they have no fractional
    /// part and lie within `±MAX_SAFE_FLOAT_INT`.
    pub fn int64(&mut self, key: &str) -> i64 {
        let result = self.try_int64(key);
        self.or_record(result)
    }

    /// Returns the value under `key` as an `f64`, or `0.0` on failure
    ///
    /// Integers of either signedness are converted without range checks.
    pub fn float64(&mut self, key: &str) -> f64 {
        let result = self.try_float64(key);
        self.or_record(result)
    }

    /// Like [`string`](MapParams::string) but returns the failure directly
    /// and leaves the recorded error untouched.
    pub fn try_string(&self, key: &str) -> Result<String, ParamError> {
        self.try_str(key).map(str::to_string)
    }

    /// Borrowing form of [`try_string`](MapParams::try_string)
    pub fn try_str(&self, key: &str) -> Result<&'a str, ParamError> {
        let value = self.lookup("string", key)?;
        value
            .as_str()
            .ok_or_else(|| mismatch("string", key, value))
    }

    /// Like [`bool`](MapParams::bool) without recording the failure
    pub fn try_bool(&self, key: &str) -> Result<bool, ParamError> {
        let value = self.lookup("bool", key)?;
        value.as_bool().ok_or_else(|| mismatch("bool", key, value))
    }

    /// Like [`int64`](MapParams::int64) without recording the failure
    pub fn try_int64(&self, key: &str) -> Result<i64, ParamError> {
        let value = self.lookup("int64", key)?;
        coerce_int64(value).ok_or_else(|| mismatch("int64", key, value))
    }

    /// Like [`float64`](MapParams::float64) without recording the failure
    pub fn try_float64(&self, key: &str) -> Result<f64, ParamError> {
        let value = self.lookup("float64", key)?;
        coerce_float64(value).ok_or_else(|| mismatch("float64", key, value))
    }

    fn lookup(&self, expected: &'static str, key: &str) -> Result<&'a Value, ParamError> {
        let map: &'a HashMap<String, Value> = self.map;
        map.get(key).ok_or_else(|| ParamError::MissingKey {
            expected,
            key: key.to_string(),
        })
    }

    fn or_record<T: Default>(&mut self, result: Result<T, ParamError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                debug!("argument lookup failed: {}", err);
                if let Some(previous) = self.error.replace(err) {
                    trace!("discarding earlier argument error: {}", previous);
                }
                T::default()
            }
        }
    }
}

fn mismatch(expected: &'static str, key: &str, value: &Value) -> ParamError {
    ParamError::TypeMismatch {
        expected,
        key: key.to_string(),
        actual: value.type_name(),
        value: value.to_string(),
    }
}

pub(crate) fn coerce_int64(value: &Value) -> Option<i64> {
    match *value {
        Value::Int(i) => Some(i),
        Value::Uint(u) => i64::try_from(u).ok(),
        Value::Float(x) => {
            let bound = MAX_SAFE_FLOAT_INT as f64;
            // NaN fails the first comparison, infinities the second
            if x == x.trunc() && (-bound..=bound).contains(&x) {
                Some(x as i64)
            } else {
                None
            }
        }
        _ => None,
    }
}

pub(crate) fn coerce_float64(value: &Value) -> Option<f64> {
    match *value {
        Value::Int(i) => Some(i as f64),
        Value::Uint(u) => Some(u as f64),
        Value::Float(x) => Some(x),
        _ => None,
    }
}

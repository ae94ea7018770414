//! Filter contributor contract
//!
//! A filter contributor is anything that can be flattened into a set of named
//! query parameters. Contributors are registered on a store in order; when the
//! merged parameter set is built, null-valued keys are dropped and later
//! contributors override earlier ones on key collision.

use serde::Serialize;
use serde_json::{Map, Value};

/// Flat key → value parameter set contributed by one filter
pub type ParamMap = Map<String, Value>;

/// Contract for query-parameter contributors
pub trait FilterParams {
    /// Flatten this contributor into named parameters, nulls already dropped
    fn filter_params(&self) -> ParamMap;
}

/// Any serializable value can contribute parameters through its field names.
impl<T: Serialize> FilterParams for T {
    fn filter_params(&self) -> ParamMap {
        params_from(self)
    }
}

/// Flatten a serializable value into query parameters.
///
/// Serializes to JSON and keeps the top-level object's non-null fields.
/// Non-object values (and values that fail to serialize) contribute nothing.
pub fn params_from<T: Serialize>(value: &T) -> ParamMap {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .collect(),
        _ => ParamMap::new(),
    }
}

/// Merge `overrides` into `base`; keys in `overrides` win.
pub fn merge_params(base: &mut ParamMap, overrides: ParamMap) {
    for (key, value) in overrides {
        base.insert(key, value);
    }
}

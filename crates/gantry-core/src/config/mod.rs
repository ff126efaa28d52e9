use crate::Result;
use serde_json::{Map, Value};

/// Layout settings as a loose JSON object, read through dotted paths (`timeline.padBeforeDays`).
///
/// Typed views such as [`crate::timeline::SpanOptions::from_config`] fall back to their
/// defaults for missing or mistyped keys, so a partial file is always usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Config(Value);

impl Default for Config {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl Config {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn lookup(&self, dotted_path: &str) -> Option<&Value> {
        dotted_path
            .split('.')
            .try_fold(&self.0, |node, key| node.as_object()?.get(key))
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.lookup(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.lookup(dotted_path)?.as_f64().filter(|v| v.is_finite())
    }

    /// Integral numbers only; `7.0` is accepted, `7.5` is not.
    pub fn get_i64(&self, dotted_path: &str) -> Option<i64> {
        let v = self.lookup(dotted_path)?;
        if let Some(i) = v.as_i64() {
            return Some(i);
        }
        let f = v.as_f64()?;
        (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
    }

    /// Layers `overlay` on top: nested objects merge key by key, anything else replaces.
    pub fn merge(&mut self, overlay: Config) {
        merge_into(&mut self.0, overlay.0);
    }
}

fn merge_into(base: &mut Value, overlay: Value) {
    let Value::Object(overlay_map) = overlay else {
        *base = overlay;
        return;
    };
    let Some(base_map) = base.as_object_mut() else {
        *base = Value::Object(overlay_map);
        return;
    };
    for (key, value) in overlay_map {
        match base_map.get_mut(&key) {
            Some(slot) => merge_into(slot, value),
            None => {
                base_map.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dotted_getters_walk_nested_objects() {
        let cfg = Config::from_value(json!({
            "timeline": { "padBeforeDays": 7, "whole": 14.0, "zoom": 1.5, "label": "x" }
        }));
        assert_eq!(cfg.get_i64("timeline.padBeforeDays"), Some(7));
        assert_eq!(cfg.get_i64("timeline.whole"), Some(14));
        assert_eq!(cfg.get_f64("timeline.zoom"), Some(1.5));
        assert_eq!(cfg.get_str("timeline.label"), Some("x"));
        assert_eq!(cfg.get_i64("timeline.zoom"), None);
        assert_eq!(cfg.get_i64("timeline.missing"), None);
        assert_eq!(cfg.get_str("timeline.label.deeper"), None);
    }

    #[test]
    fn merge_overrides_leaves_and_keeps_siblings() {
        let mut cfg = Config::from_value(json!({ "timeline": { "padBeforeDays": 1, "padAfterDays": 2 } }));
        cfg.merge(Config::from_value(json!({
            "timeline": { "padAfterDays": 3 },
            "theme": "dark"
        })));
        assert_eq!(
            cfg.as_value(),
            &json!({ "timeline": { "padBeforeDays": 1, "padAfterDays": 3 }, "theme": "dark" })
        );
    }

    #[test]
    fn merge_replaces_non_object_roots() {
        let mut cfg = Config::from_value(json!(3));
        cfg.merge(Config::from_value(json!({ "viewMode": "week" })));
        assert_eq!(cfg.get_str("viewMode"), Some("week"));
    }
}

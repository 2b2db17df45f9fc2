//! Named column type definitions: comparison, filtering and rendering
//! behavior looked up by logical type name at sort/filter/draw time.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};

use crate::filter::FilterPattern;
use crate::html::strip_html;
use crate::value::Value;

pub type TransformFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;
pub type CompareFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;
pub type RenderValueFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// A named bundle of optional per-type behavior. Absent slots fall back to
/// the generic behavior (default comparator, display stringification).
#[derive(Clone, Default)]
pub struct TypeDefinition {
    /// Normalize a value before comparison.
    pub pre_sort: Option<TransformFn>,
    /// Normalize a value before pattern matching.
    pub pre_filter: Option<TransformFn>,
    /// Two-argument comparator, applied after `pre_sort`.
    pub compare: Option<CompareFn>,
    /// Value to display string.
    pub render: Option<RenderValueFn>,
}

impl TypeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pre_sort(mut self, f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.pre_sort = Some(Arc::new(f));
        self
    }

    pub fn pre_filter(mut self, f: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        self.pre_filter = Some(Arc::new(f));
        self
    }

    pub fn compare(mut self, f: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static) -> Self {
        self.compare = Some(Arc::new(f));
        self
    }

    pub fn render(mut self, f: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    /// Shallow merge: slots present in `other` overwrite, absent slots keep
    /// their current value.
    fn merge_from(&mut self, other: TypeDefinition) {
        if other.pre_sort.is_some() {
            self.pre_sort = other.pre_sort;
        }
        if other.pre_filter.is_some() {
            self.pre_filter = other.pre_filter;
        }
        if other.compare.is_some() {
            self.compare = other.compare;
        }
        if other.render.is_some() {
            self.render = other.render;
        }
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("pre_sort", &self.pre_sort.is_some())
            .field("pre_filter", &self.pre_filter.is_some())
            .field("compare", &self.compare.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Generic comparator used when a type has no `compare` of its own and for
/// untyped columns. Nil sorts after non-nil (both nil compare equal); two
/// numeric values compare numerically; everything else compares by its
/// display string, so booleans compare as `"true"`/`"false"`.
pub fn default_compare(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            } else {
                a.display().cmp(&b.display())
            }
        }
    }
}

/// The named type registry. A cheap-to-clone handle; every table created by
/// one binder shares the binder's registry.
#[derive(Clone)]
pub struct TypeRegistry {
    types: Arc<RwLock<HashMap<String, TypeDefinition>>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// A registry holding the built-in types.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.define_type("string", TypeDefinition::new());
        registry.define_type("number", TypeDefinition::new().pre_sort(parse_number));
        registry.define_type("date", TypeDefinition::new().pre_sort(parse_date));
        registry.define_type(
            "html",
            TypeDefinition::new().pre_sort(strip_markup).pre_filter(strip_markup),
        );
        registry.define_type(
            "html-number",
            TypeDefinition::new()
                .pre_sort(|v| parse_number(&strip_markup(v)))
                .pre_filter(strip_markup),
        );
        registry.define_type(
            "html-date",
            TypeDefinition::new()
                .pre_sort(|v| parse_date(&strip_markup(v)))
                .pre_filter(strip_markup),
        );
        registry
    }

    /// A registry with no types at all.
    pub fn empty() -> Self {
        Self {
            types: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Merge a (possibly partial) definition into the named type. Later
    /// calls can extend a type slot by slot; present slots win, absent slots
    /// keep whatever an earlier call registered. There is no removal.
    pub fn define_type(&self, name: impl Into<String>, definition: TypeDefinition) {
        if let Ok(mut types) = self.types.write() {
            types
                .entry(name.into())
                .or_default()
                .merge_from(definition);
        }
    }

    pub fn get(&self, name: &str) -> Option<TypeDefinition> {
        self.types.read().ok().and_then(|t| t.get(name).cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().map(|t| t.contains_key(name)).unwrap_or(false)
    }

    /// Compare two values under the named type. Unknown or absent types use
    /// the default comparator directly; otherwise both operands run through
    /// the type's `pre_sort` (when present), then its `compare` or the
    /// default comparator over the transformed values.
    pub fn compare(&self, type_name: Option<&str>, a: &Value, b: &Value) -> Ordering {
        let Some(def) = type_name.and_then(|n| self.get(n)) else {
            return default_compare(a, b);
        };
        let (ta, tb) = match &def.pre_sort {
            Some(f) => (f(a), f(b)),
            None => (a.clone(), b.clone()),
        };
        match &def.compare {
            Some(cmp) => cmp(&ta, &tb),
            None => default_compare(&ta, &tb),
        }
    }

    /// Render a value under the named type, falling back to its display
    /// string.
    pub fn render(&self, type_name: Option<&str>, value: &Value) -> String {
        match type_name.and_then(|n| self.get(n)).and_then(|d| d.render) {
            Some(render) => render(value),
            None => value.display(),
        }
    }

    /// Test a compiled pattern against a value under the named type: the
    /// type's `pre_filter` (when present) transforms the value, then the
    /// pattern is tested against the stringified result.
    pub fn matches(&self, type_name: Option<&str>, pattern: &FilterPattern, value: &Value) -> bool {
        let value = match type_name.and_then(|n| self.get(n)).and_then(|d| d.pre_filter) {
            Some(f) => f(value),
            None => value.clone(),
        };
        pattern.matches(&value.display())
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.types.read().map(|t| t.len()).unwrap_or(0);
        f.debug_struct("TypeRegistry").field("types", &count).finish()
    }
}

fn strip_markup(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(strip_html(s)),
        other => other.clone(),
    }
}

/// Parse string input into a numeric value; numbers pass through.
/// Unparseable input becomes `Null`, which sorts after every number.
fn parse_number(value: &Value) -> Value {
    match value {
        Value::Int(_) | Value::Float(_) => value.clone(),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .map(Value::Int)
                .or_else(|_| trimmed.parse::<f64>().map(Value::Float))
                .unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}

/// Parse string input into a timestamp; timestamps pass through.
/// Unparseable input passes through unchanged and compares lexically.
fn parse_date(value: &Value) -> Value {
    match value {
        Value::DateTime(_) => value.clone(),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
                return Value::DateTime(dt.with_timezone(&Utc));
            }
            for format in ["%Y-%m-%d", "%m/%d/%Y", "%d %b %Y"] {
                if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                    if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                        return Value::DateTime(dt.and_utc());
                    }
                }
            }
            value.clone()
        }
        other => other.clone(),
    }
}

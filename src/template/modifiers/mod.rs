// ABOUTME: Modifier registry mapping normalized modifier names to transform constructors
// ABOUTME: Resolves modifier calls to pure value transforms, falling back to identity

pub mod cleanup;
pub mod date;
pub mod logic;
pub mod markup;
pub mod numeric;
pub mod pattern;
pub mod text;
pub mod value;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A pure, single-input value transform
pub type Transform = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Builds a transform from a modifier's parameters, or `None` when they are unusable
pub type ModifierFactory =
    Arc<dyn Fn(&[String], &ModifierRegistry) -> Option<Transform> + Send + Sync>;

/// One parsed modifier call: a normalized name and its ordered parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierSpec {
    pub name: String,
    pub params: Vec<String>,
}

impl ModifierSpec {
    pub fn new(name: &str, params: Vec<String>) -> Self {
        Self {
            name: normalize_name(name),
            params,
        }
    }

    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

/// Lowercase a modifier name and drop everything that is not a letter
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn identity() -> Transform {
    Arc::new(|input| input)
}

pub fn transform<F>(f: F) -> Transform
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Apply `f` to string input; every other value passes through unchanged
pub fn map_text<F>(f: F) -> Transform
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Arc::new(move |input| match input {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    })
}

/// Ordered sequence of transforms applied left to right
#[derive(Clone, Default)]
pub struct TransformChain {
    names: Vec<String>,
    steps: Vec<Transform>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, step: Transform) {
        self.names.push(name.into());
        self.steps.push(step);
    }

    /// Feed the output of each step into the next
    pub fn apply(&self, input: Value) -> Value {
        self.steps.iter().fold(input, |value, step| step(value))
    }

    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn modifier_names(&self) -> &[String] {
        &self.names
    }

    /// Collapse the chain into a single transform
    pub fn into_transform(self) -> Transform {
        if self.steps.is_empty() {
            return identity();
        }
        Arc::new(move |input| self.apply(input))
    }
}

impl fmt::Debug for TransformChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformChain")
            .field("modifiers", &self.names)
            .finish()
    }
}

/// Open registry of modifiers keyed by normalized name
#[derive(Clone, Default)]
pub struct ModifierRegistry {
    factories: HashMap<String, ModifierFactory>,
}

impl ModifierRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in modifier catalogue
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        register_builtin_modifiers(&mut registry);
        registry
    }

    /// Register a modifier constructor under a name (normalized on insert)
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&[String], &ModifierRegistry) -> Option<Transform> + Send + Sync + 'static,
    {
        self.factories.insert(normalize_name(name), Arc::new(factory));
    }

    /// Make `alias` resolve exactly like `target`; false when `target` is unknown
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        match self.factories.get(&normalize_name(target)).cloned() {
            Some(factory) => {
                self.factories.insert(normalize_name(alias), factory);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&normalize_name(name))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Resolve a modifier call. Unknown names and unusable parameters yield identity.
    pub fn resolve(&self, spec: &ModifierSpec) -> Transform {
        let Some(factory) = self.factories.get(&spec.name) else {
            debug!("Unknown modifier '{}', using identity", spec.name);
            return identity();
        };

        match factory(&spec.params, self) {
            Some(transform) => transform,
            None => {
                debug!(
                    "Modifier '{}' rejected parameters {:?}, using identity",
                    spec.name, spec.params
                );
                identity()
            }
        }
    }

    /// Resolve a parameterless modifier by name
    pub fn resolve_named(&self, name: &str) -> Transform {
        self.resolve(&ModifierSpec::new(name, Vec::new()))
    }
}

impl fmt::Debug for ModifierRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierRegistry")
            .field("modifiers", &self.names())
            .finish()
    }
}

/// Register every built-in modifier family
pub fn register_builtin_modifiers(registry: &mut ModifierRegistry) {
    text::register(registry);
    logic::register(registry);
    numeric::register(registry);
    pattern::register(registry);
    markup::register(registry);
    cleanup::register(registry);
    date::register(registry);
}

/// Branch on a predicate: true yields `then`, false yields `otherwise` or the input,
/// and `None` (predicate not applicable) passes the input through
pub(crate) fn branch<P>(then: String, otherwise: Option<String>, predicate: P) -> Transform
where
    P: Fn(&Value) -> Option<bool> + Send + Sync + 'static,
{
    Arc::new(move |input| match predicate(&input) {
        Some(true) => Value::String(then.clone()),
        Some(false) => match &otherwise {
            Some(value) => Value::String(value.clone()),
            None => input,
        },
        None => input,
    })
}

//! Registry of pass-through script names

/// Built-in script: advance to the next scene when no number is given
pub const SCRIPT_NEXT_SCENE: &str = "SCENE";
/// Built-in script: reset to the top of the show
pub const SCRIPT_TOP: &str = "TOP";

/// Script names that may be triggered verbatim from the console.
///
/// Matching is exact and case-sensitive. Registration order is kept for
/// diagnostics only.
#[derive(Debug, Clone, Default)]
pub struct ScriptRegistry {
    scripts: Vec<String>,
}

impl ScriptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in scripts
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(SCRIPT_NEXT_SCENE);
        registry.register(SCRIPT_TOP);
        registry
    }

    /// Register a script name. Registering a name twice is harmless.
    pub fn register(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!("Registered script {:?}", name);
        self.scripts.push(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scripts.iter().any(|s| s == name)
    }

    /// Registered names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for ScriptRegistry {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.register(name);
        }
    }
}

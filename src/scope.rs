use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Filter predicate narrowing which loaded objects are retained.
///
/// Scopes compose with [`Scope::and`]; a composed scope accepts an
/// object only when both operands do.
pub struct Scope<O>(Arc<dyn Fn(&O) -> bool + Send + Sync>);

impl<O> Scope<O> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&O) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    pub fn accepts(&self, object: &O) -> bool {
        (self.0)(object)
    }

    /// Logical AND of two scopes.
    pub fn and(&self, other: &Scope<O>) -> Scope<O>
    where
        O: 'static,
    {
        let left = Arc::clone(&self.0);
        let right = Arc::clone(&other.0);
        Scope(Arc::new(move |object| left(object) && right(object)))
    }
}

impl<O> Clone for Scope<O> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<O> fmt::Debug for Scope<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scope(..)")
    }
}

/// Object-loading policy for a whole response: include/exclude by type
/// name, a global scope, and per-type overrides.
///
/// Fixed at `Response` construction and never mutated afterwards.
pub struct LoadOptions<O> {
    /// When set, only these types are loaded; every other type yields
    /// `None` slots.
    pub only: Option<HashSet<String>>,
    /// When set, these types are never loaded.
    pub except: Option<HashSet<String>>,
    /// Applied to every loaded object regardless of type.
    pub scope: Option<Scope<O>>,
    /// Per-type additions, keyed by type name.
    pub overrides: HashMap<String, TypeLoadOptions<O>>,
}

/// Per-type override slot inside [`LoadOptions`].
pub struct TypeLoadOptions<O> {
    /// Applied in addition to the global scope for this type only.
    pub scope: Option<Scope<O>>,
}

impl<O> Default for LoadOptions<O> {
    fn default() -> Self {
        Self {
            only: None,
            except: None,
            scope: None,
            overrides: HashMap::new(),
        }
    }
}

impl<O> Default for TypeLoadOptions<O> {
    fn default() -> Self {
        Self { scope: None }
    }
}

impl<O> LoadOptions<O> {
    pub fn with_only<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_except<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_scope(mut self, scope: Scope<O>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_type_scope(mut self, type_name: impl Into<String>, scope: Scope<O>) -> Self {
        self.overrides
            .insert(type_name.into(), TypeLoadOptions { scope: Some(scope) });
        self
    }

    /// Whether objects of `type_name` should be loaded at all. `only`
    /// membership is checked before `except`.
    pub fn allows(&self, type_name: &str) -> bool {
        if let Some(only) = &self.only
            && !only.contains(type_name)
        {
            return false;
        }
        if let Some(except) = &self.except
            && except.contains(type_name)
        {
            return false;
        }
        true
    }

    /// Effective scope for a type: the global scope AND the per-type
    /// override, when either is present.
    pub fn scope_for(&self, type_name: &str) -> Option<Scope<O>>
    where
        O: 'static,
    {
        let per_type = self
            .overrides
            .get(type_name)
            .and_then(|options| options.scope.as_ref());
        match (&self.scope, per_type) {
            (Some(global), Some(typed)) => Some(global.and(typed)),
            (Some(global), None) => Some(global.clone()),
            (None, Some(typed)) => Some(typed.clone()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_composition_is_logical_and() {
        let positive = Scope::new(|n: &i64| *n > 0);
        let even = Scope::new(|n: &i64| n % 2 == 0);
        let both = positive.and(&even);

        assert!(both.accepts(&4));
        assert!(!both.accepts(&3));
        assert!(!both.accepts(&-2));
    }

    #[test]
    fn allows_honors_only_then_except() {
        let only: LoadOptions<i64> = LoadOptions::default().with_only(["city"]);
        assert!(only.allows("city"));
        assert!(!only.allows("country"));

        let except: LoadOptions<i64> = LoadOptions::default().with_except(["city"]);
        assert!(!except.allows("city"));
        assert!(except.allows("country"));

        let none: LoadOptions<i64> = LoadOptions::default();
        assert!(none.allows("anything"));
    }

    #[test]
    fn scope_for_composes_global_and_per_type() {
        let options = LoadOptions::default()
            .with_scope(Scope::new(|n: &i64| *n > 0))
            .with_type_scope("even", Scope::new(|n: &i64| n % 2 == 0));

        let plain = options.scope_for("odd").expect("global scope applies");
        assert!(plain.accepts(&3));

        let composed = options.scope_for("even").expect("composed scope");
        assert!(composed.accepts(&4));
        assert!(!composed.accepts(&3));
        assert!(!composed.accepts(&-4));
    }
}

use super::{DEFAULT_TEMPLATE, Signature, TemplateRule};
use crate::manifest::Manifest;
use crate::protocol::ModuleSet;

/// Ordered rule table for template inference.
///
/// Rules are checked in order and the first match wins; the fallback is
/// used when nothing matches.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    /// Template used when no rule matches
    fallback: String,
    /// Rules in priority order
    rules: Vec<TemplateRule>,
}

impl TemplateRegistry {
    /// Create an empty registry falling back to [`DEFAULT_TEMPLATE`]
    pub fn new() -> Self {
        Self {
            fallback: DEFAULT_TEMPLATE.to_string(),
            rules: Vec::new(),
        }
    }

    /// Registry preloaded with the rules for well-known presets
    pub fn with_default_rules() -> Self {
        let mut registry = Self::new();
        for (dependency, template) in [
            ("nuxt", "nuxt"),
            ("next", "next"),
            ("apollo-server", "apollo"),
            ("mdx-deck", "mdx-deck"),
            ("gatsby", "gatsby"),
            ("parcel-bundler", "parcel"),
            ("react-scripts-ts", "create-react-app-typescript"),
            ("react-scripts", "create-react-app"),
            ("@angular/core", "angular-cli"),
            ("preact-cli", "preact-cli"),
            ("svelte", "svelte"),
            ("vue", "vue-cli"),
            ("cx", "cxjs"),
        ] {
            registry.register(Signature::dependency(dependency), template);
        }

        registry.register(
            Signature::AnyDependency(
                ["express", "koa", "nodemon", "ts-node", "webpack-dev-server"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            "node",
        );
        // Projects this large are treated as server code
        registry.register(Signature::MinDependencies(50), "node");

        registry.register(Signature::extension("re"), "reason");
        registry.register(Signature::extension("vue"), "vue-cli");
        registry.register(Signature::dependency("react"), "create-react-app");
        registry.register(Signature::dependency("preact"), "preact-cli");
        registry.register(Signature::extension("ts"), "create-react-app-typescript");
        registry.register(Signature::extension("tsx"), "create-react-app-typescript");

        registry
    }

    /// Replace the template used when nothing matches
    pub fn with_fallback(mut self, template: impl Into<String>) -> Self {
        self.fallback = template.into();
        self
    }

    /// Append a rule with the lowest priority
    ///
    /// # Example
    /// ```ignore
    /// registry.register(Signature::dependency("solid-js"), "solid");
    /// registry.register(Signature::extension("elm"), "elm");
    /// ```
    pub fn register(&mut self, signature: Signature, template: impl Into<String>) {
        self.rules.push(TemplateRule::new(signature, template));
    }

    /// Insert a rule ahead of every existing one
    pub fn register_first(&mut self, signature: Signature, template: impl Into<String>) {
        self.rules.insert(0, TemplateRule::new(signature, template));
    }

    /// Infer the template for a manifest and module set
    pub fn select(&self, manifest: &Manifest, modules: &ModuleSet) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.signature.matches(manifest, modules))
            .map(|rule| rule.template.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    /// Explicit template if given, otherwise the inferred one
    pub fn resolve(&self, explicit: Option<&str>, manifest: &Manifest, modules: &ModuleSet) -> String {
        match explicit {
            Some(template) => template.to_string(),
            None => self.select(manifest, modules).to_string(),
        }
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn rules(&self) -> &[TemplateRule] {
        &self.rules
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

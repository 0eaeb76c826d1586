use setbind_core::{render::DEFAULT_SETTER, schema::prelude::*};

/// Env var overriding the setter method called on targets.
pub const ENV_SETTER: &str = "SETBIND_SETTER";

/// Env var overriding the suffix of generated implementation structs.
pub const ENV_DAO_SUFFIX: &str = "SETBIND_DAO_SUFFIX";

/// Env var that, when truthy, turns warnings into errors.
pub const ENV_DENY_WARNINGS: &str = "SETBIND_DENY_WARNINGS";

///
/// BuildConfig
///
/// Knobs for the build front-end. Defaults suit the built-in statement API;
/// env vars allow overrides without touching the build script:
/// `SETBIND_SETTER`, `SETBIND_DAO_SUFFIX`, `SETBIND_DENY_WARNINGS`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildConfig {
    pub setter: String,
    pub dao_suffix: String,
    pub deny_warnings: bool,
    pub custom_settables: Vec<SettableKind>,
}

impl BuildConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            setter: DEFAULT_SETTER.to_string(),
            dao_suffix: "Impl".to_string(),
            deny_warnings: false,
            custom_settables: Vec::new(),
        }
    }

    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each env var.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::new();
        if let Some(setter) = var(ENV_SETTER) {
            config.setter = setter;
        }
        if let Some(suffix) = var(ENV_DAO_SUFFIX) {
            config.dao_suffix = suffix;
        }
        if let Some(deny) = var(ENV_DENY_WARNINGS) {
            config.deny_warnings =
                matches!(deny.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        config
    }

    /// Register a user-defined settable type by name.
    #[must_use]
    pub fn custom_settable(mut self, name: impl Into<String>, mutability: Mutability) -> Self {
        self.custom_settables
            .push(SettableKind::custom(name, mutability));
        self
    }

    #[must_use]
    pub const fn deny_warnings(mut self, deny: bool) -> Self {
        self.deny_warnings = deny;
        self
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new()
    }
}

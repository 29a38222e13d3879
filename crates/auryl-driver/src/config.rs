//! Build configuration.

use smol_str::SmolStr;

use auryl_tree::ComponentTree;

/// Configuration for a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Name of the tree's root node (default: `Root`)
    pub root_name: SmolStr,
    /// Log each pipeline phase
    pub verbose: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root_name: SmolStr::new_inline(ComponentTree::DEFAULT_ROOT_NAME),
            verbose: false,
        }
    }
}

impl BuildConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let root_name = var("AURYL_ROOT_NAME")
            .filter(|name| !name.is_empty())
            .map(SmolStr::from)
            .unwrap_or_else(|| SmolStr::new_inline(ComponentTree::DEFAULT_ROOT_NAME));

        let verbose = var("AURYL_VERBOSE")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self { root_name, verbose }
    }

    pub fn with_root_name(mut self, root_name: impl Into<SmolStr>) -> Self {
        self.root_name = root_name.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

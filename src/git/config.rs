/// Default committer name when none is configured.
pub const DEFAULT_AUTHOR_NAME: &str = "IaC Provisioner";

/// Default committer email when none is configured.
pub const DEFAULT_AUTHOR_EMAIL: &str = "iac-provisioner@service-catalog.local";

/// Commit identity written into the cloned repository's config. The hook
/// never reads the host's `~/.gitconfig`; commits are always attributed to
/// this identity.
#[derive(Debug, Clone)]
pub struct GitIdentity {
    name: String,
    email: String,
}

impl Default for GitIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_AUTHOR_NAME.to_string(),
            email: DEFAULT_AUTHOR_EMAIL.to_string(),
        }
    }
}

impl GitIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.name = name.into();
        self.email = email.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_identity() {
        let identity = GitIdentity::new();
        assert_eq!(identity.name(), DEFAULT_AUTHOR_NAME);
        assert_eq!(identity.email(), DEFAULT_AUTHOR_EMAIL);
    }

    #[test]
    fn test_custom_author() {
        let identity = GitIdentity::new().author("Provision Bot", "bot@example.com");
        assert_eq!(identity.name(), "Provision Bot");
        assert_eq!(identity.email(), "bot@example.com");
    }
}

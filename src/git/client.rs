use std::fs;
use std::path::Path;

use git2::build::RepoBuilder;
use git2::{Commit, Cred, FetchOptions, Oid, PushOptions, RemoteCallbacks, Repository, Signature};

use crate::domain::model::AccessToken;
use crate::utils::error::Result;

use super::config::GitIdentity;

/// Username presented alongside a personal access token on HTTPS remotes.
/// Azure DevOps ignores it; only the password (the token) matters.
const TOKEN_USERNAME: &str = "pat";

/// Thin wrapper over libgit2 covering exactly what the bootstrap needs:
/// clone, identity config, single-file commit, push.
#[derive(Debug, Clone)]
pub struct GitClient {
    identity: GitIdentity,
    token: Option<AccessToken>,
}

impl GitClient {
    pub fn new(identity: GitIdentity) -> Self {
        Self {
            identity,
            token: None,
        }
    }

    /// Attach the credential used for HTTPS remotes. Local filesystem
    /// remotes never trigger the credential callback, so this is harmless
    /// for them.
    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    fn callbacks(&self) -> RemoteCallbacks<'static> {
        let mut callbacks = RemoteCallbacks::new();
        if let Some(token) = self.token.clone() {
            callbacks.credentials(move |_url, username, _allowed| {
                Cred::userpass_plaintext(username.unwrap_or(TOKEN_USERNAME), token.reveal())
            });
        }
        callbacks
    }

    /// Clone `url` into `dest`, replacing any leftover checkout from a
    /// previous failed run.
    pub fn clone_repo(&self, url: &str, dest: &Path) -> Result<()> {
        if dest.exists() {
            fs::remove_dir_all(dest)?;
        }

        let mut fetch = FetchOptions::new();
        fetch.remote_callbacks(self.callbacks());
        RepoBuilder::new().fetch_options(fetch).clone(url, dest)?;
        Ok(())
    }

    /// Write `user.name`/`user.email` into the repository config so commits
    /// are attributed to the configured identity, never the host's.
    pub fn configure_identity(&self, repo_path: &Path) -> Result<()> {
        let repo = Repository::open(repo_path)?;
        let mut config = repo.config()?;
        config.set_str("user.name", self.identity.name())?;
        config.set_str("user.email", self.identity.email())?;
        Ok(())
    }

    /// Stage exactly one file and commit it on top of HEAD. A template
    /// repository with no commits yet produces a root commit instead.
    pub fn commit_file(&self, repo_path: &Path, relative_path: &str, message: &str) -> Result<Oid> {
        let repo = Repository::open(repo_path)?;

        let mut index = repo.index()?;
        index.add_path(Path::new(relative_path))?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let signature = repo
            .signature()
            .or_else(|_| Signature::now(self.identity.name(), self.identity.email()))?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        Ok(oid)
    }

    /// Push the current branch to `origin`.
    pub fn push(&self, repo_path: &Path) -> Result<()> {
        let repo = Repository::open(repo_path)?;
        let head = repo.head()?;
        let branch = head
            .shorthand()
            .ok_or_else(|| git2::Error::from_str("HEAD is not a named branch"))?;
        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);

        let mut remote = repo.find_remote("origin")?;
        let mut options = PushOptions::new();
        options.remote_callbacks(self.callbacks());
        remote.push(&[refspec.as_str()], Some(&mut options))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::RepositoryInitOptions;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Bare "remote" seeded with one commit on `main`, like a freshly
    /// created template repository.
    fn seed_remote(root: &Path) -> PathBuf {
        let remote_path = root.join("remote.git");
        let mut opts = RepositoryInitOptions::new();
        opts.bare(true).initial_head("main");
        Repository::init_opts(&remote_path, &opts).unwrap();

        let seed_path = root.join("seed");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let seed = Repository::init_opts(&seed_path, &opts).unwrap();

        fs::write(seed_path.join("README.md"), "# IaC template\n").unwrap();
        let mut index = seed.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = seed.find_tree(tree_id).unwrap();
        let sig = Signature::now("Seed", "seed@example.com").unwrap();
        seed.commit(Some("HEAD"), &sig, &sig, "chore: seed template", &tree, &[])
            .unwrap();

        let mut remote = seed
            .remote_anonymous(remote_path.to_str().unwrap())
            .unwrap();
        remote
            .push(&["refs/heads/main:refs/heads/main"], None)
            .unwrap();
        remote_path
    }

    fn client() -> GitClient {
        GitClient::new(GitIdentity::new().author("Test Bot", "bot@example.com"))
    }

    #[test]
    fn test_clone_commit_push_round_trip() {
        let root = TempDir::new().unwrap();
        let remote_path = seed_remote(root.path());
        let checkout = root.path().join("checkout");

        let client = client();
        client
            .clone_repo(remote_path.to_str().unwrap(), &checkout)
            .unwrap();
        client.configure_identity(&checkout).unwrap();

        fs::create_dir_all(checkout.join("projects")).unwrap();
        fs::write(checkout.join("projects/demo.tfvars"), "project = \"demo\"\n").unwrap();

        client
            .commit_file(&checkout, "projects/demo.tfvars", "feat: add demo")
            .unwrap();
        client.push(&checkout).unwrap();

        let remote = Repository::open_bare(&remote_path).unwrap();
        let head = remote.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message().unwrap(), "feat: add demo");
        assert_eq!(head.author().name().unwrap(), "Test Bot");
        assert!(head.tree().unwrap().get_path(Path::new("projects/demo.tfvars")).is_ok());
    }

    #[test]
    fn test_clone_replaces_existing_checkout() {
        let root = TempDir::new().unwrap();
        let remote_path = seed_remote(root.path());
        let checkout = root.path().join("checkout");

        fs::create_dir_all(&checkout).unwrap();
        fs::write(checkout.join("stale.txt"), "left over from a failed run").unwrap();

        client()
            .clone_repo(remote_path.to_str().unwrap(), &checkout)
            .unwrap();

        assert!(!checkout.join("stale.txt").exists());
        assert!(checkout.join("README.md").exists());
    }

    #[test]
    fn test_commit_on_empty_repository_creates_root_commit() {
        let root = TempDir::new().unwrap();
        let repo_path = root.path().join("empty");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        Repository::init_opts(&repo_path, &opts).unwrap();

        fs::write(repo_path.join("first.txt"), "hello\n").unwrap();
        let oid = client()
            .commit_file(&repo_path, "first.txt", "feat: first")
            .unwrap();

        let repo = Repository::open(&repo_path).unwrap();
        let commit = repo.find_commit(oid).unwrap();
        assert_eq!(commit.parent_count(), 0);
        assert_eq!(commit.message().unwrap(), "feat: first");
    }

    #[test]
    fn test_push_without_remote_fails() {
        let root = TempDir::new().unwrap();
        let repo_path = root.path().join("no-remote");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        Repository::init_opts(&repo_path, &opts).unwrap();

        fs::write(repo_path.join("first.txt"), "hello\n").unwrap();
        client()
            .commit_file(&repo_path, "first.txt", "feat: first")
            .unwrap();

        assert!(client().push(&repo_path).is_err());
    }
}

use std::path::{Path, PathBuf};

use {
    ini::Ini,
    secrecy::Secret,
    superform_publishing::{Error, Result},
    tracing::{debug, warn},
};

/// File name looked up inside the credentials directory.
pub const CREDENTIALS_FILE: &str = "linkedin.ini";
const SECTION: &str = "Credentials";
const CLIENT_ID_KEY: &str = "CLIENT_ID";
const CLIENT_SECRET_KEY: &str = "CLIENT_SECRET";

/// Client id reported when no credentials file is available.
pub const PLACEHOLDER_CLIENT_ID: &str = "no client id";

/// LinkedIn application credentials.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: Secret<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
        }
    }

    /// Stand-in used when the credentials file is missing, so configuration
    /// pages still render.
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_CLIENT_ID, String::new())
    }

    /// Load from `file`, degrading to [`Credentials::placeholder`] on failure.
    pub fn load_or_placeholder(file: &CredentialsFile) -> Self {
        match file.load() {
            Ok(credentials) => credentials,
            Err(Error::CredentialsNotFound { path }) => {
                warn!(
                    path = %path.display(),
                    "{CREDENTIALS_FILE} not found. Please check that the {CREDENTIALS_FILE} file is placed in the {} folder.",
                    file.dir().display()
                );
                Self::placeholder()
            },
            Err(e) => {
                warn!(error = %e, "could not read LinkedIn credentials, using placeholder");
                Self::placeholder()
            },
        }
    }
}

/// Location of the INI file holding the client id and secret.
///
/// ```ini
/// [Credentials]
/// CLIENT_ID = 86abc
/// CLIENT_SECRET = s3cr3t
/// ```
#[derive(Debug, Clone)]
pub struct CredentialsFile {
    dir: PathBuf,
}

impl CredentialsFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE)
    }

    /// Read and parse the file. Every call goes back to disk.
    pub fn load(&self) -> Result<Credentials> {
        let ini = self.read()?;
        Ok(Credentials::new(
            self.value(&ini, CLIENT_ID_KEY)?,
            self.value(&ini, CLIENT_SECRET_KEY)?,
        ))
    }

    pub fn client_id(&self) -> Result<String> {
        let ini = self.read()?;
        self.value(&ini, CLIENT_ID_KEY)
    }

    pub fn client_secret(&self) -> Result<Secret<String>> {
        let ini = self.read()?;
        self.value(&ini, CLIENT_SECRET_KEY).map(Secret::new)
    }

    fn read(&self) -> Result<Ini> {
        if !self.dir.is_dir() {
            return Err(Error::CredentialsNotFound {
                path: self.dir.clone(),
            });
        }
        let path = self.path();
        if !path.is_file() {
            return Err(Error::CredentialsNotFound { path });
        }
        debug!(path = %path.display(), "reading LinkedIn credentials");
        Ini::load_from_file(&path).map_err(|e| Error::InvalidCredentials {
            path,
            message: e.to_string(),
        })
    }

    fn value(&self, ini: &Ini, key: &str) -> Result<String> {
        let section = ini
            .section(Some(SECTION))
            .ok_or_else(|| self.invalid(format!("missing [{SECTION}] section")))?;
        section
            .get(key)
            .or_else(|| section.get(key.to_ascii_lowercase().as_str()))
            .map(|v| v.trim().to_string())
            .ok_or_else(|| self.invalid(format!("missing {key} in [{SECTION}]")))
    }

    fn invalid(&self, message: String) -> Error {
        Error::InvalidCredentials {
            path: self.path(),
            message,
        }
    }
}

#[derive(Clone, Debug)]
pub struct IdentityToolkitOptions {
    pub host_url: String,
    pub https_only: bool,
}

impl Default for IdentityToolkitOptions {
    fn default() -> Self {
        Self {
            host_url: "https://identitytoolkit.googleapis.com".to_string(),
            https_only: true,
        }
    }
}

impl IdentityToolkitOptions {
    /// Points the client at a local Auth emulator, e.g. `127.0.0.1:9099`.
    pub fn emulator(host: &str) -> Self {
        Self {
            host_url: format!("http://{}/identitytoolkit.googleapis.com", host),
            https_only: false,
        }
    }

    pub fn host_url(mut self, host_url: impl Into<String>) -> Self {
        self.host_url = host_url.into();
        self
    }

    pub fn https_only(mut self, https_only: bool) -> Self {
        self.https_only = https_only;
        self
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;
pub const SERVERINFO_PATH: &str = "/serverinfo";
pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 200;

/// Storage keys for the persisted identity
pub const NAME_KEY: &str = "name";
pub const SERVER_KEY: &str = "server";

/// Variables the engine reads its initialization parameters from
pub const PLAYER_NAME_VAR: &str = "PLAYER_NAME";
pub const SERVER_URL_VAR: &str = "SERVER_URL";

/// Address token of one joinable server, e.g. `/us-east`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ServerEntry(String);

impl ServerEntry {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn label(&self) -> String {
        derive_label(&self.0)
    }
}

impl fmt::Display for ServerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered server list produced by one successful directory fetch
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ServerDirectory {
    entries: Vec<ServerEntry>,
}

impl ServerDirectory {
    pub fn new(entries: Vec<ServerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ServerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, entry: &ServerEntry) -> bool {
        self.entries.contains(entry)
    }

    pub fn position(&self, entry: &ServerEntry) -> Option<usize> {
        self.entries.iter().position(|e| e == entry)
    }

    pub fn get(&self, index: usize) -> Option<&ServerEntry> {
        self.entries.get(index)
    }

    pub fn options(&self) -> Vec<ServerOption> {
        self.entries.iter().map(ServerOption::from_entry).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ServerDirectory {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(ServerEntry::new).collect())
    }
}

/// A server as shown on the landing surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOption {
    pub address: ServerEntry,
    pub label: String,
}

impl ServerOption {
    pub fn from_entry(entry: &ServerEntry) -> Self {
        Self {
            address: entry.clone(),
            label: entry.label(),
        }
    }
}

/// Display name plus the last selected server
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub display_name: String,
    pub selected_server: Option<ServerEntry>,
}

impl Identity {
    pub fn new(display_name: impl Into<String>, selected_server: Option<ServerEntry>) -> Self {
        Self {
            display_name: display_name.into(),
            selected_server,
        }
    }
}

/// Session transport, fixed at deployment time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Plain,
    Secure,
}

impl Scheme {
    pub fn from_secure(secure: bool) -> Self {
        if secure {
            Scheme::Secure
        } else {
            Scheme::Plain
        }
    }

    pub fn session(&self) -> &'static str {
        match self {
            Scheme::Plain => "ws",
            Scheme::Secure => "wss",
        }
    }

    pub fn http(&self) -> &'static str {
        match self {
            Scheme::Plain => "http",
            Scheme::Secure => "https",
        }
    }
}

/// Host and port serving both the directory and the game sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub scheme: Scheme,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16, secure: bool) -> Self {
        Self {
            host: host.into(),
            port,
            scheme: Scheme::from_secure(secure),
        }
    }

    pub fn directory_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme.http(),
            self.host,
            self.port,
            SERVERINFO_PATH
        )
    }

    pub fn session_url(&self, server: &ServerEntry) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme.session(),
            self.host,
            self.port,
            server
        )
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT, false)
    }
}

/// Locator of the engine module: a program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub program: String,
    pub args: Vec<String>,
}

impl EntryPoint {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// Everything the engine needs to join a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    name: String,
    connection_address: String,
    entry_point: EntryPoint,
}

impl SessionConfig {
    pub fn new(name: String, connection_address: String, entry_point: EntryPoint) -> Self {
        Self {
            name,
            connection_address,
            entry_point,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection_address(&self) -> &str {
        &self.connection_address
    }

    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry_point
    }
}

/// Turns `/us-east` into `US EAST`
pub fn derive_label(address: &str) -> String {
    address
        .chars()
        .filter(|c| *c != '/')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_label() {
        assert_eq!(derive_label("/us-east"), "US EAST");
        assert_eq!(derive_label("/eu-west"), "EU WEST");
        assert_eq!(derive_label("/asia/tokyo-2"), "ASIATOKYO 2");
        assert_eq!(derive_label(""), "");
    }

    #[test]
    fn test_derive_label_is_pure() {
        let address = "/south-america-east";
        assert_eq!(derive_label(address), derive_label(address));
    }

    #[test]
    fn test_endpoint_urls() {
        let endpoint = Endpoint::default();
        let server = ServerEntry::new("/eu-west");

        assert_eq!(endpoint.directory_url(), "http://localhost:8000/serverinfo");
        assert_eq!(endpoint.session_url(&server), "ws://localhost:8000/eu-west");

        let secure = Endpoint::new("play.example.net", 443, true);
        assert_eq!(
            secure.session_url(&server),
            "wss://play.example.net:443/eu-west"
        );
        assert_eq!(
            secure.directory_url(),
            "https://play.example.net:443/serverinfo"
        );
    }

    #[test]
    fn test_directory_deserializes_from_json_array() {
        let directory: ServerDirectory =
            serde_json::from_str(r#"["/us-east", "/eu-west"]"#).unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.entries()[0].as_str(), "/us-east");
        assert_eq!(directory.position(&ServerEntry::new("/eu-west")), Some(1));

        let labels: Vec<String> = directory.options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["US EAST", "EU WEST"]);
    }

    #[test]
    fn test_directory_rejects_non_string_entries() {
        assert!(serde_json::from_str::<ServerDirectory>(r#"[1, 2]"#).is_err());
        assert!(serde_json::from_str::<ServerDirectory>(r#"{"servers": []}"#).is_err());
    }
}

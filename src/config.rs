use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE: &str = "chillGamers";
const ATLAS_HOST: &str = "cluster0.p62hq.mongodb.net";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `MONGODB_URI` wins when present; otherwise the Atlas URI is assembled
    /// from `DB_USER` and `DB_PASSWORD`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|e| {
                log::warn!("Invalid PORT value {:?} ({}), using {}", raw, e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let mongodb_uri = lookup("MONGODB_URI").unwrap_or_else(|| {
            let user = lookup("DB_USER").unwrap_or_default();
            let password = lookup("DB_PASSWORD").unwrap_or_default();
            atlas_uri(&user, &password)
        });

        let database_name = lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        Self {
            host,
            port,
            mongodb_uri,
            database_name,
        }
    }

    /// Address to bind the HTTP server to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection string with the password masked, for logs.
    pub fn redacted_uri(&self) -> String {
        match (self.mongodb_uri.find("://"), self.mongodb_uri.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let credentials = &self.mongodb_uri[scheme_end + 3..at];
                let user = credentials.split(':').next().unwrap_or_default();
                format!(
                    "{}{}:****{}",
                    &self.mongodb_uri[..scheme_end + 3],
                    user,
                    &self.mongodb_uri[at..]
                )
            }
            _ => self.mongodb_uri.clone(),
        }
    }
}

fn atlas_uri(user: &str, password: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
        user, password, ATLAS_HOST
    )
}

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use base64::Engine;

/// Persistent login session. The bearer token issued by /login is kept in a
/// file under the user's home directory so it survives across invocations,
/// until an explicit logout removes it.
pub struct Session {
    path: PathBuf,
}

impl Session {
    pub fn new() -> Self {
        let home_dir = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let path = PathBuf::from(home_dir).join(".taskbuddy").join("session");
        Session { path }
    }

    /// Session backed by an explicit file, for tests.
    pub fn at(path: PathBuf) -> Self {
        Session { path }
    }

    pub fn token(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let token = raw.trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    pub fn save_token(&self, token: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Display name of the signed-in user, decoded from the JWT payload
    /// (middle segment, base64url JSON with a `username` claim). Any decode
    /// failure yields None rather than an error.
    pub fn username(&self) -> Option<String> {
        let token = self.token()?;
        decode_username(&token)
    }
}

fn decode_username(token: &str) -> Option<String> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims
        .get("username")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jwt(payload: &str) -> String {
        let enc = |s: &str| base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(s);
        format!("{}.{}.{}", enc(r#"{"alg":"HS256"}"#), enc(payload), enc("sig"))
    }

    #[test]
    fn username_from_token_payload() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::at(dir.path().join("session"));
        session
            .save_token(&fake_jwt(r#"{"username":"aravind","exp":1700000000}"#))
            .unwrap();
        assert_eq!(session.username().as_deref(), Some("aravind"));
    }

    #[test]
    fn malformed_token_decodes_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::at(dir.path().join("session"));
        session.save_token("not-a-jwt").unwrap();
        assert_eq!(session.username(), None);

        session.save_token("a.%%%%.c").unwrap();
        assert_eq!(session.username(), None);
    }

    #[test]
    fn clear_removes_the_token() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::at(dir.path().join("session"));
        session.save_token("tok").unwrap();
        assert_eq!(session.token().as_deref(), Some("tok"));
        session.clear().unwrap();
        assert_eq!(session.token(), None);
        // clearing twice is fine
        session.clear().unwrap();
    }
}

use chrono::Utc;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Saved candidate profile. List-valued fields are kept as the client sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub projects: Vec<Value>,
    pub experience: Vec<Value>,
    pub skills: Vec<String>,
    pub profile_photo: String,
    pub location: String,
    pub bio: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    /// Fills blank timestamps with the current time (RFC 3339).
    pub fn stamp(&mut self) {
        let now = Utc::now().to_rfc3339();
        if self.created_at.trim().is_empty() {
            self.created_at = now.clone();
        }
        if self.updated_at.trim().is_empty() {
            self.updated_at = now;
        }
    }
}

/// Process-wide profile map keyed by email. Concurrent writers to the same
/// key are last-writer-wins.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: DashMap<String, Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Profile> {
        self.profiles.get(key).map(|entry| entry.value().clone())
    }

    pub fn put(&self, key: impl Into<String>, profile: Profile) {
        self.profiles.insert(key.into(), profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let store = ProfileStore::new();
        let profile = Profile {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            ..Default::default()
        };
        store.put("asha@example.com", profile.clone());
        assert_eq!(store.get("asha@example.com"), Some(profile));
        assert!(store.get("other@example.com").is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let store = ProfileStore::new();
        store.put("k", Profile { bio: "old".into(), ..Default::default() });
        store.put("k", Profile { bio: "new".into(), ..Default::default() });
        assert_eq!(store.get("k").unwrap().bio, "new");
    }

    #[test]
    fn test_stamp_keeps_client_timestamps() {
        let mut profile = Profile {
            created_at: "2024-01-01T00:00:00+00:00".into(),
            ..Default::default()
        };
        profile.stamp();
        assert_eq!(profile.created_at, "2024-01-01T00:00:00+00:00");
        assert!(chrono::DateTime::parse_from_rfc3339(&profile.updated_at).is_ok());
    }
}

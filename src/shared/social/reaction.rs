//! Reaction kinds and the per-post reaction map.
//!
//! A post carries one `ReactionMap`: a mapping from each of the six reaction
//! kinds to the set of user ids currently holding that reaction. The map
//! upholds one invariant: a user id appears in at most one bucket at any
//! time. `toggle` is the only mutation and preserves the invariant.
//!
//! All six kinds are always present as keys when the map is serialized, so a
//! toggle-off is observable as an empty bucket rather than a missing key.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One of the six reaction kinds a user can place on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
    Heart,
    Angry,
    Laugh,
    Cry,
}

impl ReactionKind {
    /// All reaction kinds, in their canonical order
    pub const ALL: [ReactionKind; 6] = [
        ReactionKind::Like,
        ReactionKind::Dislike,
        ReactionKind::Heart,
        ReactionKind::Angry,
        ReactionKind::Laugh,
        ReactionKind::Cry,
    ];

    /// Parse a reaction kind from its wire name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "like" => Some(ReactionKind::Like),
            "dislike" => Some(ReactionKind::Dislike),
            "heart" => Some(ReactionKind::Heart),
            "angry" => Some(ReactionKind::Angry),
            "laugh" => Some(ReactionKind::Laugh),
            "cry" => Some(ReactionKind::Cry),
            _ => None,
        }
    }

    /// Wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
            ReactionKind::Heart => "heart",
            ReactionKind::Angry => "angry",
            ReactionKind::Laugh => "laugh",
            ReactionKind::Cry => "cry",
        }
    }
}

/// Per-post reaction state: kind -> user ids holding that reaction
///
/// Mutual exclusivity is enforced by `toggle`: placing a reaction removes
/// the user from every other bucket first. Toggling the kind the user
/// already holds removes them entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReactionMap {
    buckets: BTreeMap<ReactionKind, Vec<Uuid>>,
}

impl Default for ReactionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactionMap {
    /// Create an empty map with all six buckets present
    pub fn new() -> Self {
        let mut buckets = BTreeMap::new();
        for kind in ReactionKind::ALL {
            buckets.insert(kind, Vec::new());
        }
        Self { buckets }
    }

    /// Toggle `user_id`'s reaction of `kind`.
    ///
    /// If the user already holds exactly this kind, they are removed from it.
    /// Otherwise the user is removed from every bucket and appended to the
    /// requested one. Returns `true` if the user holds the reaction after
    /// the call.
    pub fn toggle(&mut self, user_id: Uuid, kind: ReactionKind) -> bool {
        let already_held = self
            .buckets
            .get(&kind)
            .map(|users| users.contains(&user_id))
            .unwrap_or(false);

        // Clear the user from every bucket first; mutual exclusivity.
        for users in self.buckets.values_mut() {
            users.retain(|id| *id != user_id);
        }

        if already_held {
            false
        } else {
            self.buckets.entry(kind).or_default().push(user_id);
            true
        }
    }

    /// The kind `user_id` currently holds, if any
    pub fn reaction_of(&self, user_id: Uuid) -> Option<ReactionKind> {
        self.buckets
            .iter()
            .find(|(_, users)| users.contains(&user_id))
            .map(|(kind, _)| *kind)
    }

    /// User ids holding `kind`
    pub fn bucket(&self, kind: ReactionKind) -> &[Uuid] {
        self.buckets
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of reactions across all buckets
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

// Documents written by earlier deployments dropped empty buckets; refill
// missing kinds on the way in so the wire shape stays complete.
impl<'de> Deserialize<'de> for ReactionMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut buckets = BTreeMap::<ReactionKind, Vec<Uuid>>::deserialize(deserializer)?;
        for kind in ReactionKind::ALL {
            buckets.entry(kind).or_default();
        }
        Ok(Self { buckets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn test_toggle_on_then_off() {
        let mut map = ReactionMap::new();
        let u = user();

        assert!(map.toggle(u, ReactionKind::Heart));
        assert_eq!(map.bucket(ReactionKind::Heart), &[u]);

        assert!(!map.toggle(u, ReactionKind::Heart));
        assert!(map.bucket(ReactionKind::Heart).is_empty());
        assert_eq!(map.reaction_of(u), None);
    }

    #[test]
    fn test_switching_kind_clears_previous_bucket() {
        let mut map = ReactionMap::new();
        let u = user();

        map.toggle(u, ReactionKind::Like);
        map.toggle(u, ReactionKind::Cry);

        assert!(map.bucket(ReactionKind::Like).is_empty());
        assert_eq!(map.bucket(ReactionKind::Cry), &[u]);
        assert_eq!(map.reaction_of(u), Some(ReactionKind::Cry));
    }

    #[test]
    fn test_multiple_users_share_a_bucket() {
        let mut map = ReactionMap::new();
        let a = user();
        let b = user();

        map.toggle(a, ReactionKind::Laugh);
        map.toggle(b, ReactionKind::Laugh);

        assert_eq!(map.bucket(ReactionKind::Laugh), &[a, b]);
        assert_eq!(map.total(), 2);
    }

    #[test]
    fn test_serialized_map_always_has_all_kinds() {
        let map = ReactionMap::new();
        let json = serde_json::to_value(&map).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 6);
        for kind in ReactionKind::ALL {
            assert!(object.contains_key(kind.as_str()));
        }
    }

    #[test]
    fn test_deserialize_refills_missing_buckets() {
        // A document written by the previous implementation, which deleted
        // empty buckets instead of keeping them.
        let u = user();
        let json = format!(r#"{{"heart": ["{}"]}}"#, u);

        let map: ReactionMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map.bucket(ReactionKind::Heart), &[u]);
        assert!(map.bucket(ReactionKind::Like).is_empty());

        let round_trip = serde_json::to_value(&map).unwrap();
        assert_eq!(round_trip.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_from_str_round_trip() {
        for kind in ReactionKind::ALL {
            assert_eq!(ReactionKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ReactionKind::from_str("wave"), None);
    }
}

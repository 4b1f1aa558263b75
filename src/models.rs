use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use thiserror::Error;

/// One of the four navigable sections of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    About,
    PlayingWithAi,
    Femtech,
    Contact,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown topic `{0}` (expected one of: about, playing-with-ai, femtech, contact)")]
pub struct UnknownTopic(pub String);

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::About, Topic::PlayingWithAi, Topic::Femtech, Topic::Contact];

    /// Stable identifier, used for interaction ids and HTML anchors.
    pub fn slug(self) -> &'static str {
        match self {
            Topic::About => "about",
            Topic::PlayingWithAi => "playing-with-ai",
            Topic::Femtech => "femtech",
            Topic::Contact => "contact",
        }
    }

    /// Label shown in prompt lines and the bottom bar.
    pub fn label(self) -> &'static str {
        match self {
            Topic::About => "about",
            Topic::PlayingWithAi => "playing with ai",
            Topic::Femtech => "femtech",
            Topic::Contact => "contact",
        }
    }

    pub fn menu_label(self) -> &'static str {
        match self {
            Topic::PlayingWithAi => "playing with AI",
            other => other.label(),
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Topic::About => '1',
            Topic::PlayingWithAi => '2',
            Topic::Femtech => '3',
            Topic::Contact => '4',
        }
    }

    /// Maps a pressed key to a topic: digits and the topic's initial letter.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' | 'a' => Some(Topic::About),
            '2' | 'p' => Some(Topic::PlayingWithAi),
            '3' | 'f' => Some(Topic::Femtech),
            '4' | 'c' => Some(Topic::Contact),
            _ => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Topic::ALL
            .into_iter()
            .find(|topic| topic.slug() == normalized)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionId(String);

impl InteractionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single menu pick in the transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    id: InteractionId,
    topic: Topic,
}

impl Interaction {
    pub fn new(id: InteractionId, topic: Topic) -> Self {
        Self { id, topic }
    }

    pub fn id(&self) -> &InteractionId {
        &self.id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }
}

/// Source of interaction ids. Injected into the session so tests stay deterministic.
pub trait IdGenerator: Send {
    fn next_id(&mut self, topic: Topic) -> InteractionId;
}

/// `<slug>-<n>` with a plain counter.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, topic: Topic) -> InteractionId {
        let id = InteractionId(format!("{}-{}", topic.slug(), self.next));
        self.next += 1;
        id
    }
}

/// `<slug>-<unix millis>`, suffixed with `-<seq>` when the clock has not moved
/// since the previous id.
#[derive(Debug, Default)]
pub struct TimestampIds {
    last_millis: i64,
    seq: u32,
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self, topic: Topic) -> InteractionId {
        let now = Utc::now().timestamp_millis();
        if now > self.last_millis {
            self.last_millis = now;
            self.seq = 0;
            InteractionId(format!("{}-{}", topic.slug(), now))
        } else {
            self.seq += 1;
            InteractionId(format!("{}-{}-{}", topic.slug(), self.last_millis, self.seq))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn parses_slugs_and_labels() {
        assert_eq!("about".parse::<Topic>(), Ok(Topic::About));
        assert_eq!("playing-with-ai".parse::<Topic>(), Ok(Topic::PlayingWithAi));
        assert_eq!("Playing with AI".parse::<Topic>(), Ok(Topic::PlayingWithAi));
        assert_eq!(" FEMTECH ".parse::<Topic>(), Ok(Topic::Femtech));
        assert_eq!(
            "blog".parse::<Topic>(),
            Err(UnknownTopic("blog".to_string()))
        );
    }

    #[test]
    fn keys_map_to_topics() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_key(topic.shortcut()), Some(topic));
        }
        assert_eq!(Topic::from_key('c'), Some(Topic::Contact));
        assert_eq!(Topic::from_key('x'), None);
    }

    #[test]
    fn sequential_ids_embed_topic_and_count() {
        let mut ids = SequentialIds::default();
        assert_eq!(ids.next_id(Topic::About).as_str(), "about-0");
        assert_eq!(ids.next_id(Topic::Contact).as_str(), "contact-1");
    }

    #[test]
    fn timestamp_ids_stay_unique_within_a_millisecond() {
        let mut ids = TimestampIds::default();
        let generated: Vec<_> = (0..500).map(|_| ids.next_id(Topic::Femtech)).collect();
        let unique: HashSet<_> = generated.iter().collect();
        assert_eq!(unique.len(), generated.len());
        assert!(generated.iter().all(|id| id.as_str().starts_with("femtech-")));
    }
}

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    You,
    Bot,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::You => "You",
            Speaker::Bot => "Bot",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Local>,
}

/// Local record of the conversation, kept for display only.
///
/// Entries can be appended but never edited or removed; the transcript
/// lives exactly as long as the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    entries: Vec<ChatEntry>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.entries.push(ChatEntry {
            speaker,
            text: text.into(),
            at: Local::now(),
        });
    }

    /// Records a question and the reply it received, in that order.
    pub fn record_exchange(&mut self, question: &str, reply: &str) {
        self.push(Speaker::You, question);
        self.push(Speaker::Bot, reply);
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_exchange_appends_in_order() {
        let mut transcript = ChatTranscript::new();
        transcript.record_exchange("How do I compost?", "Start with a bin.");
        transcript.record_exchange("And plastics?", "Carry a cloth bag.");

        let speakers: Vec<Speaker> = transcript.entries().iter().map(|e| e.speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::You, Speaker::Bot, Speaker::You, Speaker::Bot]
        );
        assert_eq!(transcript.entries()[2].text, "And plastics?");
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn new_transcript_is_empty() {
        assert!(ChatTranscript::new().is_empty());
    }
}

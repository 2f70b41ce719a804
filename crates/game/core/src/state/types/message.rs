use std::collections::VecDeque;

use super::Color;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
    pub color: Color,
}

/// Bounded log of wrapped message lines; the oldest lines are evicted first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLog {
    lines: VecDeque<Message>,
    capacity: usize,
    width: usize,
}

impl MessageLog {
    pub fn new(capacity: usize, width: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
            width: width.max(1),
        }
    }

    /// Wraps `text` to the log width and appends each resulting line.
    pub fn add(&mut self, text: impl AsRef<str>, color: Color) {
        let text = text.as_ref();
        tracing::trace!(target: "messages", "{}", text);
        for line in textwrap::wrap(text, self.width) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            if self.capacity > 0 {
                self.lines.push_back(Message {
                    text: line.into_owned(),
                    color,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.lines.back()
    }

    /// True when any retained line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

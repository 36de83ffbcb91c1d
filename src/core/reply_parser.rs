//! Turns the model's free-text reply into a [`ParsedMessage`].
//!
//! The reply is expected to carry three labelled lines, `WhatsApp:`,
//! `Subject:` and `Body:`, matched case-insensitively. Only the body may run
//! over several lines. Parsing never fails: anything unrecognised is skipped
//! and absent sections come back empty.

use crate::domain::model::ParsedMessage;

/// Which labelled section the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    None,
    WhatsApp,
    Subject,
    Body,
}

/// A single reply line, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Label(Section, &'a str),
    Text(&'a str),
    Blank,
}

const LABELS: [(&str, Section); 3] = [
    ("whatsapp:", Section::WhatsApp),
    ("subject:", Section::Subject),
    ("body:", Section::Body),
];

impl<'a> Line<'a> {
    pub fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Line::Blank;
        }

        let lowered = trimmed.to_lowercase();
        for (prefix, section) in LABELS {
            if lowered.starts_with(prefix) {
                let value = trimmed
                    .split_once(':')
                    .map(|(_, rest)| rest.trim())
                    .unwrap_or("");
                return Line::Label(section, value);
            }
        }

        Line::Text(trimmed)
    }
}

impl Section {
    /// Next scanner state after `line`.
    pub fn next(self, line: &Line<'_>) -> Section {
        match line {
            Line::Label(section, _) => *section,
            Line::Text(_) | Line::Blank => self,
        }
    }

    fn collects_continuation(self) -> bool {
        self == Section::Body
    }
}

#[derive(Debug, Default)]
pub struct ReplyParser {
    section: Section,
    whatsapp: String,
    subject: String,
    body: Vec<String>,
}

impl ReplyParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn feed(&mut self, raw_line: &str) {
        let line = Line::classify(raw_line);

        match line {
            Line::Label(Section::WhatsApp, value) => self.whatsapp = value.to_string(),
            Line::Label(Section::Subject, value) => self.subject = value.to_string(),
            Line::Label(Section::Body, value) => {
                self.body.clear();
                if !value.is_empty() {
                    self.body.push(value.to_string());
                }
            }
            Line::Text(text) if self.section.collects_continuation() => {
                self.body.push(text.to_string());
            }
            Line::Label(Section::None, _) | Line::Text(_) | Line::Blank => {}
        }

        self.section = self.section.next(&line);
    }

    pub fn finish(self) -> ParsedMessage {
        ParsedMessage {
            whatsapp_message: sanitize_field(&self.whatsapp),
            email_subject: sanitize_field(&self.subject),
            email_body: sanitize_field(&self.body.join(" ")),
        }
    }
}

pub fn parse_reply(raw: &str) -> ParsedMessage {
    if raw.trim().is_empty() {
        return ParsedMessage::default();
    }

    let mut parser = ReplyParser::new();
    for line in raw.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Replaces characters that break delimited output with spaces, then
/// collapses whitespace runs into one space.
pub fn sanitize_field(value: &str) -> String {
    value
        .replace([',', '\n', '\r', '"', '\t'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

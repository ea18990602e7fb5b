//! Minimal IRC line handling for the Twitch dialect.
//!
//! Only the handful of commands the bot reacts to are mapped to events;
//! everything else is parsed and dropped.

use super::event::{ChatMessage, InboundEvent};

const ACTION_START: &str = "\u{1}ACTION ";
const CTCP_DELIM: char = '\u{1}';

/// One parsed IRC line, borrowing from the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// Raw IRCv3 tag string without the leading `@`.
    pub tags: Option<&'a str>,
    /// Source prefix without the leading `:`.
    pub prefix: Option<&'a str>,
    pub command: &'a str,
    pub params: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// Parse a single line. Returns `None` for blank input.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut rest = raw.trim_end_matches(['\r', '\n']).trim_start_matches(' ');

        let mut tags = None;
        if let Some(stripped) = rest.strip_prefix('@') {
            let (t, r) = stripped.split_once(' ')?;
            tags = Some(t);
            rest = r.trim_start_matches(' ');
        }

        let mut prefix = None;
        if let Some(stripped) = rest.strip_prefix(':') {
            let (p, r) = stripped.split_once(' ')?;
            prefix = Some(p);
            rest = r.trim_start_matches(' ');
        }

        let (command, mut rest) = match rest.split_once(' ') {
            Some((c, r)) => (c, r),
            None => (rest, ""),
        };
        if command.is_empty() {
            return None;
        }

        let mut params = Vec::new();
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(trailing) = rest.strip_prefix(':') {
                params.push(trailing);
                break;
            }
            match rest.split_once(' ') {
                Some((param, r)) => {
                    params.push(param);
                    rest = r;
                }
                None => {
                    params.push(rest);
                    break;
                }
            }
        }

        Some(Self {
            tags,
            prefix,
            command,
            params,
        })
    }

    /// Nick part of the prefix (`nick!user@host` -> `nick`).
    pub fn nick(&self) -> Option<&'a str> {
        let prefix = self.prefix?;
        let nick = prefix.split(['!', '@']).next().unwrap_or(prefix);
        (!nick.is_empty()).then_some(nick)
    }

    pub fn param(&self, index: usize) -> Option<&'a str> {
        self.params.get(index).copied()
    }

    /// Map the line to an inbound event, if the bot cares about it.
    pub fn to_event(&self) -> Option<InboundEvent> {
        match self.command {
            "001" => Some(InboundEvent::Connected),
            "JOIN" => Some(InboundEvent::Joined {
                channel: self.param(0)?.to_string(),
                nick: self.nick()?.to_string(),
            }),
            "PART" => Some(InboundEvent::Parted {
                channel: self.param(0)?.to_string(),
                nick: self.nick()?.to_string(),
            }),
            "PRIVMSG" => {
                let origin = self.nick()?;
                let target = self.param(0)?;
                let text = self.param(1)?;

                if !target.starts_with('#') {
                    return Some(ChatMessage::whisper(origin, text).into());
                }
                if let Some(action) = text.strip_prefix(ACTION_START) {
                    let action = action.strip_suffix(CTCP_DELIM).unwrap_or(action);
                    return Some(ChatMessage::action(origin, target, action).into());
                }
                Some(ChatMessage::channel(origin, target, text).into())
            }
            "WHISPER" => {
                let origin = self.nick()?;
                let text = self.param(1)?;
                Some(ChatMessage::whisper(origin, text).into())
            }
            _ => None,
        }
    }
}

/// Collapse line breaks so a message cannot smuggle extra IRC commands.
pub(crate) fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MessageKind;

    #[test]
    fn test_parse_full_line() {
        let line = Line::parse(
            "@badge-info=;color=#FF0000 :domsson!domsson@domsson.tmi.twitch.tv PRIVMSG #domsson :!time please\r\n",
        )
        .unwrap();
        assert_eq!(line.tags, Some("badge-info=;color=#FF0000"));
        assert_eq!(line.prefix, Some("domsson!domsson@domsson.tmi.twitch.tv"));
        assert_eq!(line.command, "PRIVMSG");
        assert_eq!(line.params, vec!["#domsson", "!time please"]);
        assert_eq!(line.nick(), Some("domsson"));
    }

    #[test]
    fn test_parse_without_prefix() {
        let line = Line::parse("PING :tmi.twitch.tv").unwrap();
        assert_eq!(line.prefix, None);
        assert_eq!(line.command, "PING");
        assert_eq!(line.param(0), Some("tmi.twitch.tv"));
    }

    #[test]
    fn test_parse_blank_is_none() {
        assert!(Line::parse("").is_none());
        assert!(Line::parse("\r\n").is_none());
    }

    #[test]
    fn test_welcome_maps_to_connected() {
        let line = Line::parse(":tmi.twitch.tv 001 kaulmate :Welcome, GLHF!").unwrap();
        assert_eq!(line.to_event(), Some(InboundEvent::Connected));
    }

    #[test]
    fn test_join_and_part() {
        let join = Line::parse(":kaulmate!kaulmate@kaulmate.tmi.twitch.tv JOIN #domsson").unwrap();
        assert_eq!(
            join.to_event(),
            Some(InboundEvent::Joined {
                channel: "#domsson".into(),
                nick: "kaulmate".into()
            })
        );

        let part = Line::parse(":viewer!viewer@viewer.tmi.twitch.tv PART #domsson").unwrap();
        assert!(matches!(
            part.to_event(),
            Some(InboundEvent::Parted { nick, .. }) if nick == "viewer"
        ));
    }

    #[test]
    fn test_action_is_unwrapped() {
        let raw = ":viewer!viewer@viewer.tmi.twitch.tv PRIVMSG #domsson :\u{1}ACTION waves\u{1}";
        let line = Line::parse(raw).unwrap();
        match line.to_event() {
            Some(InboundEvent::Message(msg)) => {
                assert_eq!(msg.kind, MessageKind::Action);
                assert_eq!(msg.text, "waves");
                assert_eq!(msg.channel.as_deref(), Some("#domsson"));
            }
            other => panic!("expected action, got {other:?}"),
        }
    }

    #[test]
    fn test_whisper() {
        let line =
            Line::parse(":viewer!viewer@viewer.tmi.twitch.tv WHISPER kaulmate :!bot").unwrap();
        match line.to_event() {
            Some(InboundEvent::Message(msg)) => {
                assert_eq!(msg.kind, MessageKind::Whisper);
                assert_eq!(msg.origin, "viewer");
                assert_eq!(msg.channel, None);
                assert_eq!(msg.text, "!bot");
            }
            other => panic!("expected whisper, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_commands_are_dropped() {
        let line = Line::parse(":tmi.twitch.tv CAP * ACK :twitch.tv/membership").unwrap();
        assert_eq!(line.to_event(), None);
    }

    #[test]
    fn test_sanitize_strips_line_breaks() {
        assert_eq!(sanitize("hi\r\nQUIT"), "hi  QUIT");
    }
}

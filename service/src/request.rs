//! Decoding of client request bodies.
//!
//! Each body is one JSON object. Objects with a `fast_mode` key toggle
//! fast mode, anything else must be a gradient override.

use lighthaus_composer::{ControlMessage, FastModeRequest, Instant, OverrideRequest};
use serde_json::Value;

use crate::error::RequestError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    Override(OverrideRequest),
    FastMode(FastModeRequest),
}

impl Request {
    pub fn decode(body: &str) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_str(body)?;
        if value.get("fast_mode").is_some() {
            Ok(Self::FastMode(serde_json::from_value(value)?))
        } else {
            Ok(Self::Override(serde_json::from_value(value)?))
        }
    }

    /// Validate into a control message stamped with `now`
    pub fn into_message<S>(self, now: Instant) -> Result<ControlMessage<S>, RequestError> {
        match self {
            Self::Override(request) => Ok(request.into_message(now)?),
            Self::FastMode(request) => Ok(request.into_message()),
        }
    }
}

/// Decode and validate one request body
pub fn parse_message<S>(body: &str, now: Instant) -> Result<ControlMessage<S>, RequestError> {
    Request::decode(body)?.into_message(now)
}

#[cfg(test)]
mod tests {
    use lighthaus_composer::{Gradient, Rgb, ValidationError};

    use super::*;

    type Message = ControlMessage<Gradient>;

    fn now() -> Instant {
        Instant::from_secs(42)
    }

    #[test]
    fn override_with_defaults() {
        let message: Message = parse_message(
            r#"{"color": [{"r": 0, "g": 0, "b": 255}, {"r": 255, "g": 255, "b": 0}]}"#,
            now(),
        )
        .unwrap();
        let ControlMessage::UserGradientOverride(gradient) = message else {
            panic!("expected an override, got {message:?}");
        };
        assert_eq!(gradient.color_1(), Rgb::new(0, 0, 255));
        assert_eq!(gradient.color_2(), Rgb::new(255, 255, 0));
        assert_eq!(gradient.brightness(), 0.5);
        assert_eq!(gradient.scroll_speed(), 0.5);
        assert_eq!(gradient.timestamp(), now());
    }

    #[test]
    fn override_levels_are_clamped() {
        let message: Message = parse_message(
            r#"{"color": [{"r": 1, "g": 2, "b": 3}, {"r": 4, "g": 5, "b": 6}],
                "scroll_speed": 3.5, "brightness": -1}"#,
            now(),
        )
        .unwrap();
        let ControlMessage::UserGradientOverride(gradient) = message else {
            panic!("expected an override, got {message:?}");
        };
        assert_eq!(gradient.scroll_speed(), 1.0);
        assert_eq!(gradient.brightness(), 0.0);
    }

    #[test]
    fn legacy_scrollspeed_key_is_accepted() {
        let message: Message = parse_message(
            r#"{"color": [{"r": 1, "g": 2, "b": 3}, {"r": 4, "g": 5, "b": 6}], "scrollspeed": 0.3}"#,
            now(),
        )
        .unwrap();
        let ControlMessage::UserGradientOverride(gradient) = message else {
            panic!("expected an override, got {message:?}");
        };
        assert_eq!(gradient.scroll_speed(), 0.3);
    }

    #[test]
    fn single_color_is_rejected() {
        let result: Result<Message, _> =
            parse_message(r#"{"color": [{"r": 1, "g": 2, "b": 3}]}"#, now());
        assert!(matches!(result, Err(RequestError::Json(_))));
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let result: Result<Message, _> = parse_message(
            r#"{"color": [{"r": 300, "g": 0, "b": 0}, {"r": 0, "g": 0, "b": 0}]}"#,
            now(),
        );
        assert!(matches!(
            result,
            Err(RequestError::Invalid(ValidationError::ChannelOutOfRange(300)))
        ));
    }

    #[test]
    fn wrong_types_are_rejected() {
        let result: Result<Message, _> = parse_message(
            r#"{"color": [{"r": "red", "g": 0, "b": 0}, {"r": 0, "g": 0, "b": 0}]}"#,
            now(),
        );
        assert!(matches!(result, Err(RequestError::Json(_))));

        let result: Result<Message, _> = parse_message(r#"{"fast_mode": "yes"}"#, now());
        assert!(matches!(result, Err(RequestError::Json(_))));

        let result: Result<Message, _> = parse_message("not json", now());
        assert!(matches!(result, Err(RequestError::Json(_))));
    }

    #[test]
    fn fast_mode_toggle() {
        let message: Message = parse_message(r#"{"fast_mode": true}"#, now()).unwrap();
        assert!(matches!(message, ControlMessage::FastModeToggled(true)));
    }
}

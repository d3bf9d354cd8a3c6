//! Declarative configuration handed to a view at construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

/// Identifier of an image resource, resolved by the host's loader.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Playback policy. Fixed for the lifetime of a view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Loop forever without user interaction and without the overlay.
    #[serde(rename = "autoPlay", alias = "auto_play", default)]
    pub auto_play: bool,
}

impl PlaybackConfig {
    pub fn auto_play() -> Self {
        Self { auto_play: true }
    }

    pub fn tap_to_play() -> Self {
        Self { auto_play: false }
    }
}

/// Everything the declarative UI description can say about a view:
/// the image source and the playback policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDescriptor {
    #[serde(default)]
    pub src: Option<ResourceId>,
    #[serde(flatten)]
    pub playback: PlaybackConfig,
}

impl ViewDescriptor {
    pub fn new(src: Option<ResourceId>, playback: PlaybackConfig) -> Self {
        Self { src, playback }
    }

    /// Parse `{"src": "...", "autoPlay": bool}`; both keys are optional.
    pub fn from_json(json: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a descriptor from a flat attribute list as found on a markup element.
    ///
    /// The source is the first attribute named `src` with a non-empty value.
    /// `autoPlay` (or `auto_play`) must be `true` or `false`. Other attributes
    /// belong to the host and are ignored.
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut descriptor = Self::default();
        for (name, value) in attrs {
            match name {
                "src" if descriptor.src.is_none() => {
                    let value = value.trim();
                    if !value.is_empty() {
                        descriptor.src = Some(ResourceId::new(value));
                    }
                }
                "autoPlay" | "auto_play" => {
                    descriptor.playback.auto_play =
                        value
                            .trim()
                            .parse::<bool>()
                            .map_err(|_| DescriptorError::NotABoolean {
                                name: name.to_string(),
                                value: value.to_string(),
                            })?;
                }
                _ => {}
            }
        }
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_defaults_to_tap_to_play_without_source() {
        let d = ViewDescriptor::from_json("{}").unwrap();
        assert_eq!(d.src, None);
        assert!(!d.playback.auto_play);
    }

    #[test]
    fn json_accepts_both_spellings() {
        let d = ViewDescriptor::from_json(r#"{"src":"raw/loading","autoPlay":true}"#).unwrap();
        assert_eq!(d.src, Some(ResourceId::new("raw/loading")));
        assert!(d.playback.auto_play);

        let d = ViewDescriptor::from_json(r#"{"auto_play":true}"#).unwrap();
        assert!(d.playback.auto_play);
    }

    #[test]
    fn json_rejects_wrong_types() {
        let err = ViewDescriptor::from_json(r#"{"autoPlay":"yes"}"#).unwrap_err();
        assert!(matches!(err, DescriptorError::Json { .. }));
    }

    #[test]
    fn first_src_attribute_wins() {
        let d = ViewDescriptor::from_attributes([
            ("layout_width", "match_parent"),
            ("src", "raw/first"),
            ("src", "raw/second"),
        ])
        .unwrap();
        assert_eq!(d.src.as_ref().map(ResourceId::as_str), Some("raw/first"));
    }

    #[test]
    fn empty_src_is_no_source() {
        let d = ViewDescriptor::from_attributes([("src", "  ")]).unwrap();
        assert_eq!(d.src, None);
    }

    #[test]
    fn auto_play_attribute_must_be_boolean() {
        let d = ViewDescriptor::from_attributes([("auto_play", "true")]).unwrap();
        assert!(d.playback.auto_play);

        let err = ViewDescriptor::from_attributes([("autoPlay", "1")]).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::NotABoolean {
                name: "autoPlay".into(),
                value: "1".into()
            }
        );
    }
}

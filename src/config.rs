use crate::{PhonInvError, PhonInvResult};
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use strum::Display;

/// What to do with an inventory whose language key has no mapping entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MissingLanguagePolicy {
    /// Drop the inventory and all of its values.
    #[default]
    Skip,
    /// Keep the values and add a language row without metadata.
    NullFill,
    /// Abort the run.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineSettings {
    pub missing_language: MissingLanguagePolicy,
    pub tone_separator: String,
    pub resolved_prefix: String,
    pub unresolved_prefix: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            missing_language: MissingLanguagePolicy::default(),
            tone_separator: ",".to_string(),
            resolved_prefix: "IPA".to_string(),
            unresolved_prefix: "UNK".to_string(),
        }
    }
}

impl PipelineSettings {
    pub fn from_toml(text: &str) -> PhonInvResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Settings from `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> PhonInvResult<Self> {
        match path {
            Some(p) => {
                let text = fs::read_to_string(p).map_err(|e| PhonInvError::io(p, e))?;
                Self::from_toml(&text)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn t_defaults() {
        let settings = PipelineSettings::from_toml("").unwrap();
        assert_eq!(settings, PipelineSettings::default());
        assert_eq!(settings.missing_language, MissingLanguagePolicy::Skip);
        assert_eq!(settings.tone_separator, ",");
    }

    #[test]
    fn t_parse() {
        let settings = PipelineSettings::from_toml(
            "missing_language = \"null-fill\"\ntone_separator = \" \"\nresolved_prefix = \"BIPA\"",
        )
        .unwrap();
        assert_eq!(settings.missing_language, MissingLanguagePolicy::NullFill);
        assert_eq!(settings.tone_separator, " ");
        assert_eq!(settings.resolved_prefix, "BIPA");
        assert_eq!(settings.unresolved_prefix, "UNK");
    }

    #[test]
    fn t_bad_config() {
        assert!(matches!(
            PipelineSettings::from_toml("missing_language = \"ignore\""),
            Err(PhonInvError::Config(_))
        ));
        assert!(PipelineSettings::from_toml("colour = 1").is_err());
    }

    #[test]
    fn t_policy_display() {
        assert_eq!(MissingLanguagePolicy::NullFill.to_string(), "null-fill");
    }
}

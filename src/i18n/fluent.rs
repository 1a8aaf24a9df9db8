// SPDX-License-Identifier: MPL-2.0
//! Fluent-based translation bundles and locale resolution.

use crate::app::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const FALLBACK_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
    fallback_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                continue;
            };
            if let Some(content) = Asset::get(filename) {
                let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
                let res = FluentResource::try_new(source).expect("Failed to parse FTL file.");
                let mut bundle = FluentBundle::new(vec![locale.clone()]);
                bundle.set_use_isolating(false);
                bundle.add_resource(res).expect("Failed to add resource.");
                bundles.insert(locale.clone(), bundle);
                available_locales.push(locale);
            }
        }

        let fallback_locale: LanguageIdentifier = FALLBACK_LOCALE.parse().unwrap();
        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(|| fallback_locale.clone());

        Self {
            bundles,
            available_locales,
            current_locale,
            fallback_locale,
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    /// Translates a message key for the current locale, falling back to
    /// `en-US` and finally to a visible `MISSING:` marker.
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates a message key with interpolation arguments.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        for locale in [&self.current_locale, &self.fallback_locale] {
            if let Some(bundle) = self.bundles.get(locale) {
                if let Some(msg) = bundle.get_message(key) {
                    if let Some(pattern) = msg.value() {
                        let mut errors = vec![];
                        let value = bundle.format_pattern(pattern, args, &mut errors);
                        if errors.is_empty() {
                            return value.to_string();
                        }
                    }
                }
            }
        }
        format!("MISSING: {key}")
    }
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. CLI args
    if let Some(lang_str) = cli_lang {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 2. Config file
    if let Some(lang_str) = &config.general.language {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 3. OS locale
    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if available.contains(&os_lang) {
                return Some(os_lang);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_locale_prefers_cli() {
        let config = Config::default();
        let available: Vec<LanguageIdentifier> =
            vec!["en-US".parse().unwrap(), "fr".parse().unwrap()];
        let lang = resolve_locale(Some("fr".to_string()), &config, &available);
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_falls_back_to_config() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        let available: Vec<LanguageIdentifier> =
            vec!["en-US".parse().unwrap(), "fr".parse().unwrap()];
        let lang = resolve_locale(None, &config, &available);
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn unknown_cli_locale_is_ignored() {
        let config = Config::default();
        let available: Vec<LanguageIdentifier> = vec!["en-US".parse().unwrap()];
        let lang = resolve_locale(Some("xx-YY".to_string()), &config, &available);
        assert_ne!(lang, Some("xx-YY".parse().unwrap()));
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::default();
        assert_eq!(i18n.tr("definitely-not-a-key"), "MISSING: definitely-not-a-key");
    }

    #[test]
    fn embedded_locales_include_english() {
        let i18n = I18n::default();
        let en: LanguageIdentifier = "en-US".parse().unwrap();
        assert!(i18n.available_locales.contains(&en));
    }

    #[test]
    fn tr_with_args_interpolates() {
        let mut i18n = I18n::default();
        i18n.set_locale("en-US".parse().unwrap());
        let text = i18n.tr_with_args("search-result-count", &[("count", "3")]);
        assert!(text.contains('3'), "got: {text}");
    }
}

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use unic_langid::LanguageIdentifier;
use std::collections::HashMap;
use std::fs;
use std::sync::OnceLock;
use anyhow::Result;

use crate::state::Language;

/// Languages the bot ships message bundles for. Russian doubles as the
/// fallback: asking for a key in any other language code resolves against
/// the Russian bundle.
const SUPPORTED_LANGUAGES: [&str; 2] = ["ru", "kk"];
const FALLBACK_LANGUAGE: &str = "ru";

/// Localization manager holding one fluent bundle per language.
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for code in SUPPORTED_LANGUAGES {
            let locale: LanguageIdentifier = code.parse()?;
            let bundle = Self::create_bundle(&locale)?;
            bundles.insert(code.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: &LanguageIdentifier) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);

        // Load the main resource file
        let resource_path = format!("./locales/{}/main.ftl", locale);
        if let Ok(content) = fs::read_to_string(&resource_path) {
            if let Ok(resource) = FluentResource::try_new(content) {
                let _ = bundle.add_resource(resource);
            }
        }

        Ok(bundle)
    }

    /// Get a localized message in the given language code, falling back to
    /// Russian for unsupported codes.
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self.bundles.get(language) {
            Some(bundle) => bundle,
            None => &self.bundles[FALLBACK_LANGUAGE],
        };

        let msg = match bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {}", key),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {}", key),
        };

        let mut errors = vec![];
        if let Some(args) = args {
            let fluent_args =
                FluentArgs::from_iter(args.iter().map(|(k, v)| (*k, FluentValue::from(*v))));
            bundle
                .format_pattern(pattern, Some(&fluent_args), &mut errors)
                .into_owned()
        } else {
            bundle
                .format_pattern(pattern, None, &mut errors)
                .into_owned()
        }
    }
}

/// Global localization instance
static LOCALIZATION_MANAGER: OnceLock<LocalizationManager> = OnceLock::new();

/// Initialize the global localization manager. Safe to call more than once;
/// later calls keep the already-loaded bundles.
pub fn init_localization() -> Result<()> {
    if LOCALIZATION_MANAGER.get().is_none() {
        let manager = LocalizationManager::new()?;
        let _ = LOCALIZATION_MANAGER.set(manager);
    }
    Ok(())
}

/// Get the global localization manager
fn manager() -> &'static LocalizationManager {
    LOCALIZATION_MANAGER
        .get()
        .expect("Localization manager not initialized")
}

/// Convenience function to get a localized message
pub fn t(key: &str, language: Language) -> String {
    manager().get_message_in_language(key, language.code(), None)
}

/// Convenience function to get a localized message with arguments
pub fn t_args(key: &str, args: &[(&str, &str)], language: Language) -> String {
    let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
    manager().get_message_in_language(key, language.code(), Some(&args_map))
}

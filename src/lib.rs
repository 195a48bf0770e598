#![doc = include_str!("../README.md")]

//! ## Model
//!
//! Two read-only structures back the client:
//!
//! - [`I18n`]: immutable per-locale message catalogs with an active and a
//!   fallback locale. Switching the active locale re-points which catalog
//!   subsequent lookups consult; catalog contents never change after load.
//! - [`RouteTable`]: an ordered path-to-view table whose views are produced
//!   lazily by async loaders.
//!
//! Catalogs come either bundled at build time (always on `wasm32` and under the
//! `bundle-only` feature) or from a messages folder read at runtime on native
//! targets.

mod locales;
pub mod router;

pub use router::{RouteEntry, RouteTable, RouterError, ViewFuture, ViewLoadError};

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::locales::is_known_locale_tag;

// ---------- Configuration ----------

/// Controls how message catalogs are loaded and which locales are active.
#[derive(Debug, Clone)]
pub struct I18nConfig {
    /// Whether to use the catalogs bundled at build time (true) or read the
    /// messages folder at runtime (false). Automatically `true` on `wasm32`
    /// targets and when the `bundle-only` feature is enabled.
    pub use_bundled_messages: bool,
    /// Folder holding `<locale>/*.json` catalog files for runtime loading.
    pub messages_folder: String,
    /// Locale active at startup.
    pub default_locale: String,
    /// Locale consulted when the active locale is missing a key.
    pub fallback_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            use_bundled_messages: cfg!(target_arch = "wasm32") || cfg!(feature = "bundle-only"),
            messages_folder: "messages".to_string(),
            default_locale: "en-US".to_string(),
            fallback_locale: "en-US".to_string(),
        }
    }
}

// ---------- Catalogs ----------

/// Flat message catalog for one locale: stable key to display string.
pub type Catalog = HashMap<String, String>;

/// All loaded catalogs, keyed by locale tag.
///
/// Immutable once handed to [`I18n`]; the active locale only selects which
/// catalog lookups consult.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Catalogs {
    /// Locale tag to catalog.
    locales: HashMap<String, Catalog>,
}

impl Catalogs {
    /// Adds or replaces the catalog for a locale.
    pub fn insert(&mut self, locale: impl Into<String>, catalog: Catalog) -> Option<Catalog> {
        self.locales.insert(locale.into(), catalog)
    }

    /// Returns the catalog for a locale, if one is loaded.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&Catalog> {
        self.locales.get(locale)
    }

    /// True when a catalog exists for the locale.
    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// True when no catalogs are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

// ---------- Errors ----------

/// Lookup and locale-selection failures.
///
/// Both are local, recoverable conditions; [`LocaleView::t`] surfaces a
/// visible fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    /// The key has no entry in the requested locale or the fallback locale.
    #[error("missing translation key '{key}' in locale '{locale}'")]
    MissingTranslationKey {
        /// Locale the lookup was addressed to.
        locale: String,
        /// Requested message key.
        key: String,
    },
    /// No catalog is loaded for the locale.
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
}

/// Failures while reading catalogs from the messages folder.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The messages folder does not exist.
    #[error("messages folder '{0}' not found")]
    FolderNotFound(String),
    /// Reading the folder or one of its files failed.
    #[error("io failure while reading catalogs: {0}")]
    Io(#[from] std::io::Error),
    /// A catalog file is not valid JSON.
    #[error("invalid catalog file '{path}': {source}")]
    Parse {
        /// Offending file path.
        path: String,
        /// Parser failure.
        #[source]
        source: serde_json::Error,
    },
}

// ---------- I18n ----------

/// Message catalogs plus the active and fallback locale.
///
/// # Example
///
/// ```
/// use shortlink_ui::{Catalog, Catalogs, I18n};
///
/// let mut en = Catalog::new();
/// en.insert("mainTitle".into(), "URL Shortener".into());
/// let mut catalogs = Catalogs::default();
/// catalogs.insert("en-US", en);
///
/// let i18n = I18n::from_catalogs(catalogs, "en-US", "en-US");
/// assert_eq!(i18n.active().t("mainTitle"), "URL Shortener");
/// ```
#[derive(Debug, Clone)]
pub struct I18n {
    /// All loaded catalogs.
    catalogs: Catalogs,
    /// Locale consulted first by [`I18n::active`] views.
    active_locale: String,
    /// Locale consulted when the active one misses a key.
    fallback_locale: String,
    /// Sorted locale tags with a loaded catalog.
    available_locales: Vec<String>,
}

impl Default for I18n {
    fn default() -> Self {
        Self::from_config(I18nConfig::default())
    }
}

impl I18n {
    /// Loads catalogs as directed by the config.
    #[must_use]
    pub fn from_config(config: I18nConfig) -> Self {
        let catalogs = if config.use_bundled_messages {
            load_bundled_catalogs()
        } else {
            load_filesystem_catalogs(&config.messages_folder)
        };
        Self::from_catalogs(catalogs, config.default_locale, config.fallback_locale)
    }

    /// Builds an instance from catalogs assembled in memory.
    pub fn from_catalogs(
        catalogs: Catalogs,
        default_locale: impl Into<String>,
        fallback_locale: impl Into<String>,
    ) -> Self {
        let active_locale = default_locale.into();
        let fallback_locale = fallback_locale.into();
        let mut available_locales: Vec<String> = catalogs.locales.keys().cloned().collect();
        available_locales.sort();

        if !catalogs.contains(&active_locale) {
            warn!(locale = %active_locale, "default locale has no catalog");
        }
        if !catalogs.contains(&fallback_locale) {
            warn!(locale = %fallback_locale, "fallback locale has no catalog");
        }

        Self {
            catalogs,
            active_locale,
            fallback_locale,
            available_locales,
        }
    }

    /// View over an explicitly chosen locale.
    ///
    /// Lookups through the view consult this locale first and the fallback
    /// locale second, independent of the active locale.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnknownLocale`] when no catalog is loaded for the
    /// locale.
    pub fn locale_view(&self, locale: &str) -> Result<LocaleView<'_>, I18nError> {
        if !self.catalogs.contains(locale) {
            return Err(I18nError::UnknownLocale(locale.to_string()));
        }
        Ok(LocaleView {
            locale: locale.to_string(),
            catalog: self.catalog_or_empty(locale),
            fallback: self.catalog_or_empty(&self.fallback_locale),
        })
    }

    /// View over the active locale.
    #[must_use]
    pub fn active(&self) -> LocaleView<'_> {
        LocaleView {
            locale: self.active_locale.clone(),
            catalog: self.catalog_or_empty(&self.active_locale),
            fallback: self.catalog_or_empty(&self.fallback_locale),
        }
    }

    /// Switches the active locale.
    ///
    /// Subsequent [`I18n::active`] views consult the new locale; no catalog
    /// content changes.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnknownLocale`] when no catalog is loaded for the
    /// locale, leaving the active locale unchanged.
    pub fn set_locale(&mut self, locale: &str) -> Result<(), I18nError> {
        if !self.catalogs.contains(locale) {
            warn!(locale = %locale, "cannot switch to locale without a catalog");
            return Err(I18nError::UnknownLocale(locale.to_string()));
        }
        self.active_locale = locale.to_string();
        Ok(())
    }

    /// Switches the locale consulted on missing keys.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::UnknownLocale`] when no catalog is loaded for the
    /// locale, leaving the fallback locale unchanged.
    pub fn set_fallback_locale(&mut self, locale: &str) -> Result<(), I18nError> {
        if !self.catalogs.contains(locale) {
            warn!(locale = %locale, "cannot use a locale without a catalog as fallback");
            return Err(I18nError::UnknownLocale(locale.to_string()));
        }
        self.fallback_locale = locale.to_string();
        Ok(())
    }

    /// Currently active locale tag.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.active_locale
    }

    /// Sorted locale tags with a loaded catalog.
    #[must_use]
    pub fn available_locales(&self) -> &[String] {
        &self.available_locales
    }

    /// All loaded catalogs.
    #[must_use]
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Checks that every key known to any locale exists in all locales, so no
    /// locale ships orphaned or missing translations.
    ///
    /// # Errors
    ///
    /// Returns the first [`I18nError::MissingTranslationKey`] violation found.
    pub fn verify_key_parity(&self) -> Result<(), I18nError> {
        let mut all_keys: BTreeSet<&str> = BTreeSet::new();
        for locale in &self.available_locales {
            if let Some(catalog) = self.catalogs.get(locale) {
                all_keys.extend(catalog.keys().map(String::as_str));
            }
        }

        for locale in &self.available_locales {
            let Some(catalog) = self.catalogs.get(locale) else {
                continue;
            };
            for key in &all_keys {
                if !catalog.contains_key(*key) {
                    return Err(I18nError::MissingTranslationKey {
                        locale: locale.clone(),
                        key: (*key).to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Catalog for the locale, or the shared empty catalog when absent.
    fn catalog_or_empty(&self, locale: &str) -> &Catalog {
        self.catalogs.get(locale).unwrap_or(&*EMPTY_CATALOG)
    }
}

// ---------- Loaders ----------

/// Shared lookup target for locales without a catalog; every miss then runs
/// through the normal fallback chain.
static EMPTY_CATALOG: Lazy<Catalog> = Lazy::new(HashMap::new);

/// Catalogs bundled by the build script.
fn load_bundled_catalogs() -> Catalogs {
    const BUNDLED_MESSAGES: &str = include_str!(concat!(env!("OUT_DIR"), "/all_messages.json"));

    let catalogs = match serde_json::from_str::<Catalogs>(BUNDLED_MESSAGES) {
        Ok(catalogs) => catalogs,
        Err(err) => {
            warn!(error = %err, "bundled catalogs are malformed");
            return Catalogs::default();
        }
    };
    if catalogs.is_empty() {
        warn!("no bundled catalogs; lookups will surface raw keys");
    }
    warn_on_unknown_tags(&catalogs);
    catalogs
}

/// Runtime loading from the messages folder (development mode).
#[cfg(not(target_arch = "wasm32"))]
fn load_filesystem_catalogs(messages_folder: &str) -> Catalogs {
    match load_catalogs_from_fs(messages_folder) {
        Ok(catalogs) => {
            warn_on_unknown_tags(&catalogs);
            catalogs
        }
        Err(err) => {
            warn!(error = %err, folder = %messages_folder, "failed to load catalogs, using bundled set");
            load_bundled_catalogs()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_filesystem_catalogs(_messages_folder: &str) -> Catalogs {
    warn!("filesystem catalogs are unavailable on wasm, using bundled set");
    load_bundled_catalogs()
}

/// Reads `<locale>/*.json` under the messages folder, merging each locale's
/// files into one flat catalog.
#[cfg(not(target_arch = "wasm32"))]
fn load_catalogs_from_fs(messages_folder: &str) -> Result<Catalogs, CatalogLoadError> {
    use std::fs;
    use std::path::Path;

    let root = Path::new(messages_folder);
    if !root.exists() {
        return Err(CatalogLoadError::FolderNotFound(messages_folder.to_string()));
    }

    let mut catalogs = Catalogs::default();

    for locale_entry in fs::read_dir(root)? {
        let locale_dir = locale_entry?;
        if !locale_dir.file_type()?.is_dir() {
            continue;
        }
        let locale = locale_dir.file_name().to_string_lossy().to_string();
        let mut catalog = Catalog::new();

        for file_entry in fs::read_dir(locale_dir.path())? {
            let path = file_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            let json: serde_json::Value =
                serde_json::from_str(&content).map_err(|source| CatalogLoadError::Parse {
                    path: path.display().to_string(),
                    source,
                })?;
            merge_flat_strings(&mut catalog, &locale, json);
        }

        catalogs.insert(locale, catalog);
    }

    Ok(catalogs)
}

/// Copies flat string entries into the catalog; anything nested is skipped.
#[cfg(not(target_arch = "wasm32"))]
fn merge_flat_strings(catalog: &mut Catalog, locale: &str, json: serde_json::Value) {
    let serde_json::Value::Object(entries) = json else {
        warn!(locale = %locale, "catalog file is not a JSON object, skipping");
        return;
    };
    for (key, value) in entries {
        match value {
            serde_json::Value::String(text) => {
                catalog.insert(key, text);
            }
            _ => warn!(locale = %locale, key = %key, "skipping non-string catalog value"),
        }
    }
}

/// Warns once per locale folder whose name is not a recognised locale tag.
fn warn_on_unknown_tags(catalogs: &Catalogs) {
    for locale in catalogs.locales.keys() {
        if !is_known_locale_tag(locale) {
            warn!(locale = %locale, "catalog locale is not a recognised locale tag");
        }
    }
}

// ---------- Locale views ----------

/// Placeholder sites in message templates, `{{name}}`.
static ARG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\w*)\}\}").unwrap());

/// Borrowed view over one locale's catalog plus the fallback catalog.
///
/// Obtained from [`I18n::active`] or [`I18n::locale_view`]. A view taken
/// before a locale switch keeps reading its original catalog.
#[derive(Debug, Clone)]
pub struct LocaleView<'a> {
    /// Locale this view is addressed to.
    locale: String,
    /// Catalog consulted first.
    catalog: &'a Catalog,
    /// Catalog consulted when the first misses a key.
    fallback: &'a Catalog,
}

impl<'a> LocaleView<'a> {
    /// Locale tag this view reads from.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Strict lookup: the view's catalog, then the fallback catalog.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::MissingTranslationKey`] when neither catalog has
    /// the key.
    pub fn get(&self, key: &str) -> Result<&'a str, I18nError> {
        self.catalog
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .ok_or_else(|| I18nError::MissingTranslationKey {
                locale: self.locale.clone(),
                key: key.to_string(),
            })
    }

    /// Lenient lookup: like [`LocaleView::get`], except a missing key is
    /// returned verbatim so the UI always has something visible to render.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        match self.get(key) {
            Ok(text) => text.to_string(),
            Err(_) => key.to_string(),
        }
    }

    /// Lenient lookup with positional `{{placeholder}}` replacement.
    #[must_use]
    pub fn t_with_args(&self, key: &str, args: &[&dyn ToString]) -> String {
        replace_placeholders(&self.t(key), args)
    }
}

/// Splices args into the template at each `{{name}}` site, in order. Surplus
/// placeholders are dropped, surplus args ignored.
fn replace_placeholders(template: &str, args: &[&dyn ToString]) -> String {
    let parts: Vec<&str> = ARG_RE.split(template).collect();
    let mut result = String::new();

    for (i, part) in parts.iter().enumerate() {
        result.push_str(part);
        if i < args.len() {
            result.push_str(&args[i].to_string());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_replace_in_order() {
        assert_eq!(
            replace_placeholders("Hello {{name}}, {{count}} links", &[&"Ana", &3]),
            "Hello Ana, 3 links"
        );
    }

    #[test]
    fn surplus_placeholders_are_dropped() {
        assert_eq!(replace_placeholders("{{a}}-{{b}}", &[&1]), "1-");
    }

    #[test]
    fn merge_skips_non_string_values() {
        let mut catalog = Catalog::new();
        merge_flat_strings(
            &mut catalog,
            "en-US",
            serde_json::json!({
                "formTitle": "Shorten an URL",
                "nested": { "one": "x" }
            }),
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog["formTitle"], "Shorten an URL");
    }
}

//! Title translation.
//!
//! Keys are looked up with the `grapesjs-rte-toolbar-extensions.` prefix; a
//! missing translation falls back to the bare key.
use serde::Deserialize;
use std::collections::BTreeMap;

pub const KEY_PREFIX: &str = "grapesjs-rte-toolbar-extensions.";

pub trait Localizer {
    fn translate(&self, key: &str) -> Option<String>;
}

/// Translated title for `key`, or `key` itself.
pub fn title(localizer: &dyn Localizer, key: &str) -> String {
    localizer
        .translate(&format!("{KEY_PREFIX}{key}"))
        .unwrap_or_else(|| key.to_string())
}

/// Localizer with no messages at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTranslations;

impl Localizer for NoTranslations {
    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}

/// A message catalog for one locale, keyed by full (prefixed) key.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    messages: BTreeMap<String, String>,
}

const ENGLISH: &[(&str, &str)] = &[
    ("bold", "Bold"),
    ("italic", "Italic"),
    ("underline", "Underline"),
    ("strikethrough", "Strikethrough"),
    ("link", "Link"),
    ("fontName", "Font name"),
    ("fontSize", "Font size"),
    ("heading1", "Heading 1"),
    ("heading2", "Heading 2"),
    ("heading3", "Heading 3"),
    ("heading4", "Heading 4"),
    ("heading5", "Heading 5"),
    ("heading6", "Heading 6"),
    ("paragraph", "Paragraph"),
    ("quote", "Quote"),
    ("indent", "Indent"),
    ("outdent", "Outdent"),
    ("subscript", "Subscript"),
    ("superscript", "Superscript"),
    ("uppercase", "Uppercase"),
    ("lowercase", "Lowercase"),
    ("olist", "Ordered list"),
    ("ulist", "Unordered list"),
    ("justifyLeft", "Align left"),
    ("justifyCenter", "Align center"),
    ("justifyRight", "Align right"),
    ("justifyFull", "Justify"),
    ("line", "Horizontal line"),
    ("undo", "Undo"),
    ("redo", "Redo"),
    ("wrapSpan", "Wrap selection in span"),
    ("unwrapSpan", "Unwrap span"),
];

const FRENCH: &[(&str, &str)] = &[
    ("bold", "Gras"),
    ("italic", "Italique"),
    ("underline", "Souligné"),
    ("strikethrough", "Barré"),
    ("link", "Lien"),
    ("fontName", "Police"),
    ("fontSize", "Taille de police"),
    ("heading1", "Titre 1"),
    ("heading2", "Titre 2"),
    ("heading3", "Titre 3"),
    ("heading4", "Titre 4"),
    ("heading5", "Titre 5"),
    ("heading6", "Titre 6"),
    ("paragraph", "Paragraphe"),
    ("quote", "Citation"),
    ("indent", "Augmenter le retrait"),
    ("outdent", "Diminuer le retrait"),
    ("subscript", "Indice"),
    ("superscript", "Exposant"),
    ("uppercase", "Majuscules"),
    ("lowercase", "Minuscules"),
    ("olist", "Liste numérotée"),
    ("ulist", "Liste à puces"),
    ("justifyLeft", "Aligner à gauche"),
    ("justifyCenter", "Centrer"),
    ("justifyRight", "Aligner à droite"),
    ("justifyFull", "Justifier"),
    ("line", "Ligne horizontale"),
    ("undo", "Annuler"),
    ("redo", "Rétablir"),
    ("wrapSpan", "Envelopper la sélection dans un span"),
    ("unwrapSpan", "Retirer le span"),
];

const GERMAN: &[(&str, &str)] = &[
    ("bold", "Fett"),
    ("italic", "Kursiv"),
    ("underline", "Unterstrichen"),
    ("strikethrough", "Durchgestrichen"),
    ("link", "Link"),
    ("fontName", "Schriftart"),
    ("fontSize", "Schriftgröße"),
    ("heading1", "Überschrift 1"),
    ("heading2", "Überschrift 2"),
    ("heading3", "Überschrift 3"),
    ("heading4", "Überschrift 4"),
    ("heading5", "Überschrift 5"),
    ("heading6", "Überschrift 6"),
    ("paragraph", "Absatz"),
    ("quote", "Zitat"),
    ("indent", "Einzug vergrößern"),
    ("outdent", "Einzug verkleinern"),
    ("subscript", "Tiefgestellt"),
    ("superscript", "Hochgestellt"),
    ("uppercase", "Großbuchstaben"),
    ("lowercase", "Kleinbuchstaben"),
    ("olist", "Nummerierte Liste"),
    ("ulist", "Aufzählung"),
    ("justifyLeft", "Linksbündig"),
    ("justifyCenter", "Zentriert"),
    ("justifyRight", "Rechtsbündig"),
    ("justifyFull", "Blocksatz"),
    ("line", "Horizontale Linie"),
    ("undo", "Rückgängig"),
    ("redo", "Wiederholen"),
    ("wrapSpan", "Auswahl in Span einschließen"),
    ("unwrapSpan", "Span entfernen"),
];

/// Locale codes with a built-in catalog.
pub const BUILTIN_LOCALES: [&str; 3] = ["en", "fr", "de"];

impl Catalog {
    fn from_table(table: &[(&str, &str)]) -> Self {
        let messages = table
            .iter()
            .map(|(key, text)| (format!("{KEY_PREFIX}{key}"), text.to_string()))
            .collect();
        Self { messages }
    }

    pub fn english() -> Self {
        Self::from_table(ENGLISH)
    }

    pub fn french() -> Self {
        Self::from_table(FRENCH)
    }

    pub fn german() -> Self {
        Self::from_table(GERMAN)
    }

    /// Built-in catalog for a locale code such as `"fr"` or `"de-AT"`.
    pub fn builtin(locale: &str) -> Option<Self> {
        let language = locale.split(['-', '_']).next().unwrap_or(locale);
        match language.to_ascii_lowercase().as_str() {
            "en" => Some(Self::english()),
            "fr" => Some(Self::french()),
            "de" => Some(Self::german()),
            _ => None,
        }
    }

    /// Flat `"full.key" = "text"` table.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localizer for Catalog {
    fn translate(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ALL_CONTROL_NAMES;

    #[test]
    fn builtin_catalogs_cover_every_control() {
        for locale in BUILTIN_LOCALES {
            let catalog = Catalog::builtin(locale).unwrap();
            for name in ALL_CONTROL_NAMES.iter().chain(&["unwrapSpan"]) {
                assert!(
                    catalog.translate(&format!("{KEY_PREFIX}{name}")).is_some(),
                    "{locale}: missing {name}"
                );
            }
            assert_eq!(catalog.len(), ALL_CONTROL_NAMES.len() + 1, "{locale}");
        }
        assert_eq!(title(&Catalog::english(), "unwrapSpan"), "Unwrap span");
        assert_eq!(title(&Catalog::french(), "bold"), "Gras");
        assert_eq!(title(&Catalog::german(), "unwrapSpan"), "Span entfernen");
    }

    #[test]
    fn builtin_resolves_region_variants() {
        assert_eq!(Catalog::builtin("de-AT"), Some(Catalog::german()));
        assert_eq!(Catalog::builtin("FR_ca"), Some(Catalog::french()));
        assert_eq!(Catalog::builtin("nl"), None);
    }

    #[test]
    fn missing_translation_falls_back_to_key() {
        assert_eq!(title(&NoTranslations, "bold"), "bold");
        assert_eq!(title(&Catalog::english(), "sparkle"), "sparkle");
    }

    #[test]
    fn unprefixed_keys_do_not_match() {
        let mut catalog = Catalog::default();
        catalog.insert("bold", "Fett");
        assert_eq!(title(&catalog, "bold"), "bold");
    }

    #[test]
    fn catalog_loads_from_flat_toml() {
        let catalog = Catalog::from_toml_str(
            r#"
"grapesjs-rte-toolbar-extensions.bold" = "Fett"
"grapesjs-rte-toolbar-extensions.italic" = "Kursiv"
"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(title(&catalog, "bold"), "Fett");
        assert_eq!(title(&catalog, "underline"), "underline");
    }
}

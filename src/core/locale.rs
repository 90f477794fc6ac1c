//! # Locale — Texto Localizado
//!
//! Os campos bilíngues das tabelas (`name` + `nameEs`, `summary` + ...) são
//! generalizados em um [`LocalizedText`]: um texto no idioma primário mais
//! um mapa `Locale → texto` de traduções. Adicionar um terceiro idioma não
//! exige campos novos.
//!
//! ## Fallback
//!
//! A leitura nunca falha: se a tradução pedida não existe, devolve o texto
//! primário e sinaliza o fallback em [`Resolved::fallback`].
//!
//! ```rust
//! use tiered_knowledge::core::{Locale, LocalizedText};
//!
//! let name = LocalizedText::new("Dialysis").with(Locale::new("es"), "Diálisis");
//! assert_eq!(name.get(&Locale::new("es")), "Diálisis");
//! assert_eq!(name.get(&Locale::new("pt")), "Dialysis");
//! ```
//!
//! ## Formato de Carga
//!
//! Aceita tanto uma string simples quanto a forma completa:
//!
//! ```json
//! "name": "Dialysis"
//! "name": { "text": "Dialysis", "translations": { "es": "Diálisis" } }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tag de idioma (ex: `en`, `es`). Normalizada para minúsculas.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Self::new(tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Texto no idioma primário com traduções opcionais.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LocalizedTextRepr")]
pub struct LocalizedText {
    /// Texto no idioma primário do catálogo. Sempre presente.
    pub text: String,

    /// Traduções por locale. Nunca contém o idioma primário implicitamente.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<Locale, String>,
}

/// Forma aceita na carga: string simples ou objeto completo.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocalizedTextRepr {
    Plain(String),
    Full {
        text: String,
        #[serde(default)]
        translations: BTreeMap<Locale, String>,
    },
}

impl From<LocalizedTextRepr> for LocalizedText {
    fn from(repr: LocalizedTextRepr) -> Self {
        match repr {
            LocalizedTextRepr::Plain(text) => Self {
                text,
                translations: BTreeMap::new(),
            },
            LocalizedTextRepr::Full { text, translations } => Self { text, translations },
        }
    }
}

/// Resultado de uma leitura localizada.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Texto servido: a tradução pedida ou o primário.
    pub text: &'a str,
    /// `true` quando a tradução pedida não existia e o texto primário foi usado.
    pub fallback: bool,
}

impl LocalizedText {
    /// Texto só no idioma primário.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translations: BTreeMap::new(),
        }
    }

    /// Builder: adiciona (ou substitui) uma tradução.
    pub fn with(mut self, locale: Locale, text: impl Into<String>) -> Self {
        self.translations.insert(locale, text.into());
        self
    }

    /// Lê o texto no locale pedido, com fallback para o primário.
    pub fn get(&self, locale: &Locale) -> &str {
        self.resolve(locale).text
    }

    /// Como [`get()`](LocalizedText::get), mas informa se houve fallback.
    ///
    /// Pedir o próprio idioma primário não é fallback quando não existe
    /// tradução com essa tag, por isso o chamador passa `primary`.
    pub fn resolve_with_primary(&self, locale: &Locale, primary: &Locale) -> Resolved<'_> {
        match self.translations.get(locale) {
            Some(text) => Resolved {
                text,
                fallback: false,
            },
            None => Resolved {
                text: &self.text,
                fallback: locale != primary,
            },
        }
    }

    /// Leitura sem conhecer o idioma primário: qualquer locale ausente das
    /// traduções conta como fallback.
    pub fn resolve(&self, locale: &Locale) -> Resolved<'_> {
        match self.translations.get(locale) {
            Some(text) => Resolved {
                text,
                fallback: false,
            },
            None => Resolved {
                text: &self.text,
                fallback: true,
            },
        }
    }

    /// `true` se existe tradução explícita para `locale`.
    pub fn has_translation(&self, locale: &Locale) -> bool {
        self.translations.contains_key(locale)
    }

    /// Todas as variantes: primeiro o texto primário, depois as traduções
    /// em ordem de locale.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.text.as_str()).chain(self.translations.values().map(String::as_str))
    }

    /// Só as traduções, em ordem de locale.
    pub fn translated_variants(&self) -> impl Iterator<Item = &str> {
        self.translations.values().map(String::as_str)
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn es() -> Locale {
        Locale::new("es")
    }

    #[test]
    fn locale_tags_are_normalized() {
        assert_eq!(Locale::new(" ES "), es());
        assert_eq!(Locale::new("En").as_str(), "en");
    }

    #[test]
    fn missing_translation_falls_back_to_primary() {
        let text = LocalizedText::new("Thyroid storm").with(es(), "Tormenta tiroidea");
        let resolved = text.resolve(&Locale::new("fr"));
        assert_eq!(resolved.text, "Thyroid storm");
        assert!(resolved.fallback);

        let resolved = text.resolve(&es());
        assert_eq!(resolved.text, "Tormenta tiroidea");
        assert!(!resolved.fallback);
    }

    #[test]
    fn primary_locale_is_not_a_fallback() {
        let text = LocalizedText::new("Asthma");
        let en = Locale::new("en");
        assert!(!text.resolve_with_primary(&en, &en).fallback);
        assert!(text.resolve_with_primary(&es(), &en).fallback);
    }

    #[test]
    fn deserializes_plain_and_full_forms() {
        let plain: LocalizedText = serde_json::from_str(r#""Asma""#).unwrap();
        assert_eq!(plain.text, "Asma");
        assert!(plain.translations.is_empty());

        let full: LocalizedText =
            serde_json::from_str(r#"{"text":"Asthma","translations":{"ES":"Asma"}}"#).unwrap();
        assert_eq!(full.get(&es()), "Asma");
    }

    #[test]
    fn variants_lists_primary_first() {
        let text = LocalizedText::new("Gout")
            .with(Locale::new("pt"), "Gota (pt)")
            .with(es(), "Gota");
        let all: Vec<&str> = text.variants().collect();
        assert_eq!(all, vec!["Gout", "Gota", "Gota (pt)"]);
    }
}

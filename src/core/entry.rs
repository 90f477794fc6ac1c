//! # Entry — Unidade de Conteúdo Educacional
//!
//! Uma [`Entry`] é um tópico, condição, fármaco ou exame com `id` único,
//! uma categoria fixa, um nome localizado e (quando "em camadas") uma
//! escada de cinco níveis de explicação.
//!
//! ## Campos Principais
//!
//! | Campo | Tipo | Descrição |
//! |-------|------|-----------|
//! | `id` | [EntryId] | Identificador estável, única chave estrangeira |
//! | `category` | [Category] | Valor do conjunto fechado do domínio |
//! | `name` | [LocalizedText] | Nome primário + traduções (`nameEs` → `es`) |
//! | `levels` | `BTreeMap<Level, LevelContent>` | Escada 1–5 |
//! | `cross_references` | `Vec<CrossReference>` | Arestas para outras entradas |
//! | `tags` | [Tags] | Facetas livres, palavras-chave, relevância clínica |
//!
//! Uma entrada é construída uma vez, na carga, e nunca mais alterada: a
//! base construída só empresta `&Entry`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tiered_knowledge::core::{Entry, Level, LevelContent, Locale, LocalizedText};
//!
//! let entry = Entry::new(
//!     "hypothyroidism",
//!     "thyroid",
//!     LocalizedText::new("Hypothyroidism").with(Locale::new("es"), "Hipotiroidismo"),
//! )
//! .with_level(Level::new(1).unwrap(), LevelContent::new("Slow thyroid", "Your thyroid is tired."));
//!
//! assert!(entry.level(1).is_some());
//! assert!(entry.level(6).is_none());
//! ```

use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cross_reference::CrossReference;
use super::level::{Level, LevelContent};
use super::locale::{Locale, LocalizedText};
use super::searchable::{FieldCollector, FieldKind, KnowledgeEntry, SearchField};

/// Identificador de uma entrada.
///
/// `Arc<str>` para que o índice e o grafo compartilhem a mesma string em
/// vez de copiá-la.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Arc<str>);

impl EntryId {
    /// O id como `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(Arc::from(id))
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl Borrow<str> for EntryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categoria primária de uma entrada (ex: `thyroid`, `prostate`).
///
/// O conjunto válido é fechado por domínio; o catálogo pode declará-lo e a
/// carga rejeita valores fora dele.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(Arc<str>);

impl Category {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Category {
    fn from(category: &str) -> Self {
        Self(Arc::from(category))
    }
}

impl From<String> for Category {
    fn from(category: String) -> Self {
        Self(Arc::from(category))
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relevância clínica declarada nas tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalRelevance {
    Low,
    Medium,
    High,
    Critical,
}

/// Estado editorial da entrada.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Review,
    #[default]
    Published,
}

/// Metadados de facetação, independentes da `category` primária.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tags {
    /// Facetas livres (ex: `endocrine`), consultáveis por faceta.
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// Palavras-chave pesquisáveis.
    #[serde(default)]
    pub keywords: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_relevance: Option<ClinicalRelevance>,
}

/// Entrada de conteúdo educacional em camadas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Identificador estável e único no catálogo.
    pub id: EntryId,
    /// Categoria primária; uma entrada pertence a exatamente uma.
    pub category: Category,
    /// Subcategoria opcional dentro da categoria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Nome de exibição, primário + traduções.
    pub name: LocalizedText,
    /// Sinônimos e siglas, pesquisáveis.
    #[serde(default)]
    pub alternate_names: Vec<String>,
    /// Escada de níveis. Declarar qualquer nível torna a entrada "em
    /// camadas", e então os cinco níveis são exigidos.
    #[serde(default)]
    pub levels: BTreeMap<Level, LevelContent>,
    /// "Pérolas": fatos de alto rendimento.
    #[serde(default)]
    pub key_pearls: Vec<String>,
    /// Referências para outras entradas, em ordem de declaração.
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
    #[serde(default)]
    pub tags: Tags,
    /// Estado editorial (padrão `published`).
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
}

impl Entry {
    /// Cria uma entrada plana (sem níveis) só com os campos obrigatórios.
    pub fn new(
        id: impl Into<EntryId>,
        category: impl Into<Category>,
        name: impl Into<LocalizedText>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            subcategory: None,
            name: name.into(),
            alternate_names: Vec::new(),
            levels: BTreeMap::new(),
            key_pearls: Vec::new(),
            cross_references: Vec::new(),
            tags: Tags::default(),
            status: ContentStatus::default(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_alternate_name(mut self, name: impl Into<String>) -> Self {
        self.alternate_names.push(name.into());
        self
    }

    pub fn with_level(mut self, level: Level, content: LevelContent) -> Self {
        self.levels.insert(level, content);
        self
    }

    /// Atribui os conteúdos aos níveis 1, 2, ... em ordem. Conteúdos além
    /// do quinto são ignorados.
    pub fn with_ladder(mut self, contents: impl IntoIterator<Item = LevelContent>) -> Self {
        for (level, content) in Level::all().zip(contents) {
            self.levels.insert(level, content);
        }
        self
    }

    pub fn with_key_pearl(mut self, pearl: impl Into<String>) -> Self {
        self.key_pearls.push(pearl.into());
        self
    }

    pub fn with_cross_reference(mut self, reference: CrossReference) -> Self {
        self.cross_references.push(reference);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.tags.keywords.insert(keyword.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.categories.insert(tag.into());
        self
    }

    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = status;
        self
    }

    /// `true` quando a entrada declara ao menos um nível.
    pub fn is_tiered(&self) -> bool {
        !self.levels.is_empty()
    }

    /// Acesso direto ao nível `n`.
    ///
    /// Retorna `None` para `n` fora de `1..=5` ou para nível ausente.
    pub fn level(&self, n: u8) -> Option<&LevelContent> {
        Level::new(n).and_then(|level| self.levels.get(&level))
    }

    /// Níveis ausentes de uma entrada em camadas (vazio se não for em camadas).
    pub fn missing_levels(&self) -> Vec<Level> {
        if !self.is_tiered() {
            return Vec::new();
        }
        Level::all()
            .filter(|level| !self.levels.contains_key(level))
            .collect()
    }
}

/// Visão de uma entrada resolvida para um locale.
///
/// Produzida por [`KnowledgeEntry::localized()`] para qualquer tipo de
/// entrada: entradas em camadas preenchem `levels`, entradas planas
/// preenchem `description`.
#[derive(Clone, Debug)]
pub struct LocalizedEntry<'a> {
    /// Entrada de origem.
    pub id: &'a EntryId,
    /// Locale pedido (não necessariamente o servido).
    pub locale: Locale,
    /// Nome no locale pedido ou no primário.
    pub name: &'a str,
    /// Descrição resolvida, quando o tipo de entrada tem uma.
    pub description: Option<&'a str>,
    /// Níveis resolvidos, em ordem. Vazio para entradas planas.
    pub levels: Vec<LocalizedLevel<'a>>,
    /// `true` se algum campo caiu no idioma primário.
    pub fallback: bool,
}

impl<'a> LocalizedEntry<'a> {
    /// Resolve nome, descrição e níveis de `entry`.
    pub(crate) fn of<E: KnowledgeEntry + ?Sized>(entry: &'a E, locale: &Locale, primary: &Locale) -> Self {
        let name = entry.name().resolve_with_primary(locale, primary);
        let description = entry
            .description()
            .map(|text| text.resolve_with_primary(locale, primary));
        let mut fallback = name.fallback || description.as_ref().is_some_and(|d| d.fallback);

        let levels = entry
            .levels()
            .into_iter()
            .flatten()
            .map(|(level, content)| {
                let summary = content.summary.resolve_with_primary(locale, primary);
                let explanation = content.explanation.resolve_with_primary(locale, primary);
                fallback |= summary.fallback || explanation.fallback;
                LocalizedLevel {
                    level: *level,
                    summary: summary.text,
                    explanation: explanation.text,
                    content,
                }
            })
            .collect();

        Self {
            id: entry.id(),
            locale: locale.clone(),
            name: name.text,
            description: description.map(|d| d.text),
            levels,
            fallback,
        }
    }

    /// Nível `n` resolvido, ou `None` fora de `1..=5` ou se ausente.
    pub fn level(&self, n: u8) -> Option<&LocalizedLevel<'a>> {
        let level = Level::new(n)?;
        self.levels.iter().find(|l| l.level == level)
    }
}

/// Um nível resolvido para um locale.
#[derive(Clone, Debug)]
pub struct LocalizedLevel<'a> {
    /// Posição na escada.
    pub level: Level,
    /// Resumo no locale pedido ou no primário.
    pub summary: &'a str,
    /// Explicação no locale pedido ou no primário.
    pub explanation: &'a str,
    /// Conteúdo completo (listas não são localizadas).
    pub content: &'a LevelContent,
}

impl KnowledgeEntry for Entry {
    fn id(&self) -> &EntryId {
        &self.id
    }

    fn category(&self) -> &Category {
        &self.category
    }

    fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    fn name(&self) -> &LocalizedText {
        &self.name
    }

    fn facets(&self) -> Vec<&str> {
        self.tags.categories.iter().map(String::as_str).collect()
    }

    fn cross_references(&self) -> &[CrossReference] {
        &self.cross_references
    }

    fn status(&self) -> ContentStatus {
        self.status
    }

    fn levels(&self) -> Option<&BTreeMap<Level, LevelContent>> {
        Some(&self.levels)
    }

    fn search_fields(&self) -> Vec<SearchField<'_>> {
        let mut fields = FieldCollector::new();
        fields
            .localized(FieldKind::Name, FieldKind::LocalizedName, &self.name)
            .extend(FieldKind::AlternateName, self.alternate_names.iter().map(String::as_str))
            .push(FieldKind::Category, self.category.as_str());
        if let Some(subcategory) = &self.subcategory {
            fields.push(FieldKind::Category, subcategory);
        }

        for content in self.levels.values() {
            fields.extend(FieldKind::Summary, content.summary.variants());
        }
        for content in self.levels.values() {
            fields.extend(FieldKind::Explanation, content.explanation.variants());
        }
        for content in self.levels.values() {
            for term in &content.key_terms {
                fields
                    .push(FieldKind::KeyTerm, &term.term)
                    .push(FieldKind::KeyTerm, &term.definition);
            }
        }
        let levels: Vec<&LevelContent> = self.levels.values().collect();
        for c in &levels {
            fields.extend(FieldKind::ClinicalFeature, c.clinical_features.iter().map(String::as_str));
        }
        for c in &levels {
            fields.extend(FieldKind::Diagnostic, c.diagnostics.iter().map(String::as_str));
        }
        for c in &levels {
            fields.extend(FieldKind::Management, c.management.iter().map(String::as_str));
        }

        fields
            .extend(FieldKind::KeyPearl, self.key_pearls.iter().map(String::as_str))
            .extend(FieldKind::Keyword, self.tags.keywords.iter().map(String::as_str));

        for c in &levels {
            fields.extend(FieldKind::Analogy, c.analogies.iter().map(String::as_str));
        }
        for c in &levels {
            fields.extend(FieldKind::Example, c.examples.iter().map(String::as_str));
        }
        for c in &levels {
            fields.extend(FieldKind::ClinicalNote, c.clinical_notes.iter().map(String::as_str));
        }

        fields.extend(
            FieldKind::CrossReferenceLabel,
            self.cross_references.iter().filter_map(|r| r.label.as_deref()),
        );
        fields.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::KeyTerm;

    fn en() -> Locale {
        Locale::new("en")
    }

    fn es() -> Locale {
        Locale::new("es")
    }

    fn ladder() -> Vec<LevelContent> {
        (1..=5)
            .map(|n| LevelContent::new(format!("summary {n}"), format!("explanation {n}")))
            .collect()
    }

    #[test]
    fn tiered_entry_has_all_levels() {
        let entry = Entry::new("graves", "thyroid", "Graves disease").with_ladder(ladder());
        assert!(entry.is_tiered());
        assert!(entry.missing_levels().is_empty());
        for n in 1..=5 {
            assert!(entry.level(n).is_some(), "nível {n} ausente");
        }
        assert!(entry.level(0).is_none());
        assert!(entry.level(6).is_none());
    }

    #[test]
    fn missing_levels_reported_only_for_tiered_entries() {
        let flat = Entry::new("bph", "prostate", "BPH");
        assert!(flat.missing_levels().is_empty());

        let partial = Entry::new("gout", "rheumatology", "Gout").with_ladder(ladder().into_iter().take(3));
        let missing: Vec<u8> = partial.missing_levels().into_iter().map(Level::get).collect();
        assert_eq!(missing, vec![4, 5]);
    }

    #[test]
    fn localized_view_falls_back_to_primary() {
        let level = LevelContent::new(
            LocalizedText::new("Kidneys clean blood").with(es(), "Los riñones limpian la sangre"),
            "Dialysis replaces filtering.",
        );
        let entry = Entry::new(
            "dialysis",
            "nephrology",
            LocalizedText::new("Dialysis").with(es(), "Diálisis"),
        )
        .with_level(Level::new(1).unwrap(), level);

        let view = entry.localized(&es(), &en());
        assert_eq!(view.name, "Diálisis");
        let first = view.level(1).unwrap();
        assert_eq!(first.summary, "Los riñones limpian la sangre");
        assert_eq!(first.explanation, "Dialysis replaces filtering.");
        assert!(view.fallback);

        let primary = entry.localized(&en(), &en());
        assert_eq!(primary.name, "Dialysis");
        assert!(!primary.fallback);
    }

    #[test]
    fn search_fields_follow_documented_order() {
        let entry = Entry::new(
            "dka",
            "diabetes",
            LocalizedText::new("Diabetic ketoacidosis").with(es(), "Cetoacidosis diabética"),
        )
        .with_alternate_name("DKA")
        .with_ladder(vec![LevelContent::new("Sugar too high", "Body burns fat")
            .with_key_term(KeyTerm::new("ketones", "acids from fat"))
            .with_clinical_feature("Kussmaul breathing")])
        .with_key_pearl("Check potassium before insulin")
        .with_keyword("acidosis");

        let kinds: Vec<FieldKind> = entry.search_fields().iter().map(|f| f.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort();
        assert_eq!(kinds, sorted);
        assert_eq!(kinds.first(), Some(&FieldKind::Name));
        assert!(kinds.contains(&FieldKind::LocalizedName));
        assert!(kinds.contains(&FieldKind::KeyPearl));
    }

    #[test]
    fn deserializes_author_json() {
        let json = r#"{
            "id": "condition-dialisis-dialysis",
            "category": "nephrology",
            "name": { "text": "Dialysis", "translations": { "es": "Diálisis" } },
            "alternateNames": ["RRT"],
            "levels": {
                "1": { "summary": "Cleans the blood", "explanation": "Like a filter." }
            },
            "crossReferences": [
                { "targetId": "ckd", "relationship": "related", "label": "CKD" }
            ],
            "tags": { "keywords": ["dialysis"], "clinicalRelevance": "high" },
            "status": "published",
            "createdAt": "2026-02-05"
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id.as_str(), "condition-dialisis-dialysis");
        assert_eq!(entry.name.get(&es()), "Diálisis");
        assert!(entry.level(1).is_some());
        assert_eq!(entry.tags.clinical_relevance, Some(ClinicalRelevance::High));
        assert_eq!(entry.created_at, NaiveDate::from_ymd_opt(2026, 2, 5));
    }
}

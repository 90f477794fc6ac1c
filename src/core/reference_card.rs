//! # ReferenceCard — Entrada Enciclopédica Plana
//!
//! Nem toda tabela de domínio tem a escada de cinco níveis. Bases como
//! cuidados críticos, ética médica ou ORL usam um formato plano: descrição,
//! achados clínicos, diagnóstico, manejo, complicações e "pérolas".
//!
//! O [`ReferenceCard`] cobre esse formato e implementa [`KnowledgeEntry`],
//! então o mesmo motor de store/taxonomia/busca atende as duas formas.

use serde::{Deserialize, Serialize};

use super::cross_reference::CrossReference;
use super::entry::{Category, EntryId};
use super::locale::LocalizedText;
use super::searchable::{FieldCollector, FieldKind, KnowledgeEntry, SearchField};

/// Entrada enciclopédica sem escada de níveis.
///
/// ## Campos
///
/// | Campo | Pesquisável como |
/// |-------|------------------|
/// | `name` | `Name` / `LocalizedName` |
/// | `description` | `Description` |
/// | `clinical_features` | `ClinicalFeature` |
/// | `diagnostics` / `management` | `Diagnostic` / `Management` |
/// | `key_pearls` / `keywords` | `KeyPearl` / `Keyword` |
/// | `complications` | `Complication` |
/// | `references` | não pesquisável |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCard {
    /// Identificador único no catálogo.
    pub id: EntryId,
    /// Categoria primária (ex: `shock`, `respiratory`).
    pub category: Category,
    /// Subcategoria opcional dentro da categoria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Nome de exibição, primário + traduções.
    pub name: LocalizedText,
    /// Definição curta, primário + traduções.
    pub description: LocalizedText,
    /// Achados clínicos.
    #[serde(default)]
    pub clinical_features: Vec<String>,
    /// Critérios e exames diagnósticos.
    #[serde(default)]
    pub diagnostics: Vec<String>,
    /// Condutas de manejo.
    #[serde(default)]
    pub management: Vec<String>,
    #[serde(default)]
    pub complications: Vec<String>,
    /// "Pérolas": fatos de alto rendimento.
    #[serde(default)]
    pub key_pearls: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Citações bibliográficas. Não entram no corpus de busca.
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub cross_references: Vec<CrossReference>,
}

impl ReferenceCard {
    /// Cria um cartão só com os campos obrigatórios.
    pub fn new(
        id: impl Into<EntryId>,
        category: impl Into<Category>,
        name: impl Into<LocalizedText>,
        description: impl Into<LocalizedText>,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            subcategory: None,
            name: name.into(),
            description: description.into(),
            clinical_features: Vec::new(),
            diagnostics: Vec::new(),
            management: Vec::new(),
            complications: Vec::new(),
            key_pearls: Vec::new(),
            keywords: Vec::new(),
            references: Vec::new(),
            cross_references: Vec::new(),
        }
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    pub fn with_clinical_feature(mut self, feature: impl Into<String>) -> Self {
        self.clinical_features.push(feature.into());
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
}

impl KnowledgeEntry for ReferenceCard {
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

    fn cross_references(&self) -> &[CrossReference] {
        &self.cross_references
    }

    fn description(&self) -> Option<&LocalizedText> {
        Some(&self.description)
    }

    fn search_fields(&self) -> Vec<SearchField<'_>> {
        let mut fields = FieldCollector::new();
        fields
            .localized(FieldKind::Name, FieldKind::LocalizedName, &self.name)
            .push(FieldKind::Category, self.category.as_str());
        if let Some(subcategory) = &self.subcategory {
            fields.push(FieldKind::Category, subcategory);
        }
        fields
            .extend(FieldKind::Description, self.description.variants())
            .extend(FieldKind::ClinicalFeature, self.clinical_features.iter().map(String::as_str))
            .extend(FieldKind::Diagnostic, self.diagnostics.iter().map(String::as_str))
            .extend(FieldKind::Management, self.management.iter().map(String::as_str))
            .extend(FieldKind::KeyPearl, self.key_pearls.iter().map(String::as_str))
            .extend(FieldKind::Keyword, self.keywords.iter().map(String::as_str))
            .extend(FieldKind::Complication, self.complications.iter().map(String::as_str))
            .extend(
                FieldKind::CrossReferenceLabel,
                self.cross_references.iter().filter_map(|r| r.label.as_deref()),
            );
        fields.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Locale;

    #[test]
    fn references_are_not_searchable() {
        let mut card = ReferenceCard::new("autonomy", "principles", "Respect for Autonomy", "Self-determination.");
        card.references.push("Beauchamp & Childress, Principles of Biomedical Ethics".to_string());

        let texts: Vec<&str> = card.search_fields().iter().map(|f| f.text).collect();
        assert!(texts.contains(&"Self-determination."));
        assert!(!texts.iter().any(|t| t.contains("Beauchamp")));
    }

    #[test]
    fn localized_name_is_tagged_separately() {
        let card = ReferenceCard::new(
            "sepsis",
            "infection",
            LocalizedText::new("Sepsis").with(Locale::new("es"), "Sepsis grave"),
            "Dysregulated host response to infection.",
        );
        let fields = card.search_fields();
        assert_eq!(fields[0], SearchField::new(FieldKind::Name, "Sepsis"));
        assert_eq!(fields[1], SearchField::new(FieldKind::LocalizedName, "Sepsis grave"));
    }

    #[test]
    fn localized_view_resolves_description() {
        let es = Locale::new("es");
        let en = Locale::new("en");
        let card = ReferenceCard::new(
            "ards",
            "respiratory",
            LocalizedText::new("ARDS").with(es.clone(), "SDRA"),
            LocalizedText::new("Bilateral infiltrates with hypoxemia.")
                .with(es.clone(), "Infiltrados bilaterales con hipoxemia."),
        );

        let view = card.localized(&es, &en);
        assert_eq!(view.name, "SDRA");
        assert_eq!(view.description, Some("Infiltrados bilaterales con hipoxemia."));
        assert!(view.levels.is_empty());
        assert!(!view.fallback);

        let french = card.localized(&Locale::new("fr"), &en);
        assert_eq!(french.description, Some("Bilateral infiltrates with hypoxemia."));
        assert!(french.fallback);
    }
}

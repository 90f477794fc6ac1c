//! # Taxonomy Index — Facetas Pré-computadas
//!
//! Agrupa `id`s por categoria, por `(categoria, subcategoria)` e pelas
//! facetas livres das tags. Construído uma vez a partir do
//! [`EntryStore`]; guarda apenas `id`s, nunca cópias das entradas.
//!
//! ```text
//! thyroid  → {hyperthyroidism-graves, hypothyroidism, thyroid-cancer, ...}
//!   └── nodule → {thyroid-nodule}
//! prostate → {bph}
//! ```
//!
//! Categoria desconhecida resulta em conjunto vazio, nunca em erro.
//! Reconstruir a partir do mesmo store produz o mesmo índice.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::{Category, EntryId, EntryStore, KnowledgeEntry};

static EMPTY: BTreeSet<EntryId> = BTreeSet::new();

/// Índice `faceta → ids`, derivado do store e imutável depois de construído.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyIndex {
    by_category: BTreeMap<Category, BTreeSet<EntryId>>,
    by_subcategory: BTreeMap<Category, BTreeMap<String, BTreeSet<EntryId>>>,
    by_facet: BTreeMap<String, BTreeSet<EntryId>>,
}

impl TaxonomyIndex {
    /// Percorre o store uma vez e agrupa os ids. Idempotente: o mesmo
    /// store produz sempre o mesmo índice.
    pub fn build<E: KnowledgeEntry>(store: &EntryStore<E>) -> Self {
        let mut index = Self::default();
        for entry in store.all() {
            let id = entry.id();
            let category = entry.category();

            index
                .by_category
                .entry(category.clone())
                .or_default()
                .insert(id.clone());

            if let Some(subcategory) = entry.subcategory() {
                index
                    .by_subcategory
                    .entry(category.clone())
                    .or_default()
                    .entry(subcategory.to_string())
                    .or_default()
                    .insert(id.clone());
            }

            for facet in entry.facets() {
                index
                    .by_facet
                    .entry(facet.to_string())
                    .or_default()
                    .insert(id.clone());
            }
        }
        tracing::debug!(
            categories = index.by_category.len(),
            facets = index.by_facet.len(),
            "Taxonomia construída"
        );
        index
    }

    /// Ids da categoria `category`, exatamente. Desconhecida → vazio.
    pub fn by_category(&self, category: &str) -> &BTreeSet<EntryId> {
        self.by_category.get(category).unwrap_or(&EMPTY)
    }

    /// Ids de `category` marcados com `subcategory`.
    pub fn by_subcategory(&self, category: &str, subcategory: &str) -> &BTreeSet<EntryId> {
        self.by_subcategory
            .get(category)
            .and_then(|subs| subs.get(subcategory))
            .unwrap_or(&EMPTY)
    }

    /// Ids marcados com a faceta livre `facet`.
    pub fn by_facet(&self, facet: &str) -> &BTreeSet<EntryId> {
        self.by_facet.get(facet).unwrap_or(&EMPTY)
    }

    /// Categorias efetivamente presentes, em ordem.
    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.by_category.keys()
    }

    /// Subcategorias presentes em `category`, em ordem.
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        self.by_subcategory
            .get(category)
            .map(|subs| subs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Todas as facetas livres presentes, em ordem.
    pub fn facets(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_facet.keys().map(String::as_str)
    }

    /// Número de entradas por categoria presente.
    pub fn counts(&self) -> BTreeMap<&Category, usize> {
        self.by_category
            .iter()
            .map(|(category, ids)| (category, ids.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entry;

    fn store() -> EntryStore<Entry> {
        EntryStore::from_entries([
            Entry::new("hypothyroidism", "thyroid", "Hypothyroidism").with_tag("endocrine"),
            Entry::new("thyroid-nodule", "thyroid", "Thyroid nodule").with_subcategory("nodule"),
            Entry::new("bph", "prostate", "BPH").with_tag("urology"),
        ])
        .unwrap()
    }

    #[test]
    fn groups_ids_by_category() {
        let index = TaxonomyIndex::build(&store());
        let thyroid: Vec<&str> = index.by_category("thyroid").iter().map(EntryId::as_str).collect();
        assert_eq!(thyroid, vec!["hypothyroidism", "thyroid-nodule"]);
        assert_eq!(index.by_category("prostate").len(), 1);
    }

    #[test]
    fn unknown_category_is_empty_not_error() {
        let index = TaxonomyIndex::build(&store());
        assert!(index.by_category("diabetes").is_empty());
        assert!(index.by_subcategory("thyroid", "cancer").is_empty());
        assert!(index.by_facet("cardiology").is_empty());
    }

    #[test]
    fn subcategories_and_facets() {
        let index = TaxonomyIndex::build(&store());
        assert_eq!(index.subcategories("thyroid"), vec!["nodule"]);
        assert!(index.by_subcategory("thyroid", "nodule").contains("thyroid-nodule"));
        assert!(index.by_facet("urology").contains("bph"));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let store = store();
        assert_eq!(TaxonomyIndex::build(&store), TaxonomyIndex::build(&store));
    }

    #[test]
    fn counts_per_category() {
        let index = TaxonomyIndex::build(&store());
        let counts: Vec<(&str, usize)> = index
            .counts()
            .into_iter()
            .map(|(c, n)| (c.as_str(), n))
            .collect();
        assert_eq!(counts, vec![("prostate", 1), ("thyroid", 2)]);
    }
}

//! # Text Search — Busca por Substring no Corpus de Cada Entrada
//!
//! Na carga, cada entrada vira um **corpus**: os textos de
//! [`search_fields()`](crate::core::KnowledgeEntry::search_fields),
//! ordenados por [`FieldKind`], normalizados (NFC + minúsculas) e unidos
//! por um separador (ocorrências dele dentro de um campo viram espaço).
//! Para cada campo guarda-se
//! o intervalo de bytes no corpus, então a primeira ocorrência da consulta
//! revela **em que tipo de campo** ela caiu.
//!
//! ## Semântica
//!
//! - Match = consulta normalizada é substring do corpus
//! - Consulta vazia (ou só espaços) não encontra nada
//! - Sem dobra de diacríticos: `"José"` não encontra `"jose"`
//! - Formas NFC e NFD do mesmo caractere são equivalentes
//! - Resultados ordenados por prioridade do campo do primeiro match, depois `id`
//!
//! ## Exemplo de Uso
//!
//! ```rust,ignore
//! let index = SearchIndex::build(&store);
//! for hit in index.search("carrier frequency") {
//!     println!("{} ({:?})", hit.id, hit.field);
//! }
//! ```

use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use crate::core::{EntryId, EntryStore, FieldKind, KnowledgeEntry};

/// Separador entre campos no corpus (ASCII Unit Separator).
const FIELD_SEPARATOR: char = '\u{1f}';

/// NFC seguido de minúsculas. Aplicado igualmente a corpus e consulta.
pub fn normalize(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase().nfc().collect()
}

/// [`normalize()`] com o separador trocado por espaço, para que no corpus
/// ele só apareça entre campos.
fn normalize_searchable(text: &str) -> String {
    normalize(text).replace(FIELD_SEPARATOR, " ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Corpus {
    id: EntryId,
    text: String,
    /// `(início, fim, tipo)` de cada campo, em ordem de posição.
    spans: Vec<(usize, usize, FieldKind)>,
}

impl Corpus {
    fn build<E: KnowledgeEntry>(entry: &E) -> Self {
        let mut fields = entry.search_fields();
        fields.sort_by_key(|field| field.kind);

        let mut text = String::new();
        let mut spans = Vec::with_capacity(fields.len());
        for field in fields {
            if !text.is_empty() {
                text.push(FIELD_SEPARATOR);
            }
            let start = text.len();
            text.push_str(&normalize_searchable(field.text));
            spans.push((start, text.len(), field.kind));
        }
        Self {
            id: entry.id().clone(),
            text,
            spans,
        }
    }

    /// Tipo do campo onde a consulta aparece primeiro.
    fn first_match(&self, query: &str) -> Option<FieldKind> {
        let position = self.text.find(query)?;
        self.spans
            .iter()
            .find(|(start, end, _)| (*start..*end).contains(&position))
            .map(|(_, _, kind)| *kind)
    }
}

/// Um resultado de busca: a entrada e o campo do primeiro match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    /// Entrada encontrada.
    pub id: &'a EntryId,
    /// Tipo do campo onde a consulta aparece primeiro.
    pub field: FieldKind,
}

/// Um corpus normalizado por entrada, em ordem de `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    corpora: Vec<Corpus>,
}

impl SearchIndex {
    /// Monta os corpora em paralelo; a ordem de `id` do store é preservada.
    pub fn build<E: KnowledgeEntry>(store: &EntryStore<E>) -> Self {
        let entries: Vec<&E> = store.all().collect();
        let corpora: Vec<Corpus> = entries.par_iter().map(|entry| Corpus::build(*entry)).collect();
        tracing::debug!(
            entries = corpora.len(),
            bytes = corpora.iter().map(|c| c.text.len()).sum::<usize>(),
            "Índice de busca construído"
        );
        Self { corpora }
    }

    /// Entradas cujo corpus contém a consulta normalizada.
    ///
    /// Consulta vazia (após `trim`) não encontra nada. O separador na
    /// consulta vira espaço, como no corpus, então um match nunca atravessa
    /// dois campos.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let query = normalize_searchable(query);

        let mut hits: Vec<SearchHit<'_>> = self
            .corpora
            .iter()
            .filter_map(|corpus| {
                corpus.first_match(&query).map(|field| SearchHit {
                    id: &corpus.id,
                    field,
                })
            })
            .collect();
        // corpora já estão em ordem de id; sort estável mantém o desempate
        hits.sort_by_key(|hit| hit.field);
        hits
    }

    /// `true` se a entrada `id` casa com a consulta.
    pub fn matches(&self, id: &str, query: &str) -> bool {
        self.search(query).iter().any(|hit| hit.id.as_str() == id)
    }

    /// Número de entradas indexadas.
    pub fn len(&self) -> usize {
        self.corpora.len()
    }

    /// `true` se nenhuma entrada foi indexada.
    pub fn is_empty(&self) -> bool {
        self.corpora.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entry, LevelContent, LocalizedText, Locale};
    use crate::fixtures;
    use proptest::prelude::*;

    fn index_of(entries: Vec<Entry>) -> SearchIndex {
        SearchIndex::build(&EntryStore::from_entries(entries).unwrap())
    }

    fn hit_ids(index: &SearchIndex, query: &str) -> Vec<String> {
        index.search(query).iter().map(|h| h.id.to_string()).collect()
    }

    #[test]
    fn key_pearl_is_searchable() {
        let index = index_of(fixtures::sample_entries());
        assert_eq!(hit_ids(&index, "carrier frequency"), vec!["cystic-fibrosis"]);
        assert_eq!(index.search("Carrier Frequency")[0].field, FieldKind::KeyPearl);
    }

    #[test]
    fn every_field_finds_its_entry() {
        let entries = fixtures::sample_entries();
        let index = index_of(entries.clone());
        for entry in &entries {
            for field in entry.search_fields() {
                assert!(
                    index.matches(entry.id.as_str(), field.text),
                    "{} não encontrado por {:?}",
                    entry.id,
                    field.text
                );
            }
        }
    }

    #[test]
    fn absent_string_finds_nothing() {
        let index = index_of(fixtures::sample_entries());
        assert!(index.search("xyzzy-not-in-any-field").is_empty());
    }

    #[test]
    fn empty_query_matches_nothing() {
        let index = index_of(fixtures::sample_entries());
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn query_cannot_span_two_fields() {
        let index = index_of(vec![Entry::new("a", "alpha", "Beta")]);
        assert!(index.search("beta\u{1f}alpha").is_empty());
        assert!(index.search("betaalpha").is_empty());
    }

    #[test]
    fn field_containing_the_separator_finds_its_entry() {
        let index = index_of(vec![
            Entry::new("odd", "test", "Odd").with_key_pearl("first\u{1f}second"),
            Entry::new("plain", "test", "Plain").with_key_pearl("first second"),
        ]);
        assert!(index.matches("odd", "first\u{1f}second"));
        assert_eq!(hit_ids(&index, "first\u{1f}second"), vec!["odd", "plain"]);
    }

    #[test]
    fn no_diacritic_folding() {
        let index = index_of(vec![Entry::new("jose-syndrome", "eponyms", "José Syndrome")]);
        assert!(index.search("jose").is_empty());
        assert_eq!(hit_ids(&index, "JOSÉ"), vec!["jose-syndrome"]);
        // "e" + acento agudo combinante
        assert_eq!(hit_ids(&index, "jose\u{301}"), vec!["jose-syndrome"]);
    }

    #[test]
    fn localized_name_is_searchable() {
        let name = LocalizedText::new("Hypothyroidism").with(Locale::new("es"), "Hipotiroidismo");
        let index = index_of(vec![Entry::new("hypothyroidism", "thyroid", name)]);
        let hits = index.search("hipotiroid");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, FieldKind::LocalizedName);
    }

    #[test]
    fn ordered_by_field_priority_then_id() {
        let index = index_of(vec![
            Entry::new("a-keyword", "endocrine", "Metformin").with_keyword("insulin"),
            Entry::new("b-name", "endocrine", "Insulin"),
            Entry::new("c-summary", "endocrine", "Type 1 diabetes")
                .with_ladder([LevelContent::new("Needs insulin every day", "x")]),
            Entry::new("d-name", "endocrine", "Insulin pump"),
        ]);
        let hits = index.search("insulin");
        let order: Vec<(&str, FieldKind)> = hits.iter().map(|h| (h.id.as_str(), h.field)).collect();
        assert_eq!(
            order,
            vec![
                ("b-name", FieldKind::Name),
                ("d-name", FieldKind::Name),
                ("c-summary", FieldKind::Summary),
                ("a-keyword", FieldKind::Keyword),
            ]
        );
    }

    proptest! {
        #[test]
        fn any_literal_field_value_finds_its_entry(
            pearl in "[A-Za-zÀ-ÿ0-9 ~/]{1,24}",
            name in "[A-Za-z]{1,12}",
        ) {
            prop_assume!(!pearl.trim().is_empty());
            let entry = Entry::new("target", "test", name.as_str()).with_key_pearl(pearl.as_str());
            let index = index_of(vec![entry, Entry::new("other", "test", "Unrelated")]);
            prop_assert!(index.matches("target", &pearl));
            prop_assert!(index.matches("target", &name));
        }
    }
}

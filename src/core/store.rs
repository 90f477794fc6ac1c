//! # EntryStore — O Armazém de Entradas
//!
//! Mapa `id → entrada`, dono exclusivo de todas as entradas. É populado uma
//! única vez durante a carga via [`put()`](EntryStore::put) e depois
//! entregue à [`KnowledgeBase`](super::KnowledgeBase), que só expõe
//! referências compartilhadas. Não há caminho de mutação após a carga.
//!
//! `BTreeMap` para que [`all()`](EntryStore::all) seja determinística
//! (ordem de `id`) e possa ser reiniciada quantas vezes for preciso.

use std::collections::BTreeMap;

use crate::core::{EntryId, KnowledgeEntry};
use crate::error::{LoadError, LoadProblem};

/// Mapa `id → entrada` com rejeição de duplicatas.
///
/// # Invariantes
///
/// - Cada `id` aparece no máximo uma vez
/// - Uma entrada rejeitada nunca substitui a que já estava armazenada
#[derive(Debug, Clone)]
pub struct EntryStore<E> {
    entries: BTreeMap<EntryId, E>,
}

impl<E> Default for EntryStore<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<E: KnowledgeEntry> EntryStore<E> {
    /// Cria um store vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Armazena uma entrada.
    ///
    /// # Erros
    ///
    /// Retorna [`LoadProblem::DuplicateId`] se o `id` já existe; a entrada
    /// anterior é preservada e a nova é descartada.
    pub fn put(&mut self, entry: E) -> Result<(), LoadProblem> {
        let id = entry.id().clone();
        if self.entries.contains_key(&id) {
            tracing::debug!(id = %id, "Store: id duplicado rejeitado");
            return Err(LoadProblem::DuplicateId(id));
        }
        tracing::debug!(id = %id, category = %entry.category(), "Store: entrada armazenada");
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Carrega em lote, percorrendo todas as entradas antes de decidir.
    ///
    /// # Erros
    ///
    /// Retorna um [`LoadError`] com **todos** os `id`s duplicados do lote,
    /// cada um uma única vez.
    pub fn from_entries(entries: impl IntoIterator<Item = E>) -> Result<Self, LoadError> {
        let mut store = Self::new();
        let problems: Vec<LoadProblem> = entries
            .into_iter()
            .filter_map(|entry| store.put(entry).err())
            .collect();
        if problems.is_empty() {
            Ok(store)
        } else {
            Err(LoadError::new(problems))
        }
    }

    /// Entrada com o `id` dado, ou `None` se não existir.
    pub fn get(&self, id: &str) -> Option<&E> {
        self.entries.get(id)
    }

    /// `true` se existe uma entrada com esse `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Sequência preguiçosa, finita e reiniciável, em ordem de `id`.
    pub fn all(&self) -> impl Iterator<Item = &E> + Clone + '_ {
        self.entries.values()
    }

    /// Todos os `id`s, em ordem.
    pub fn ids(&self) -> impl Iterator<Item = &EntryId> + '_ {
        self.entries.keys()
    }

    /// Número de entradas armazenadas.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` se nenhuma entrada foi armazenada.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Entry;

    #[test]
    fn duplicate_id_is_rejected_and_original_kept() {
        let mut store = EntryStore::new();
        store.put(Entry::new("bph", "prostate", "BPH")).unwrap();

        let err = store.put(Entry::new("bph", "urology", "Other")).unwrap_err();
        assert_eq!(err, LoadProblem::DuplicateId(EntryId::from("bph")));
        assert_eq!(store.get("bph").unwrap().category.as_str(), "prostate");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn batch_load_reports_every_duplicate_once() {
        let err = EntryStore::from_entries([
            Entry::new("a", "test", "A"),
            Entry::new("a", "test", "A again"),
            Entry::new("b", "test", "B"),
            Entry::new("b", "test", "B again"),
            Entry::new("a", "test", "A third"),
            Entry::new("c", "test", "C"),
        ])
        .unwrap_err();
        assert_eq!(err.duplicate_ids(), vec![&EntryId::from("a"), &EntryId::from("b")]);
        assert_eq!(err.problems().len(), 2);
    }

    #[test]
    fn all_is_ordered_and_restartable() {
        let store = EntryStore::from_entries([
            Entry::new("thyroid-storm", "thyroid", "Thyroid storm"),
            Entry::new("bph", "prostate", "BPH"),
            Entry::new("hypothyroidism", "thyroid", "Hypothyroidism"),
        ])
        .unwrap();

        let all = store.all();
        let first: Vec<&str> = all.clone().map(|e| e.id.as_str()).collect();
        let second: Vec<&str> = all.map(|e| e.id.as_str()).collect();
        assert_eq!(first, vec!["bph", "hypothyroidism", "thyroid-storm"]);
        assert_eq!(first, second);
    }

    #[test]
    fn missing_id_is_none() {
        let store: EntryStore<Entry> = EntryStore::new();
        assert!(store.get("does-not-exist").is_none());
        assert!(store.is_empty());
    }
}

//! # Erros Fatais da Carga
//!
//! Só dois problemas impedem a construção da base:
//!
//! | Problema | Quando |
//! |----------|--------|
//! | [`LoadProblem::DuplicateId`] | duas entradas reivindicam o mesmo `id` |
//! | [`LoadProblem::UndeclaredCategory`] | categoria fora do conjunto declarado |
//!
//! A carga percorre **todas** as entradas antes de falhar, e o
//! [`LoadError`] resultante lista todos os problemas encontrados, em ordem.
//! Um catálogo com três `id`s duplicados produz um único erro com os três.
//!
//! Problemas de qualidade de dados que **não** impedem a carga (referências
//! pendentes, ciclos na hierarquia, níveis faltando...) não são erros: vão
//! para o [`ValidationReport`](crate::validation::ValidationReport).

use crate::core::{Category, EntryId};

/// Um problema estrutural que, sozinho, já torna a carga inválida.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum LoadProblem {
    /// Duas ou mais entradas reivindicam o mesmo `id`.
    #[error("id duplicado no catálogo: {0}")]
    DuplicateId(EntryId),

    /// A entrada usa uma categoria fora do conjunto declarado pelo catálogo.
    #[error("entrada {id} usa categoria não declarada: {category}")]
    UndeclaredCategory { id: EntryId, category: Category },
}

/// Falha da carga, com **todos** os problemas estruturais do catálogo.
///
/// Nunca é construído vazio: a carga só falha quando ao menos um
/// [`LoadProblem`] foi encontrado.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("carga rejeitada com {} problema(s): {}", .problems.len(), join_problems(.problems))]
pub struct LoadError {
    problems: Vec<LoadProblem>,
}

impl LoadError {
    /// Agrega os problemas, ordenados e sem repetição.
    pub fn new(problems: impl IntoIterator<Item = LoadProblem>) -> Self {
        let mut problems: Vec<LoadProblem> = problems.into_iter().collect();
        problems.sort();
        problems.dedup();
        Self { problems }
    }

    /// Todos os problemas encontrados.
    pub fn problems(&self) -> &[LoadProblem] {
        &self.problems
    }

    /// `id`s duplicados, cada um uma única vez, em ordem.
    pub fn duplicate_ids(&self) -> Vec<&EntryId> {
        self.problems
            .iter()
            .filter_map(|problem| match problem {
                LoadProblem::DuplicateId(id) => Some(id),
                LoadProblem::UndeclaredCategory { .. } => None,
            })
            .collect()
    }

    /// Pares `(entrada, categoria)` fora do conjunto declarado.
    pub fn undeclared_categories(&self) -> Vec<(&EntryId, &Category)> {
        self.problems
            .iter()
            .filter_map(|problem| match problem {
                LoadProblem::UndeclaredCategory { id, category } => Some((id, category)),
                LoadProblem::DuplicateId(_) => None,
            })
            .collect()
    }
}

impl From<LoadProblem> for LoadError {
    fn from(problem: LoadProblem) -> Self {
        Self::new([problem])
    }
}

fn join_problems(problems: &[LoadProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problems_are_sorted_and_deduplicated() {
        let err = LoadError::new([
            LoadProblem::DuplicateId(EntryId::from("b")),
            LoadProblem::DuplicateId(EntryId::from("a")),
            LoadProblem::DuplicateId(EntryId::from("b")),
        ]);
        assert_eq!(err.duplicate_ids(), vec![&EntryId::from("a"), &EntryId::from("b")]);
        assert!(err.undeclared_categories().is_empty());
    }

    #[test]
    fn message_lists_every_problem() {
        let err = LoadError::new([
            LoadProblem::DuplicateId(EntryId::from("bph")),
            LoadProblem::UndeclaredCategory {
                id: EntryId::from("gout"),
                category: Category::from("rheumatology"),
            },
        ]);
        let message = err.to_string();
        assert!(message.starts_with("carga rejeitada com 2 problema(s)"), "{message}");
        assert!(message.contains("id duplicado no catálogo: bph"));
        assert!(message.contains("categoria não declarada: rheumatology"));
    }
}

//! # Validação — O Relatório de Qualidade dos Dados
//!
//! A carga nunca para no primeiro problema de dados: tudo que não é fatal
//! (ver [`LoadError`](crate::error::LoadError)) é **coletado** em um único
//! [`ValidationReport`] devolvido a quem chamou o loader.
//!
//! ## Severidade
//!
//! | Issue | Severidade | Origem |
//! |-------|------------|--------|
//! | `DanglingReference` | Error | grafo |
//! | `CyclicHierarchy` | Error | grafo |
//! | `MultipleParents` | Error | grafo |
//! | `IncompleteLevels` | Error | lint de níveis |
//! | `UnmirroredHierarchy` | Warning | grafo |
//! | `RepeatedElaboration` | Warning | lint de níveis |
//! | `MissingTranslation` | Warning | lint de locales |
//! | `PlaceholderText` | Warning | lint de texto |
//!
//! Nenhuma issue torna a base inutilizável: arestas pendentes são apenas
//! excluídas do grafo.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::core::level::repeats_previous;
use crate::core::{EntryId, FieldKind, KnowledgeEntry, Level, Locale, Relationship};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Um problema de qualidade de dados encontrado na carga.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    #[error("referência pendente: {origin} -[{relationship}]-> {target}")]
    DanglingReference {
        origin: EntryId,
        target: EntryId,
        relationship: Relationship,
    },

    /// Componente fortemente conexo de `pai → filhos`: cada membro é
    /// ancestral de si mesmo. Membros em ordem de `id`.
    #[error("entradas em ciclo na hierarquia: {}", join_ids(.members, ", "))]
    CyclicHierarchy { members: Vec<EntryId> },

    #[error("{id} tem mais de um pai: {}", join_ids(.parents, ", "))]
    MultipleParents { id: EntryId, parents: Vec<EntryId> },

    #[error("{declared_by} declara {parent} → {child}, mas o outro lado não declara a recíproca")]
    UnmirroredHierarchy {
        parent: EntryId,
        child: EntryId,
        declared_by: EntryId,
    },

    #[error("{id} é em camadas mas faltam os níveis {}", join_levels(.missing))]
    IncompleteLevels { id: EntryId, missing: Vec<Level> },

    #[error("{id}: a explicação de {level} repete a do nível anterior")]
    RepeatedElaboration { id: EntryId, level: Level },

    #[error("{id}: nome sem tradução para '{locale}'")]
    MissingTranslation { id: EntryId, locale: Locale },

    #[error("{id}: texto provisório em {field:?}")]
    PlaceholderText { id: EntryId, field: FieldKind },
}

fn join_ids(ids: &[EntryId], separator: &str) -> String {
    ids.iter()
        .map(EntryId::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn join_levels(levels: &[Level]) -> String {
    levels
        .iter()
        .map(|l| l.get().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationIssue {
    /// Severidade fixa por tipo de issue (ver tabela no topo do módulo).
    pub fn severity(&self) -> Severity {
        match self {
            ValidationIssue::DanglingReference { .. }
            | ValidationIssue::CyclicHierarchy { .. }
            | ValidationIssue::MultipleParents { .. }
            | ValidationIssue::IncompleteLevels { .. } => Severity::Error,
            ValidationIssue::UnmirroredHierarchy { .. }
            | ValidationIssue::RepeatedElaboration { .. }
            | ValidationIssue::MissingTranslation { .. }
            | ValidationIssue::PlaceholderText { .. } => Severity::Warning,
        }
    }
}

/// Relatório agregado devolvido pela carga.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Relatório vazio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acrescenta uma issue, preservando a ordem de descoberta.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Todas as issues, na ordem em que foram encontradas.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `true` se ao menos uma issue tem severidade [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    /// Só as issues de severidade [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> + '_ {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }

    /// Só as issues de severidade [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> + '_ {
        self.issues.iter().filter(|i| i.severity() == Severity::Warning)
    }

    /// Pares `(origem, alvo)` de todas as referências pendentes.
    pub fn dangling_references(&self) -> Vec<(&EntryId, &EntryId)> {
        self.issues
            .iter()
            .filter_map(|issue| match issue {
                ValidationIssue::DanglingReference { origin, target, .. } => Some((origin, target)),
                _ => None,
            })
            .collect()
    }
}

impl Extend<ValidationIssue> for ValidationReport {
    fn extend<I: IntoIterator<Item = ValidationIssue>>(&mut self, iter: I) {
        self.issues.extend(iter);
    }
}

// ─── Lints de conteúdo ───────────────────────────────────────────

/// Níveis faltando e níveis que não elaboram sobre o anterior.
pub fn check_levels<E: KnowledgeEntry>(entry: &E) -> Vec<ValidationIssue> {
    let Some(levels) = entry.levels().filter(|levels| !levels.is_empty()) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    let missing: Vec<Level> = Level::all().filter(|l| !levels.contains_key(l)).collect();
    if !missing.is_empty() {
        issues.push(ValidationIssue::IncompleteLevels {
            id: entry.id().clone(),
            missing,
        });
    }

    for (level, content) in levels {
        let previous = level.previous().and_then(|p| levels.get(&p));
        if let Some(previous) = previous {
            if repeats_previous(&previous.explanation.text, &content.explanation.text) {
                issues.push(ValidationIssue::RepeatedElaboration {
                    id: entry.id().clone(),
                    level: *level,
                });
            }
        }
    }
    issues
}

/// Traduções do nome exigidas pelo catálogo.
pub fn check_translations<E: KnowledgeEntry>(entry: &E, required: &[Locale]) -> Vec<ValidationIssue> {
    required
        .iter()
        .filter(|locale| !entry.name().has_translation(locale))
        .map(|locale| ValidationIssue::MissingTranslation {
            id: entry.id().clone(),
            locale: locale.clone(),
        })
        .collect()
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(todo|fixme|placeholder)\b").expect("regex de placeholder é literal")
    })
}

/// Texto provisório esquecido pelo autor (`TODO`, `FIXME`, `placeholder`).
/// Uma issue por tipo de campo.
pub fn check_placeholders<E: KnowledgeEntry>(entry: &E) -> Vec<ValidationIssue> {
    let re = placeholder_re();
    let kinds: BTreeSet<FieldKind> = entry
        .search_fields()
        .into_iter()
        .filter(|field| re.is_match(field.text))
        .map(|field| field.kind)
        .collect();
    kinds
        .into_iter()
        .map(|field| ValidationIssue::PlaceholderText {
            id: entry.id().clone(),
            field,
        })
        .collect()
}

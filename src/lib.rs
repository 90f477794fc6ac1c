#![allow(rustdoc::broken_intra_doc_links)]
//! # Tiered Knowledge — Índice de Conhecimento em Camadas
//!
//! Base de conhecimento em memória para conteúdo educacional médico:
//! entradas com escada de níveis 1–5, texto multilíngue, taxonomia de
//! categorias e um grafo de referências cruzadas, com consultas por `id`,
//! por categoria e por texto livre.
//!
//! ## Arquitetura
//!
//! ```text
//! persistence (JSON) ──► KnowledgeBase::load()
//!                          ├── EntryStore        (core::store)
//!                          ├── TaxonomyIndex     (taxonomy)
//!                          ├── CrossReferenceGraph (graph)
//!                          ├── SearchIndex       (search)
//!                          └── ValidationReport  (validation)
//!                                   │
//!                   SharedKnowledgeBase (snapshot) ◄── leitores
//! ```
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`core`] | tipos do domínio, store e fachada de consulta |
//! | [`taxonomy`] | facetas por categoria, subcategoria e tag |
//! | [`graph`] | arestas validadas, hierarquia, índice reverso |
//! | [`search`] | corpus normalizado e busca por substring |
//! | [`validation`] | issues de carga e lints de conteúdo |
//! | [`persistence`] | leitura/escrita do catálogo JSON |
//! | [`snapshot`] | troca atômica da base em uso |
//! | [`config`] | configuração do binário via ambiente |

pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod persistence;
pub mod search;
pub mod snapshot;
pub mod taxonomy;
pub mod validation;

#[cfg(test)]
mod fixtures;

pub use crate::core::{CatalogRules, Entry, EntryQuery, KnowledgeBase, KnowledgeEntry, ReferenceCard};
pub use crate::error::{LoadError, LoadProblem};
pub use crate::snapshot::SharedKnowledgeBase;
pub use crate::validation::{Severity, ValidationIssue, ValidationReport};

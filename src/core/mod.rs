//! # Módulo Core — Tipos Fundamentais do Domínio
//!
//! Este módulo agrupa os **tipos fundamentais** da base de conhecimento em
//! camadas:
//!
//! - [`Entry`] — Unidade de conteúdo com escada de níveis 1–5
//! - [`ReferenceCard`] — Entrada enciclopédica plana (sem níveis)
//! - [`Level`] / [`LevelContent`] — Um degrau da escada de divulgação
//! - [`LocalizedText`] — Texto primário + traduções por [`Locale`]
//! - [`CrossReference`] / [`Edge`] — Relação tipada entre entradas
//! - [`KnowledgeEntry`] — Capacidade que o motor genérico exige
//! - [`EntryStore`] — Dono exclusivo das entradas carregadas
//! - [`KnowledgeBase`] — Fachada de consulta sobre store + índices
//!
//! ## Analogia com o Mundo Real
//!
//! Pense na [`KnowledgeBase`] como uma **enciclopédia médica**:
//! - Cada [`Entry`] é um **verbete**, escrito cinco vezes para cinco leitores
//! - Cada [`CrossReference`] é um **"ver também"** na margem
//! - A taxonomia é o **índice por capítulo**; a busca é o **índice remissivo**
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tiered_knowledge::core::{CatalogRules, Entry, KnowledgeBase};
//!
//! let entry = Entry::new("bph", "prostate", "Benign prostatic hyperplasia")
//!     .with_key_pearl("Alpha blockers relieve symptoms within days");
//!
//! let (kb, report) = KnowledgeBase::load([entry], &CatalogRules::default()).unwrap();
//! assert!(report.is_empty());
//! assert_eq!(kb.search("alpha blockers").len(), 1);
//! ```

pub mod cross_reference;
pub mod entry;
pub mod knowledge_base;
pub mod level;
pub mod locale;
pub mod reference_card;
pub mod searchable;
pub mod store;

// Re-exports: permite usar `crate::core::Entry` diretamente.
pub use cross_reference::{CrossReference, Edge, Relationship};
pub use entry::{
    Category, ClinicalRelevance, ContentStatus, Entry, EntryId, LocalizedEntry, LocalizedLevel, Tags,
};
pub use knowledge_base::{CatalogRules, EntryQuery, KnowledgeBase};
pub use level::{KeyTerm, Level, LevelContent};
pub use locale::{Locale, LocalizedText, Resolved};
pub use reference_card::ReferenceCard;
pub use searchable::{FieldCollector, FieldKind, KnowledgeEntry, SearchField};
pub use store::EntryStore;

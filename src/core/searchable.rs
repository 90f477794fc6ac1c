//! # KnowledgeEntry — A Interface de Capacidade das Entradas
//!
//! Cada tabela de domínio (condições, fármacos, exames...) tem seu próprio
//! formato de entrada. Em vez de repetir `search*`, `filterBy*` e
//! `get*ById` por tabela, toda entrada implementa [`KnowledgeEntry`] e um
//! único motor (store + taxonomia + grafo + busca) serve todas.
//!
//! ## Campos Pesquisáveis
//!
//! A entrada declara **explicitamente** seus campos pesquisáveis via
//! [`search_fields()`](KnowledgeEntry::search_fields), cada um marcado com
//! um [`FieldKind`]. A ordem de [`FieldKind`] é a ordem documentada do
//! corpus e também a prioridade usada para ordenar resultados:
//!
//! ```text
//! Name → LocalizedName → AlternateName → Category → Summary → Description
//!      → Explanation → KeyTerm → ClinicalFeature → Diagnostic → Management
//!      → KeyPearl → Keyword → Complication → Analogy → Example
//!      → ClinicalNote → CrossReferenceLabel
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use super::cross_reference::CrossReference;
use super::entry::{Category, ContentStatus, EntryId, LocalizedEntry};
use super::level::{Level, LevelContent};
use super::locale::{Locale, LocalizedText};

/// Tipo de um campo pesquisável. A ordem de declaração é a prioridade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FieldKind {
    Name,
    LocalizedName,
    AlternateName,
    Category,
    Summary,
    Description,
    Explanation,
    KeyTerm,
    ClinicalFeature,
    Diagnostic,
    Management,
    KeyPearl,
    Keyword,
    Complication,
    Analogy,
    Example,
    ClinicalNote,
    CrossReferenceLabel,
}

/// Um trecho de texto visível da entrada, com seu tipo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchField<'a> {
    /// Tipo do campo (define a prioridade no ranking).
    pub kind: FieldKind,
    /// Texto original, antes da normalização.
    pub text: &'a str,
}

impl<'a> SearchField<'a> {
    /// Cria um campo do tipo `kind`.
    pub fn new(kind: FieldKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Acumulador usado pelas implementações de
/// [`search_fields()`](KnowledgeEntry::search_fields).
#[derive(Default)]
pub struct FieldCollector<'a> {
    fields: Vec<SearchField<'a>>,
}

impl<'a> FieldCollector<'a> {
    /// Cria um acumulador vazio.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adiciona um campo. Textos vazios ou só com espaços são ignorados.
    pub fn push(&mut self, kind: FieldKind, text: &'a str) -> &mut Self {
        if !text.trim().is_empty() {
            self.fields.push(SearchField::new(kind, text));
        }
        self
    }

    /// Adiciona vários campos do mesmo tipo, em ordem.
    pub fn extend<I>(&mut self, kind: FieldKind, texts: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for text in texts {
            self.push(kind, text);
        }
        self
    }

    /// Texto primário como `primary`, traduções como `translated`.
    pub fn localized(
        &mut self,
        primary: FieldKind,
        translated: FieldKind,
        text: &'a LocalizedText,
    ) -> &mut Self {
        self.push(primary, &text.text);
        self.extend(translated, text.translated_variants())
    }

    /// Campos acumulados, na ordem de inserção.
    pub fn finish(self) -> Vec<SearchField<'a>> {
        self.fields
    }
}

/// Capacidades que o motor genérico exige de uma entrada.
///
/// `Send + Sync` porque a base construída é compartilhada entre threads e
/// o corpus é montado com rayon.
pub trait KnowledgeEntry: Send + Sync {
    /// Identificador único no catálogo.
    fn id(&self) -> &EntryId;

    /// Categoria primária, do conjunto fechado do domínio.
    fn category(&self) -> &Category;

    /// Subcategoria opcional dentro de [`category()`](KnowledgeEntry::category).
    fn subcategory(&self) -> Option<&str> {
        None
    }

    /// Nome de exibição (primário + traduções).
    fn name(&self) -> &LocalizedText;

    /// Facetas livres (`tags.categories`), independentes de `category`.
    fn facets(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Referências declaradas por esta entrada, em ordem de declaração.
    fn cross_references(&self) -> &[CrossReference] {
        &[]
    }

    /// Estado editorial. Tipos sem fluxo editorial são sempre publicados.
    fn status(&self) -> ContentStatus {
        ContentStatus::Published
    }

    /// Escada de níveis, para entradas em camadas.
    fn levels(&self) -> Option<&BTreeMap<Level, LevelContent>> {
        None
    }

    /// Descrição localizada, para entradas planas.
    fn description(&self) -> Option<&LocalizedText> {
        None
    }

    /// Visão da entrada resolvida para `locale`, com fallback para `primary`.
    ///
    /// Nunca falha por tradução ausente: campos sem tradução usam o texto
    /// primário e `fallback` fica `true`.
    fn localized<'a>(&'a self, locale: &Locale, primary: &Locale) -> LocalizedEntry<'a> {
        LocalizedEntry::of(self, locale, primary)
    }

    /// Lista explícita e ordenada de campos pesquisáveis.
    fn search_fields(&self) -> Vec<SearchField<'_>>;
}

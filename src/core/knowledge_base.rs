//! # KnowledgeBase — A Fachada de Consulta
//!
//! A [`KnowledgeBase`] junta os quatro componentes derivados do
//! [`EntryStore`] e expõe a API de consulta para a camada de apresentação.
//!
//! ```text
//!            ┌──────────────┐
//! entradas → │  EntryStore  │ ← dono exclusivo das entradas
//!            └──────┬───────┘
//!       ┌───────────┼──────────────┐
//!       ▼           ▼              ▼
//!  TaxonomyIndex  CrossReference  SearchIndex
//!  (só ids)       Graph (só ids)  (corpus por entrada)
//! ```
//!
//! ## Ciclo de Vida
//!
//! 1. **Carga** — [`load()`](KnowledgeBase::load) armazena as entradas
//!    (ids duplicados e categorias não declaradas são todos coletados e
//!    abortam a carga juntos), constrói os índices
//!    e roda os lints, devolvendo um [`ValidationReport`] com tudo que foi
//!    encontrado.
//! 2. **Consulta** — todos os métodos recebem `&self`. Não há caminho de
//!    mutação: a base é imutável e pode ser compartilhada entre threads
//!    (ver [`SharedKnowledgeBase`](crate::snapshot::SharedKnowledgeBase)).
//!
//! Ausência nunca é erro na consulta: `id` desconhecido é `None`, categoria
//! desconhecida é lista vazia, nível fora de `1..=5` é `None`.
//!
//! ## Exemplo de Uso
//!
//! ```rust,ignore
//! let (kb, report) = KnowledgeBase::load(entries, &CatalogRules::default())?;
//! for issue in report.issues() {
//!     tracing::warn!(%issue, "catálogo");
//! }
//!
//! let thyroid = kb.filter_by_category(&["thyroid"]);
//! let hits = kb.search("carrier frequency");
//! let storm = kb.locale_of("thyroid-storm", &Locale::new("es"));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use super::cross_reference::{Edge, Relationship};
use super::entry::{Category, ContentStatus, Entry, EntryId, LocalizedEntry};
use super::level::{Level, LevelContent};
use super::locale::{Locale, Resolved};
use super::searchable::KnowledgeEntry;
use super::store::EntryStore;
use crate::error::{LoadError, LoadProblem};
use crate::graph::CrossReferenceGraph;
use crate::search::{SearchHit, SearchIndex};
use crate::taxonomy::TaxonomyIndex;
use crate::validation::{self, ValidationReport};

/// Declarações do catálogo que governam a carga.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRules {
    /// Idioma do texto primário de cada campo localizado.
    pub primary_locale: Locale,
    /// Locales cuja tradução do nome é exigida (aviso se faltar).
    pub required_locales: Vec<Locale>,
    /// Conjunto fechado de categorias. `None` aceita qualquer categoria.
    pub categories: Option<BTreeSet<Category>>,
}

impl Default for CatalogRules {
    fn default() -> Self {
        Self {
            primary_locale: Locale::new("en"),
            required_locales: Vec::new(),
            categories: None,
        }
    }
}

impl CatalogRules {
    /// Catálogo bilíngue: primário + uma tradução obrigatória.
    ///
    /// # Exemplo
    ///
    /// ```rust,ignore
    /// let rules = CatalogRules::bilingual(Locale::new("en"), Locale::new("es"));
    /// assert_eq!(rules.required_locales, vec![Locale::new("es")]);
    /// ```
    pub fn bilingual(primary: Locale, secondary: Locale) -> Self {
        Self {
            primary_locale: primary,
            required_locales: vec![secondary],
            categories: None,
        }
    }

    /// Fecha o conjunto de categorias: entradas fora dele falham a carga
    /// com [`LoadProblem::UndeclaredCategory`].
    pub fn with_categories<I, C>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }
}

/// Filtro combinado: categorias, texto e estado editorial.
///
/// Campos vazios não restringem. Sem texto, o resultado vem em ordem de
/// `id`; com texto, na ordem da busca.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    /// União de categorias aceitas. Vazio aceita todas.
    pub categories: Vec<String>,
    /// Texto buscado com a mesma semântica de [`KnowledgeBase::search()`].
    pub text: Option<String>,
    /// Estado editorial exigido.
    pub status: Option<ContentStatus>,
}

impl EntryQuery {
    /// Consulta sem restrições: devolve todas as entradas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acrescenta uma categoria à união aceita.
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Restringe às entradas que casam com `text`.
    pub fn matching(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Restringe ao estado editorial `status`.
    pub fn with_status(mut self, status: ContentStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Base de conhecimento imutável, genérica sobre o tipo de entrada.
///
/// ## Componentes
///
/// | Campo | Papel |
/// |-------|-------|
/// | `store` | dono das entradas, `id → entrada` |
/// | `taxonomy` | categoria / subcategoria / faceta → ids |
/// | `graph` | arestas validadas nas duas direções |
/// | `search` | corpus normalizado por entrada |
///
/// Os índices guardam apenas [`EntryId`]s; toda resposta é resolvida de
/// volta para `&E` pelo store.
#[derive(Debug, Clone)]
pub struct KnowledgeBase<E = Entry> {
    store: EntryStore<E>,
    taxonomy: TaxonomyIndex,
    graph: CrossReferenceGraph,
    search: SearchIndex,
    primary_locale: Locale,
}

impl<E: KnowledgeEntry> KnowledgeBase<E> {
    /// Carrega as entradas e constrói todos os índices.
    ///
    /// Todas as entradas são examinadas antes de qualquer decisão: `id`s
    /// duplicados e categorias não declaradas são acumulados e, se houver
    /// algum, a carga falha uma única vez com a lista completa. Problemas de
    /// qualidade de dados não impedem a carga e vão para o relatório.
    ///
    /// # Erros
    ///
    /// Retorna [`LoadError`] com todos os [`LoadProblem`]s encontrados.
    pub fn load(
        entries: impl IntoIterator<Item = E>,
        rules: &CatalogRules,
    ) -> Result<(Self, ValidationReport), LoadError> {
        let mut store = EntryStore::new();
        let mut problems = Vec::new();
        for entry in entries {
            problems.extend(check_category(&entry, rules));
            if let Err(problem) = store.put(entry) {
                problems.push(problem);
            }
        }
        if !problems.is_empty() {
            let err = LoadError::new(problems);
            tracing::error!(problems = err.problems().len(), "Carga rejeitada");
            return Err(err);
        }
        Ok(Self::index(store, rules))
    }

    /// Constrói a base a partir de um store já populado.
    ///
    /// # Erros
    ///
    /// Retorna [`LoadError`] com todas as entradas cuja categoria está fora
    /// de [`CatalogRules::categories`].
    pub fn build(
        store: EntryStore<E>,
        rules: &CatalogRules,
    ) -> Result<(Self, ValidationReport), LoadError> {
        let problems: Vec<LoadProblem> = store
            .all()
            .filter_map(|entry| check_category(entry, rules))
            .collect();
        if !problems.is_empty() {
            return Err(LoadError::new(problems));
        }
        Ok(Self::index(store, rules))
    }

    /// Índices e lints sobre um store já aceito.
    fn index(store: EntryStore<E>, rules: &CatalogRules) -> (Self, ValidationReport) {
        let taxonomy = TaxonomyIndex::build(&store);
        let (graph, graph_issues) = CrossReferenceGraph::build(&store);
        let search = SearchIndex::build(&store);

        let mut report = ValidationReport::new();
        report.extend(graph_issues);
        let required: Vec<Locale> = rules
            .required_locales
            .iter()
            .filter(|locale| **locale != rules.primary_locale)
            .cloned()
            .collect();
        for entry in store.all() {
            report.extend(validation::check_levels(entry));
            report.extend(validation::check_translations(entry, &required));
            report.extend(validation::check_placeholders(entry));
        }

        tracing::info!(
            entries = store.len(),
            categories = taxonomy.categories().count(),
            edges = graph.edge_count(),
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            "Base de conhecimento carregada"
        );

        let kb = Self {
            store,
            taxonomy,
            graph,
            search,
            primary_locale: rules.primary_locale.clone(),
        };
        (kb, report)
    }

    // ─── Consulta básica ─────────────────────────────────────────

    /// Entrada com o `id` dado. `id` desconhecido é `None`, nunca erro.
    pub fn get_by_id(&self, id: &str) -> Option<&E> {
        self.store.get(id)
    }

    /// Busca textual por substring, sem distinguir maiúsculas.
    ///
    /// Ordem: prioridade do campo do primeiro match, depois `id`. Consulta
    /// vazia devolve lista vazia.
    ///
    /// # Exemplo
    ///
    /// ```rust,ignore
    /// let hits = kb.search("carrier frequency");
    /// assert_eq!(hits[0].id.as_str(), "cystic-fibrosis");
    /// ```
    pub fn search(&self, query: &str) -> Vec<&E> {
        self.resolve(self.search.search(query).into_iter().map(|hit| hit.id))
    }

    /// Como [`search()`](KnowledgeBase::search), mas com o campo do match.
    pub fn search_hits(&self, query: &str) -> Vec<SearchHit<'_>> {
        self.search.search(query)
    }

    /// União das categorias pedidas, em ordem de `id`. Lista vazia → vazio.
    pub fn filter_by_category(&self, categories: &[&str]) -> Vec<&E> {
        let ids: BTreeSet<&EntryId> = categories
            .iter()
            .flat_map(|category| self.taxonomy.by_category(category))
            .collect();
        self.resolve(ids)
    }

    /// Entradas de `category` com a subcategoria `subcategory`, em ordem de `id`.
    pub fn filter_by_subcategory(&self, category: &str, subcategory: &str) -> Vec<&E> {
        self.resolve(self.taxonomy.by_subcategory(category, subcategory))
    }

    /// Entradas marcadas com a faceta livre `facet` (`tags.categories`).
    pub fn by_facet(&self, facet: &str) -> Vec<&E> {
        self.resolve(self.taxonomy.by_facet(facet))
    }

    /// Filtro combinado de categoria, texto e estado editorial.
    pub fn query(&self, query: &EntryQuery) -> Vec<&E> {
        let in_categories = |entry: &&E| {
            query.categories.is_empty()
                || query
                    .categories
                    .iter()
                    .any(|c| c.as_str() == entry.category().as_str())
        };
        let in_status = |entry: &&E| query.status.map_or(true, |s| entry.status() == s);

        let candidates = match query.text.as_deref() {
            Some(text) => self.search(text),
            None => self.store.all().collect(),
        };
        candidates
            .into_iter()
            .filter(in_categories)
            .filter(in_status)
            .collect()
    }

    /// Número total de entradas carregadas.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Categorias distintas presentes, em ordem.
    pub fn categories(&self) -> Vec<&str> {
        self.taxonomy.categories().map(Category::as_str).collect()
    }

    /// Subcategorias distintas de `category`, em ordem.
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        self.taxonomy.subcategories(category)
    }

    /// Número de entradas por categoria.
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        self.taxonomy
            .counts()
            .into_iter()
            .map(|(category, n)| (category.as_str(), n))
            .collect()
    }

    /// Todas as entradas, em ordem de `id`. A sequência é reiniciável.
    pub fn all(&self) -> impl Iterator<Item = &E> + Clone + '_ {
        self.store.all()
    }

    // ─── Grafo ───────────────────────────────────────────────────

    /// Arestas válidas declaradas por `id`.
    pub fn edges_from(&self, id: &str) -> Vec<&Edge> {
        self.graph.edges_from(id)
    }

    /// Arestas válidas que apontam para `id` (índice reverso).
    pub fn edges_to(&self, id: &str) -> Vec<&Edge> {
        self.graph.edges_to(id)
    }

    /// Vizinhos nas duas direções, opcionalmente por tipo de relação.
    pub fn related(&self, id: &str, relationship: Option<Relationship>) -> Vec<&E> {
        self.resolve(self.graph.related(id, relationship))
    }

    /// Pai de `id` na hierarquia, se houver.
    pub fn parent_of(&self, id: &str) -> Option<&E> {
        self.graph.parent_of(id).and_then(|parent| self.store.get(parent.as_str()))
    }

    /// Filhos de `id` na hierarquia, em ordem de `id`.
    pub fn children_of(&self, id: &str) -> Vec<&E> {
        self.resolve(self.graph.children_of(id))
    }

    // ─── Níveis e locales ────────────────────────────────────────

    /// Nível `n` da entrada `id`. `None` para `n` fora de `1..=5`, nível
    /// ausente ou entrada desconhecida.
    pub fn level_of(&self, id: &str, n: u8) -> Option<&LevelContent> {
        let level = Level::new(n)?;
        self.get_by_id(id)?.levels()?.get(&level)
    }

    /// Nome da entrada no locale pedido, com fallback para o primário.
    pub fn name_of(&self, id: &str, locale: &Locale) -> Option<Resolved<'_>> {
        let entry = self.get_by_id(id)?;
        Some(entry.name().resolve_with_primary(locale, &self.primary_locale))
    }

    /// Visão localizada completa (nome, descrição e níveis) da entrada
    /// `id`, com fallback para o idioma primário. `None` se `id` não existe.
    pub fn locale_of(&self, id: &str, locale: &Locale) -> Option<LocalizedEntry<'_>> {
        self.get_by_id(id)
            .map(|entry| entry.localized(locale, &self.primary_locale))
    }

    /// Idioma primário do catálogo.
    pub fn primary_locale(&self) -> &Locale {
        &self.primary_locale
    }

    // ─── Componentes ─────────────────────────────────────────────

    /// Store subjacente.
    pub fn store(&self) -> &EntryStore<E> {
        &self.store
    }

    /// Índice de taxonomia.
    pub fn taxonomy(&self) -> &TaxonomyIndex {
        &self.taxonomy
    }

    /// Grafo de referências cruzadas.
    pub fn graph(&self) -> &CrossReferenceGraph {
        &self.graph
    }

    fn resolve<'a>(&'a self, ids: impl IntoIterator<Item = &'a EntryId>) -> Vec<&'a E> {
        ids.into_iter()
            .filter_map(|id| self.store.get(id.as_str()))
            .collect()
    }
}

fn check_category<E: KnowledgeEntry>(entry: &E, rules: &CatalogRules) -> Option<LoadProblem> {
    match &rules.categories {
        Some(declared) if !declared.contains(entry.category()) => Some(LoadProblem::UndeclaredCategory {
            id: entry.id().clone(),
            category: entry.category().clone(),
        }),
        _ => None,
    }
}

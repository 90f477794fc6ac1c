//! # Persistência — Leitura e Escrita do Catálogo em Disco
//!
//! Um catálogo é um JSON com as declarações e as entradas:
//!
//! ```json
//! {
//!   "primaryLocale": "en",
//!   "locales": ["es"],
//!   "categories": ["thyroid", "prostate"],
//!   "entries": [
//!     { "id": "bph", "category": "prostate",
//!       "name": { "text": "Benign prostatic hyperplasia",
//!                 "translations": { "es": "Hiperplasia prostática benigna" } } }
//!   ]
//! }
//! ```
//!
//! `categories` é opcional; sem ele qualquer categoria é aceita.
//! `locales` lista as traduções exigidas além do idioma primário.
//!
//! Os índices (taxonomia, grafo, corpus de busca) **não** são
//! serializados: são sempre reconstruídos por
//! [`KnowledgeBase::load()`](crate::core::KnowledgeBase::load).

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{CatalogRules, Category, Entry, KnowledgeBase, KnowledgeEntry, Locale};
use crate::validation::ValidationReport;

fn default_primary_locale() -> Locale {
    Locale::new("en")
}

/// Conteúdo de um arquivo de catálogo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog<E = Entry> {
    /// Idioma do texto primário (padrão `en`).
    #[serde(default = "default_primary_locale")]
    pub primary_locale: Locale,
    /// Traduções exigidas além do primário.
    #[serde(default)]
    pub locales: Vec<Locale>,
    /// Conjunto fechado de categorias, se declarado.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeSet<Category>>,
    /// Entradas, em qualquer ordem.
    pub entries: Vec<E>,
}

impl<E: KnowledgeEntry> Catalog<E> {
    /// Catálogo com as declarações padrão (primário `en`, sem traduções
    /// exigidas, categorias abertas).
    pub fn new(entries: Vec<E>) -> Self {
        Self {
            primary_locale: default_primary_locale(),
            locales: Vec::new(),
            categories: None,
            entries,
        }
    }

    /// Declarações do catálogo como [`CatalogRules`] para a carga.
    pub fn rules(&self) -> CatalogRules {
        CatalogRules {
            primary_locale: self.primary_locale.clone(),
            required_locales: self.locales.clone(),
            categories: self.categories.clone(),
        }
    }

    /// Constrói a base.
    ///
    /// # Erros
    ///
    /// Retorna erro com o [`LoadError`](crate::error::LoadError) completo
    /// se houver `id`s duplicados ou categorias não declaradas.
    pub fn into_knowledge_base(self) -> Result<(KnowledgeBase<E>, ValidationReport)> {
        let rules = self.rules();
        let loaded = KnowledgeBase::load(self.entries, &rules).context("Falha ao carregar o catálogo")?;
        Ok(loaded)
    }
}

/// Interpreta um catálogo a partir do texto JSON.
///
/// # Erros
///
/// Retorna erro se o JSON for malformado ou não tiver a forma de um
/// catálogo (ex: nível fora de `1..=5`).
pub fn parse_catalog<E: DeserializeOwned>(json: &str) -> Result<Catalog<E>> {
    serde_json::from_str(json).context("Falha ao desserializar catálogo")
}

/// Lê um catálogo do disco.
///
/// # Erros
///
/// Retorna erro se o arquivo não existir, não puder ser lido ou não for
/// um catálogo válido.
pub fn load_catalog<E: DeserializeOwned>(path: &Path) -> Result<Catalog<E>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler {}", path.display()))?;
    let catalog: Catalog<E> =
        parse_catalog(&json).with_context(|| format!("Catálogo inválido em {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        entries = catalog.entries.len(),
        "Catálogo lido do disco"
    );
    Ok(catalog)
}

/// Salva um catálogo como JSON pretty-printed, criando o diretório pai se
/// preciso. A escrita não é atômica.
///
/// # Erros
///
/// Retorna erro se o diretório não puder ser criado ou o arquivo escrito.
pub fn save_catalog<E: Serialize>(path: &Path, catalog: &Catalog<E>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Falha ao criar diretório {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(catalog).context("Falha ao serializar catálogo")?;
    std::fs::write(path, json).with_context(|| format!("Falha ao escrever {}", path.display()))?;
    Ok(())
}

/// Atalho: lê o catálogo e constrói a base.
///
/// # Erros
///
/// Os de [`load_catalog()`] e de [`Catalog::into_knowledge_base()`].
pub fn load_knowledge_base(path: &Path) -> Result<(KnowledgeBase, ValidationReport)> {
    load_catalog::<Entry>(path)?.into_knowledge_base()
}

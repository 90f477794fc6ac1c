//! # Tiered Knowledge — Validador de Catálogo
//!
//! **Ponto de entrada** usado pelo build de conteúdo: carrega o catálogo,
//! constrói a base, registra cada issue do relatório e as estatísticas por
//! categoria.
//!
//! ## Fluxo
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging
//!   ├── Lê Config do ambiente
//!   ├── Carrega catálogo + constrói KnowledgeBase
//!   ├── warn!/error! por issue do relatório
//!   ├── info! por categoria (contagem)
//!   └── Modo estrito: sai com erro se houver issue de severidade error
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Validar o catálogo padrão (data/catalog.json)
//! cargo run
//!
//! # Outro catálogo, falhando em erros, com logs detalhados
//! KB_CATALOG_PATH=content/thyroid.json KB_STRICT=1 RUST_LOG=debug cargo run
//! ```

use anyhow::{bail, Result};
use tracing_subscriber::EnvFilter;

use tiered_knowledge::config::Config;
use tiered_knowledge::persistence;
use tiered_knowledge::Severity;

fn main() -> Result<()> {
    // Aceita RUST_LOG; padrão "info".
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(
        path = %config.catalog_path.display(),
        strict = config.strict,
        "📚 Tiered Knowledge — validando catálogo"
    );

    let (kb, report) = persistence::load_knowledge_base(&config.catalog_path)?;

    for issue in report.issues() {
        match issue.severity() {
            Severity::Error => tracing::error!(%issue, "Issue de catálogo"),
            Severity::Warning => tracing::warn!(%issue, "Issue de catálogo"),
        }
    }

    for (category, count) in kb.category_counts() {
        tracing::info!(category, count, "Categoria");
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    tracing::info!(
        entries = kb.count(),
        edges = kb.graph().edge_count(),
        errors,
        warnings,
        "Validação concluída"
    );

    if config.strict && report.has_errors() {
        bail!("{errors} issue(s) de severidade error no catálogo (KB_STRICT ativo)");
    }
    Ok(())
}

//! Configuração do binário de validação, lida do ambiente.
//!
//! | Variável | Padrão | Efeito |
//! |----------|--------|--------|
//! | `KB_CATALOG_PATH` | `data/catalog.json` | catálogo a carregar |
//! | `KB_STRICT` | desligado | `1`/`true`/`yes`: issues de severidade error falham o processo |
//!
//! O locale de consulta nunca vem daqui; é sempre parâmetro explícito.

use std::path::PathBuf;

/// Caminho padrão do catálogo, relativo ao diretório de trabalho.
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";

/// Configuração resolvida do binário.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catálogo JSON a carregar (`KB_CATALOG_PATH`).
    pub catalog_path: PathBuf,
    /// Falhar o processo se o relatório tiver issues de severidade error
    /// (`KB_STRICT`).
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            strict: false,
        }
    }
}

impl Config {
    /// Lê `KB_CATALOG_PATH` e `KB_STRICT` do ambiente do processo.
    /// Variáveis ausentes ou vazias usam o padrão.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve a configuração a partir de uma função de consulta, para que
    /// os testes não dependam do ambiente do processo.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let catalog_path = lookup("KB_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);
        let strict = lookup("KB_STRICT").is_some_and(|value| parse_flag(&value));
        Self {
            catalog_path,
            strict,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), Config::default());
        assert_eq!(config(&[("KB_CATALOG_PATH", "  ")]).catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
    }

    #[test]
    fn reads_path_and_strict_flag() {
        let cfg = config(&[("KB_CATALOG_PATH", "/srv/kb.json"), ("KB_STRICT", "TRUE")]);
        assert_eq!(cfg.catalog_path, PathBuf::from("/srv/kb.json"));
        assert!(cfg.strict);
        assert!(!config(&[("KB_STRICT", "0")]).strict);
        assert!(!config(&[("KB_STRICT", "maybe")]).strict);
    }
}

//! # Level — A Escada de Divulgação Progressiva
//!
//! Cada entrada "em camadas" explica o mesmo assunto em cinco níveis, do
//! leigo ao especialista:
//!
//! | Nível | Público |
//! |-------|---------|
//! | 1 | Criança |
//! | 2 | Paciente / cuidador |
//! | 3 | Enfermagem / profissionais de saúde |
//! | 4 | Estudante de medicina |
//! | 5 | Médico especialista |
//!
//! Os níveis são acessados de forma aleatória e independente: não há
//! "visitar o nível 1 antes do 3".

use std::fmt;

use serde::{Deserialize, Serialize};

use super::locale::LocalizedText;

/// Número de um nível, sempre em `1..=5`.
///
/// A única forma de construir um `Level` é via [`Level::new()`], então um
/// nível fora da faixa não é representável.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Retorna `None` para `n` fora de `1..=5`.
    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Os cinco níveis em ordem crescente.
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN..=Self::MAX).map(Level)
    }

    /// Nível anterior, se houver.
    pub fn previous(self) -> Option<Level> {
        Level::new(self.0 - 1)
    }

    /// Público-alvo do nível (rótulo curto em inglês, usado pela UI).
    pub fn audience(self) -> &'static str {
        match self.0 {
            1 => "Kids",
            2 => "Patient",
            3 => "Nursing",
            4 => "Med Student",
            _ => "Physician",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Level::new(n).ok_or_else(|| format!("nível {n} fora da faixa 1..=5"))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Termo-chave com definição.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTerm {
    /// O termo em si (ex: "TSH").
    pub term: String,
    /// Definição no registro do nível em que aparece.
    pub definition: String,
}

impl KeyTerm {
    /// Cria um termo com sua definição.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// Conteúdo de um nível.
///
/// `summary` e `explanation` são localizados; as listas opcionais ficam
/// vazias quando o autor não as forneceu.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelContent {
    /// Uma frase que resume o nível.
    pub summary: LocalizedText,
    /// Explicação completa para o público do nível.
    pub explanation: LocalizedText,
    /// Termos-chave introduzidos neste nível.
    #[serde(default)]
    pub key_terms: Vec<KeyTerm>,
    /// Achados clínicos (níveis mais altos).
    #[serde(default)]
    pub clinical_features: Vec<String>,
    /// Exames e critérios diagnósticos.
    #[serde(default)]
    pub diagnostics: Vec<String>,
    /// Passos de manejo.
    #[serde(default)]
    pub management: Vec<String>,
    /// Analogias (níveis mais baixos).
    #[serde(default)]
    pub analogies: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub clinical_notes: Vec<String>,
}

impl LevelContent {
    /// Cria um nível com resumo e explicação; listas vazias.
    pub fn new(summary: impl Into<LocalizedText>, explanation: impl Into<LocalizedText>) -> Self {
        Self {
            summary: summary.into(),
            explanation: explanation.into(),
            ..Default::default()
        }
    }

    pub fn with_key_term(mut self, term: KeyTerm) -> Self {
        self.key_terms.push(term);
        self
    }

    pub fn with_clinical_feature(mut self, feature: impl Into<String>) -> Self {
        self.clinical_features.push(feature.into());
        self
    }

    pub fn with_management(mut self, step: impl Into<String>) -> Self {
        self.management.push(step.into());
        self
    }
}

/// `true` quando `current` não elabora sobre `previous`: texto idêntico
/// ou contido no anterior (comparação sem caixa e sem espaços nas pontas).
///
/// É um invariante "suave": verificado pelo lint e pelos testes, nunca
/// imposto na carga.
pub fn repeats_previous(previous: &str, current: &str) -> bool {
    let previous = previous.trim().to_lowercase();
    let current = current.trim().to_lowercase();
    !current.is_empty() && previous.contains(&current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_range_is_one_to_five() {
        assert!(Level::new(0).is_none());
        assert!(Level::new(6).is_none());
        assert_eq!(Level::all().map(Level::get).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn level_one_has_no_previous() {
        assert_eq!(Level::new(1).and_then(Level::previous), None);
        assert_eq!(Level::new(3).and_then(Level::previous), Level::new(2));
    }

    #[test]
    fn level_rejects_out_of_range_on_deserialize() {
        assert!(serde_json::from_str::<Level>("3").is_ok());
        assert!(serde_json::from_str::<Level>("7").is_err());
    }

    #[test]
    fn repeated_explanation_is_detected() {
        assert!(repeats_previous("Sugar is fuel for the body.", "sugar is fuel"));
        assert!(repeats_previous("Same text", " same text "));
        assert!(!repeats_previous("Sugar is fuel.", "Insulin moves glucose into cells."));
        assert!(!repeats_previous("Anything", ""));
    }
}

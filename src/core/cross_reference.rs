//! # Cross-Reference — Relação Tipada Entre Entradas
//!
//! Uma [`CrossReference`] é declarada pelo autor dentro de uma entrada e
//! aponta para outra entrada pelo `id`. É a "aresta" do grafo de
//! referências cruzadas.
//!
//! ## Tipos de Relação ([`Relationship`])
//!
//! | Tipo | Descrição | Exemplo |
//! |------|-----------|---------|
//! | `Parent` | o alvo é o tópico-pai | "Tormenta tiroidea" → "Hipertiroidismo" |
//! | `Child` | o alvo é um subtópico | "Diabetes" → "Cetoacidose" |
//! | `Sibling` | mesmo nível na hierarquia | "Hipotiroidismo" ↔ "Hipertiroidismo" |
//! | `Related` | relação livre | "Diálise" → "DRC" |
//! | `SeeAlso` | leitura complementar | "Golpe de calor" → "Desidratação" |
//!
//! Apenas `Parent`/`Child` formam hierarquia (floresta); os demais formam
//! um grafo geral e podem ter ciclos.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entry::EntryId;

/// Tipo de relação entre duas entradas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    Parent,
    Child,
    Sibling,
    Related,
    SeeAlso,
}

impl Relationship {
    /// A relação vista a partir do alvo.
    ///
    /// Se A declara `child → B`, então B deveria declarar `parent → A`.
    pub fn inverse(self) -> Relationship {
        match self {
            Relationship::Parent => Relationship::Child,
            Relationship::Child => Relationship::Parent,
            other => other,
        }
    }

    /// `true` para `Parent` e `Child`.
    pub fn is_hierarchical(self) -> bool {
        matches!(self, Relationship::Parent | Relationship::Child)
    }

    /// Nome no formato do catálogo (`kebab-case`).
    pub fn label(self) -> &'static str {
        match self {
            Relationship::Parent => "parent",
            Relationship::Child => "child",
            Relationship::Sibling => "sibling",
            Relationship::Related => "related",
            Relationship::SeeAlso => "see-also",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Referência declarada pelo autor dentro de uma entrada.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReference {
    /// `id` da entrada alvo. Precisa existir no catálogo carregado.
    pub target_id: EntryId,
    /// Relação do ponto de vista de quem declara.
    pub relationship: Relationship,
    /// Rótulo de exibição (ex: "CKD as indication for dialysis").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CrossReference {
    /// Referência sem rótulo.
    pub fn new(target_id: impl Into<EntryId>, relationship: Relationship) -> Self {
        Self {
            target_id: target_id.into(),
            relationship,
            label: None,
        }
    }

    /// Builder: define o rótulo de exibição.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Aresta validada do grafo: a referência mais a origem.
///
/// Só guarda ids, nunca cópias das entradas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Entrada que declarou a referência.
    pub source: EntryId,
    /// Entrada alvo. Sempre existe no store.
    pub target: EntryId,
    /// Relação como declarada por `source`.
    pub relationship: Relationship,
    /// Rótulo opcional, copiado da referência.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    /// Aresta a partir de uma referência declarada por `source`. Não
    /// verifica se o alvo existe; isso é feito pelo grafo.
    pub fn from_reference(source: &EntryId, reference: &CrossReference) -> Self {
        Self {
            source: source.clone(),
            target: reference.target_id.clone(),
            relationship: reference.relationship,
            label: reference.label.clone(),
        }
    }

    /// Orienta a aresta hierárquica como `(pai, filho)`.
    ///
    /// Retorna `None` para relações não hierárquicas.
    pub fn parent_child(&self) -> Option<(&EntryId, &EntryId)> {
        match self.relationship {
            Relationship::Child => Some((&self.source, &self.target)),
            Relationship::Parent => Some((&self.target, &self.source)),
            _ => None,
        }
    }
}

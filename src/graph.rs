//! # Cross-Reference Graph — Arestas Validadas nas Duas Direções
//!
//! Construído uma vez a partir do [`EntryStore`]: cada
//! [`CrossReference`](crate::core::CrossReference) declarada vira uma
//! [`Edge`] **se** o alvo existe. Alvos inexistentes viram
//! [`ValidationIssue::DanglingReference`] e a aresta é excluída das duas
//! direções; a carga continua.
//!
//! ## Índices
//!
//! - **Saída**: `id → arestas declaradas por id`
//! - **Entrada** (índice reverso): `id → arestas que apontam para id`
//! - **Hierarquia**: `pai → filhos` e `filho → pais`, unindo o que cada
//!   lado declarou (`child` em um, `parent` no outro)
//!
//! ## Verificações da Hierarquia
//!
//! Arestas `parent`/`child` devem formar uma floresta:
//!
//! | Problema | Issue |
//! |----------|-------|
//! | entrada é ancestral de si mesma | `CyclicHierarchy` (todos os membros do ciclo) |
//! | entrada com mais de um pai | `MultipleParents` |
//! | só um lado declara a relação | `UnmirroredHierarchy` (aviso) |
//!
//! `related`, `sibling` e `see-also` formam um grafo geral e podem ter ciclos.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::{Edge, EntryId, EntryStore, KnowledgeEntry, Relationship};
use crate::validation::ValidationIssue;

static NO_EDGES: Vec<usize> = Vec::new();

/// Grafo de referências cruzadas com índices de saída, entrada e hierarquia.
///
/// `edges` guarda cada aresta válida uma vez; os mapas guardam posições em
/// `edges` ou ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReferenceGraph {
    edges: Vec<Edge>,
    outgoing: BTreeMap<EntryId, Vec<usize>>,
    incoming: BTreeMap<EntryId, Vec<usize>>,
    children: BTreeMap<EntryId, BTreeSet<EntryId>>,
    parents: BTreeMap<EntryId, BTreeSet<EntryId>>,
}

impl CrossReferenceGraph {
    /// Constrói o grafo e devolve todas as issues encontradas, sem parar na
    /// primeira.
    pub fn build<E: KnowledgeEntry>(store: &EntryStore<E>) -> (Self, Vec<ValidationIssue>) {
        let mut graph = Self::default();
        let mut issues = Vec::new();

        for entry in store.all() {
            for reference in entry.cross_references() {
                if !store.contains(reference.target_id.as_str()) {
                    tracing::debug!(
                        source = %entry.id(),
                        target = %reference.target_id,
                        "Grafo: referência pendente descartada"
                    );
                    issues.push(ValidationIssue::DanglingReference {
                        origin: entry.id().clone(),
                        target: reference.target_id.clone(),
                        relationship: reference.relationship,
                    });
                    continue;
                }
                graph.insert(Edge::from_reference(entry.id(), reference));
            }
        }

        issues.extend(graph.check_mirroring());
        issues.extend(graph.check_multiple_parents());
        issues.extend(graph.check_cycles());

        tracing::debug!(
            edges = graph.edges.len(),
            issues = issues.len(),
            "Grafo de referências construído"
        );
        (graph, issues)
    }

    fn insert(&mut self, edge: Edge) {
        let index = self.edges.len();
        self.outgoing.entry(edge.source.clone()).or_default().push(index);
        self.incoming.entry(edge.target.clone()).or_default().push(index);
        if let Some((parent, child)) = edge.parent_child() {
            self.children
                .entry(parent.clone())
                .or_default()
                .insert(child.clone());
            self.parents
                .entry(child.clone())
                .or_default()
                .insert(parent.clone());
        }
        self.edges.push(edge);
    }

    fn resolve<'a>(&'a self, indices: Option<&'a Vec<usize>>) -> Vec<&'a Edge> {
        indices
            .unwrap_or(&NO_EDGES)
            .iter()
            .map(|&i| &self.edges[i])
            .collect()
    }

    /// Arestas declaradas por `id`, na ordem de declaração.
    pub fn edges_from(&self, id: &str) -> Vec<&Edge> {
        self.resolve(self.outgoing.get(id))
    }

    /// Arestas que apontam para `id`.
    pub fn edges_to(&self, id: &str) -> Vec<&Edge> {
        self.resolve(self.incoming.get(id))
    }

    /// Vizinhos de `id` nas duas direções, sem repetição e em ordem de `id`.
    ///
    /// O filtro de relação é aplicado do ponto de vista de `id`: uma aresta
    /// `B -[child]-> id` aparece para `id` como `parent`.
    pub fn related(&self, id: &str, relationship: Option<Relationship>) -> Vec<&EntryId> {
        let wanted = |r: Relationship| relationship.map_or(true, |want| want == r);
        let outgoing = self
            .edges_from(id)
            .into_iter()
            .filter(|e| wanted(e.relationship))
            .map(|e| &e.target);
        let incoming = self
            .edges_to(id)
            .into_iter()
            .filter(|e| wanted(e.relationship.inverse()))
            .map(|e| &e.source);
        outgoing
            .chain(incoming)
            .filter(|other| other.as_str() != id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Pai de `id` na hierarquia. Com mais de um pai (já reportado), o
    /// menor `id`.
    pub fn parent_of(&self, id: &str) -> Option<&EntryId> {
        self.parents.get(id).and_then(|parents| parents.iter().next())
    }

    /// Filhos de `id` na hierarquia, em ordem de `id`.
    pub fn children_of(&self, id: &str) -> Vec<&EntryId> {
        self.children
            .get(id)
            .map(|children| children.iter().collect())
            .unwrap_or_default()
    }

    /// Raízes da floresta: entradas com filhos e sem pai.
    pub fn roots(&self) -> Vec<&EntryId> {
        self.children
            .keys()
            .filter(|id| !self.parents.contains_key(id.as_str()))
            .collect()
    }

    /// Todas as arestas válidas, em ordem de origem e de declaração.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Número de arestas válidas.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn check_mirroring(&self) -> Vec<ValidationIssue> {
        let mut declared: BTreeMap<(&EntryId, &EntryId), BTreeSet<&EntryId>> = BTreeMap::new();
        for edge in &self.edges {
            if let Some(pair) = edge.parent_child() {
                declared.entry(pair).or_default().insert(&edge.source);
            }
        }
        declared
            .into_iter()
            .filter(|((parent, child), by)| !(by.contains(parent) && by.contains(child)))
            .filter_map(|((parent, child), by)| {
                by.into_iter().next().map(|declared_by| ValidationIssue::UnmirroredHierarchy {
                    parent: parent.clone(),
                    child: child.clone(),
                    declared_by: declared_by.clone(),
                })
            })
            .collect()
    }

    fn check_multiple_parents(&self) -> Vec<ValidationIssue> {
        self.parents
            .iter()
            .filter(|(_, parents)| parents.len() > 1)
            .map(|(id, parents)| ValidationIssue::MultipleParents {
                id: id.clone(),
                parents: parents.iter().cloned().collect(),
            })
            .collect()
    }

    /// Tarjan iterativo sobre `pai → filhos`. Cada componente fortemente
    /// conexo com mais de um membro, ou com laço próprio, vira uma issue
    /// listando **todos** os seus membros: toda entrada que é ancestral de
    /// si mesma aparece em exatamente uma issue.
    fn check_cycles(&self) -> Vec<ValidationIssue> {
        let mut tarjan = Tarjan::default();
        for root in self.children.keys() {
            if !tarjan.index.contains_key(root) {
                tarjan.run(root, &self.children);
            }
        }
        let mut components: Vec<Vec<EntryId>> = tarjan
            .components
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.is_own_child(single),
                _ => true,
            })
            .map(|mut component| {
                component.sort();
                component.into_iter().cloned().collect()
            })
            .collect();
        components.sort();
        components
            .into_iter()
            .map(|members| ValidationIssue::CyclicHierarchy { members })
            .collect()
    }

    fn is_own_child(&self, id: &EntryId) -> bool {
        self.children
            .get(id)
            .is_some_and(|children| children.contains(id))
    }
}

type Successors<'a> = std::iter::Flatten<std::option::IntoIter<&'a BTreeSet<EntryId>>>;

fn successors<'a>(children: &'a BTreeMap<EntryId, BTreeSet<EntryId>>, id: &EntryId) -> Successors<'a> {
    children.get(id).into_iter().flatten()
}

/// Estado do algoritmo de Tarjan. A pilha de chamadas é explícita, então
/// cadeias longas de `pai → filho` não consomem a pilha da thread.
#[derive(Default)]
struct Tarjan<'a> {
    next: usize,
    index: BTreeMap<&'a EntryId, usize>,
    lowlink: BTreeMap<&'a EntryId, usize>,
    stack: Vec<&'a EntryId>,
    on_stack: BTreeSet<&'a EntryId>,
    components: Vec<Vec<&'a EntryId>>,
}

impl<'a> Tarjan<'a> {
    fn run(&mut self, root: &'a EntryId, children: &'a BTreeMap<EntryId, BTreeSet<EntryId>>) {
        let mut work: Vec<(&'a EntryId, Successors<'a>)> = Vec::new();
        self.open(root);
        work.push((root, successors(children, root)));

        while let Some((node, pending)) = work.last_mut() {
            let node = *node;
            match pending.next() {
                Some(child) if !self.index.contains_key(child) => {
                    self.open(child);
                    work.push((child, successors(children, child)));
                }
                Some(child) => {
                    if self.on_stack.contains(child) {
                        let low = self.lowlink[node].min(self.index[child]);
                        self.lowlink.insert(node, low);
                    }
                }
                None => {
                    work.pop();
                    if let Some((parent, _)) = work.last() {
                        let low = self.lowlink[*parent].min(self.lowlink[node]);
                        self.lowlink.insert(*parent, low);
                    }
                    if self.lowlink[node] == self.index[node] {
                        self.close(node);
                    }
                }
            }
        }
    }

    fn open(&mut self, node: &'a EntryId) {
        self.index.insert(node, self.next);
        self.lowlink.insert(node, self.next);
        self.next += 1;
        self.stack.push(node);
        self.on_stack.insert(node);
    }

    /// Desempilha o componente cuja raiz é `root`.
    fn close(&mut self, root: &'a EntryId) {
        let mut component = Vec::new();
        while let Some(member) = self.stack.pop() {
            self.on_stack.remove(member);
            component.push(member);
            if member == root {
                break;
            }
        }
        self.components.push(component);
    }
}

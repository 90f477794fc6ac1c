//! # Snapshot Compartilhado da Base
//!
//! Depois da carga a [`KnowledgeBase`] é imutável, então leitores podem
//! consultá-la de várias threads sem lock. Para atualizar o catálogo sem
//! parar os leitores, uma **nova** base é construída fora do caminho
//! quente e o ponteiro visível é trocado atomicamente:
//!
//! ```text
//! leitor A ──snapshot()──► Arc<KB v1> ─┐
//!                                      │ continua válido até o leitor soltar
//! recarga ──replace(KB v2)──► ponteiro ─► Arc<KB v2>
//! leitor B ──snapshot()──► Arc<KB v2>
//! ```
//!
//! O `RwLock` (parking_lot) protege apenas a troca do ponteiro; nenhuma
//! consulta roda com o lock segurado.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{Entry, KnowledgeBase};

/// Ponteiro trocável para a base em uso.
pub struct SharedKnowledgeBase<E = Entry> {
    current: Arc<RwLock<Arc<KnowledgeBase<E>>>>,
}

impl<E> Clone for SharedKnowledgeBase<E> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
        }
    }
}

impl<E> SharedKnowledgeBase<E> {
    /// Publica a primeira versão da base.
    pub fn new(kb: KnowledgeBase<E>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(kb))),
        }
    }

    /// Snapshot consistente para uma sequência de consultas.
    pub fn snapshot(&self) -> Arc<KnowledgeBase<E>> {
        self.current.read().clone()
    }

    /// Publica uma nova base e devolve a anterior. Snapshots já entregues
    /// continuam apontando para a versão antiga.
    pub fn replace(&self, kb: KnowledgeBase<E>) -> Arc<KnowledgeBase<E>> {
        let next = Arc::new(kb);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        tracing::info!("Snapshot da base de conhecimento substituído");
        previous
    }
}

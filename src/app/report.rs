//! Ergebnis einer Engine-Operation: angewendete, übersprungene und fehlgeschlagene Entitäten.
//!
//! Keine Operation bricht wegen einer einzelnen Entität ab. Fehlende Ziele
//! werden still übersprungen, abgelehnte Graph-Edits als Warnung gemeldet.

use crate::core::{EntityId, GraphError};

/// Nicht-fatale Warnung einer Engine-Operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineWarning {
    /// Der Graph hat eine Mutation abgelehnt
    #[error("{entity}: {source}")]
    Graph {
        /// Betroffene Entität
        entity: EntityId,
        /// Abgelehnte Graph-Operation
        #[source]
        source: GraphError,
    },
    /// Einschalten ohne Backup: es gibt keine Kante, die wiederhergestellt werden könnte
    #[error("{0}: keine gespeicherte Verbindung zum Wiederherstellen")]
    NothingToReconnect(EntityId),
    /// Backup-Typ passt nicht zur Entität
    #[error("{0}: Backup passt nicht zum Entitätstyp")]
    RecordMismatch(EntityId),
}

/// Aggregiertes Ergebnis (pro Entität ein Eintrag in genau einer Liste)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Erfolgreich mutierte bzw. wiederhergestellte Entitäten
    pub applied: Vec<EntityId>,
    /// Übersprungen: Ziel existiert nicht mehr oder Benutzer-Kante bleibt erhalten
    pub skipped: Vec<EntityId>,
    /// Abgelehnte Graph-Edits
    pub warnings: Vec<EngineWarning>,
}

impl ApplyReport {
    /// Leerer Report
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn applied(&mut self, entity: EntityId) {
        self.applied.push(entity);
    }

    pub(crate) fn skip(&mut self, entity: EntityId, reason: &str) {
        log::debug!("{entity} übersprungen: {reason}");
        self.skipped.push(entity);
    }

    pub(crate) fn warn(&mut self, warning: EngineWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub(crate) fn graph_error(&mut self, entity: EntityId, source: GraphError) {
        self.warn(EngineWarning::Graph { entity, source });
    }

    /// Hängt einen weiteren Report an.
    pub fn merge(&mut self, other: ApplyReport) {
        self.applied.extend(other.applied);
        self.skipped.extend(other.skipped);
        self.warnings.extend(other.warnings);
    }

    /// `true`, wenn keine Warnungen aufgetreten sind.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

//! Begrenztes Protokoll ausgeführter Commands samt Ergebnis-Zählern.

use super::{AppCommand, ApplyReport};

/// Ein protokollierter Command mit dem Ergebnis seiner Ausführung
#[derive(Debug, Clone)]
pub struct CommandLogEntry {
    /// Ausgeführter Command
    pub command: AppCommand,
    /// Anzahl mutierter bzw. wiederhergestellter Entitäten
    pub applied: usize,
    /// Anzahl übersprungener Entitäten
    pub skipped: usize,
    /// Anzahl Warnungen
    pub warnings: usize,
}

/// Protokoll in Ausführungsreihenfolge, älteste Hälfte fällt bei Überlauf weg.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<CommandLogEntry>,
    total_warnings: usize,
}

impl CommandLog {
    const CAPACITY: usize = 1000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Protokolliert einen abgeschlossenen Command mit seinem Report.
    pub fn record(&mut self, command: AppCommand, report: &ApplyReport) {
        if self.entries.len() >= Self::CAPACITY {
            let dropped = Self::CAPACITY / 2;
            self.entries.drain(..dropped);
            log::debug!("Command-Log gekürzt um {dropped} Einträge");
        }
        self.total_warnings += report.warnings.len();
        self.entries.push(CommandLogEntry {
            command,
            applied: report.applied.len(),
            skipped: report.skipped.len(),
            warnings: report.warnings.len(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CommandLogEntry] {
        &self.entries
    }

    /// Zuletzt ausgeführter Command
    pub fn last_command(&self) -> Option<&AppCommand> {
        self.entries.last().map(|entry| &entry.command)
    }

    /// Summe aller Warnungen seit Start (auch gekürzter Einträge)
    pub fn total_warnings(&self) -> usize {
        self.total_warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_drops_older_half_when_full() {
        let mut log = CommandLog::new();
        let report = ApplyReport::new();
        for _ in 0..CommandLog::CAPACITY {
            log.record(AppCommand::InvalidateEmissiveIndex, &report);
        }
        log.record(AppCommand::DeactivateIsolation, &report);

        assert_eq!(log.len(), CommandLog::CAPACITY / 2 + 1);
        assert!(matches!(
            log.last_command(),
            Some(AppCommand::DeactivateIsolation)
        ));
    }

    #[test]
    fn record_counts_report_entries() {
        let mut log = CommandLog::new();
        let mut report = ApplyReport::new();
        report.applied(crate::core::EntityId::EnvironmentStrength);
        report.skip(crate::core::EntityId::Light("Gone".into()), "fehlt");

        log.record(AppCommand::DeactivateIsolation, &report);

        let entry = &log.entries()[0];
        assert_eq!((entry.applied, entry.skipped, entry.warnings), (1, 1, 0));
        assert_eq!(log.total_warnings(), 0);
    }
}

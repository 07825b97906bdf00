//! Ordered collection of loaded equations with change notification.

use super::{Equation, EquationId};
use crate::error::{GraphError, Result};

/// What changed in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// Everything was replaced.
    BulkReplace,
    /// These equations were appended, in order.
    ItemsAdded(Vec<EquationId>),
    /// The enabled flag of this equation was set.
    ItemChanged(EquationId),
    /// This equation was removed.
    ItemRemoved(EquationId),
}

/// Receives registry events after each mutation has completed.
pub trait RegistryListener {
    /// Called once per mutation with the registry in its final state.
    fn on_registry_event(&mut self, registry: &EquationRegistry, event: &RegistryEvent);
}

/// Ordered equations. Only `replace_all`, `append`, `set_enabled` and
/// `remove` mutate it, and each takes the listener to notify.
#[derive(Debug, Default)]
pub struct EquationRegistry {
    equations: Vec<Equation>,
    next_id: u64,
}

impl EquationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn admit(&mut self, mut equation: Equation) -> EquationId {
        let id = EquationId(self.next_id);
        self.next_id += 1;
        equation.set_id(id);
        self.equations.push(equation);
        id
    }

    /// Clear and insert `equations` in order. Fires one `BulkReplace`.
    pub fn replace_all<L>(&mut self, equations: Vec<Equation>, listener: &mut L)
    where
        L: RegistryListener + ?Sized,
    {
        self.equations.clear();
        for equation in equations {
            self.admit(equation);
        }
        tracing::info!("Registry replaced: {} equations", self.equations.len());
        listener.on_registry_event(self, &RegistryEvent::BulkReplace);
    }

    /// Insert `equations` after the existing ones. Fires one `ItemsAdded`
    /// carrying exactly the new ids.
    pub fn append<L>(&mut self, equations: Vec<Equation>, listener: &mut L) -> Vec<EquationId>
    where
        L: RegistryListener + ?Sized,
    {
        let ids: Vec<EquationId> = equations.into_iter().map(|e| self.admit(e)).collect();
        tracing::info!(
            "Registry appended {} equations ({} total)",
            ids.len(),
            self.equations.len()
        );
        listener.on_registry_event(self, &RegistryEvent::ItemsAdded(ids.clone()));
        ids
    }

    /// Set the enabled flag. Fires `ItemChanged`.
    pub fn set_enabled<L>(&mut self, id: EquationId, enabled: bool, listener: &mut L) -> Result<()>
    where
        L: RegistryListener + ?Sized,
    {
        let equation = self
            .equations
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(GraphError::EquationNotFound(id))?;
        equation.set_enabled(enabled);
        tracing::debug!("Equation {} enabled = {}", id, enabled);
        listener.on_registry_event(self, &RegistryEvent::ItemChanged(id));
        Ok(())
    }

    /// Remove one equation. Fires `ItemRemoved`.
    pub fn remove<L>(&mut self, id: EquationId, listener: &mut L) -> Result<Equation>
    where
        L: RegistryListener + ?Sized,
    {
        let index = self.position(id).ok_or(GraphError::EquationNotFound(id))?;
        let removed = self.equations.remove(index);
        tracing::debug!("Equation {} removed", id);
        listener.on_registry_event(self, &RegistryEvent::ItemRemoved(id));
        Ok(removed)
    }

    /// Look up an equation.
    pub fn get(&self, id: EquationId) -> Option<&Equation> {
        self.equations.iter().find(|e| e.id() == id)
    }

    /// Index of an equation in registry order.
    pub fn position(&self, id: EquationId) -> Option<usize> {
        self.equations.iter().position(|e| e.id() == id)
    }

    /// Equations in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Equation> + '_ {
        self.equations.iter()
    }

    /// Equation at `index` in registry order.
    pub fn at(&self, index: usize) -> Option<&Equation> {
        self.equations.get(index)
    }

    /// Number of equations.
    pub fn len(&self) -> usize {
        self.equations.len()
    }

    /// Whether no equation is loaded.
    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    /// Number of enabled equations.
    pub fn enabled_count(&self) -> usize {
        self.equations.iter().filter(|e| e.is_enabled()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::build;
    use ratatui::style::Color;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(RegistryEvent, usize)>,
    }

    impl RegistryListener for Recorder {
        fn on_registry_event(&mut self, registry: &EquationRegistry, event: &RegistryEvent) {
            self.events.push((event.clone(), registry.len()));
        }
    }

    fn eq(text: &str) -> Equation {
        Equation::new(
            format!("{}= y", text),
            Box::new(build(text).unwrap()),
            Color::White,
            2.0,
        )
    }

    #[test]
    fn append_fires_once_with_new_ids_after_mutation() {
        let mut registry = EquationRegistry::new();
        let mut recorder = Recorder::default();

        registry.replace_all(vec![eq("x"), eq("2*x")], &mut recorder);
        let ids = registry.append(vec![eq("x^2"), eq("x^3")], &mut recorder);

        assert_eq!(ids, vec![EquationId(2), EquationId(3)]);
        assert_eq!(
            recorder.events,
            vec![
                (RegistryEvent::BulkReplace, 2),
                (RegistryEvent::ItemsAdded(ids), 4),
            ]
        );
    }

    #[test]
    fn ids_are_not_reused_across_replacements() {
        let mut registry = EquationRegistry::new();
        let mut recorder = Recorder::default();

        registry.replace_all(vec![eq("x")], &mut recorder);
        let first = registry.at(0).unwrap().id();
        registry.replace_all(vec![eq("x")], &mut recorder);
        let second = registry.at(0).unwrap().id();

        assert!(second > first);
        assert!(registry.get(first).is_none());
    }

    #[test]
    fn set_enabled_and_remove() {
        let mut registry = EquationRegistry::new();
        let mut recorder = Recorder::default();
        registry.replace_all(vec![eq("x"), eq("1")], &mut recorder);
        let id = registry.at(1).unwrap().id();

        registry.set_enabled(id, false, &mut recorder).unwrap();
        assert!(!registry.get(id).unwrap().is_enabled());
        assert_eq!(registry.enabled_count(), 1);

        let removed = registry.remove(id, &mut recorder).unwrap();
        assert_eq!(removed.label(), "1= y");
        assert_eq!(registry.len(), 1);

        assert_eq!(
            recorder.events[1..],
            [
                (RegistryEvent::ItemChanged(id), 2),
                (RegistryEvent::ItemRemoved(id), 1),
            ]
        );
    }

    #[test]
    fn unknown_id_is_an_error_and_fires_nothing() {
        let mut registry = EquationRegistry::new();
        let mut recorder = Recorder::default();

        assert!(matches!(
            registry.set_enabled(EquationId(7), true, &mut recorder),
            Err(GraphError::EquationNotFound(EquationId(7)))
        ));
        assert!(registry.remove(EquationId(7), &mut recorder).is_err());
        assert!(recorder.events.is_empty());
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Undo/redo stacks.

use crate::commands::Command;
use crate::registry::Diagram;

/// Linear edit history. Any new command drops the redo branch.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `command` and make it the most recent undo step.
    pub fn add_command(&mut self, mut command: Command, diagram: &mut Diagram) {
        command.redo(diagram);
        tracing::debug!(command = command.name(), "command applied");
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Revert the most recent command. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, diagram: &mut Diagram) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        command.undo(diagram);
        tracing::debug!(command = command.name(), "command undone");
        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone command. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, diagram: &mut Diagram) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        command.redo(diagram);
        tracing::debug!(command = command.name(), "command redone");
        self.undo_stack.push(command);
        true
    }

    pub fn has_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn last_undo(&self) -> Option<&Command> {
        self.undo_stack.last()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Make every stored command safe to replay outside relation mode.
    pub fn fold_relation_modes(&mut self) {
        for command in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            command.fold_relation_modes();
        }
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::commands::{CreateNode, MoveNode};
    use crate::model::fixtures::node;
    use crate::model::Point;
    use crate::registry::Diagram;

    #[test]
    fn undo_and_redo_on_empty_stacks_are_noops() {
        let mut diagram = Diagram::new();
        let mut history = History::new();

        assert!(!history.undo(&mut diagram));
        assert!(!history.redo(&mut diagram));
        assert!(!history.has_undo());
        assert!(!history.has_redo());
        assert!(diagram.is_empty());
    }

    #[test]
    fn add_command_applies_immediately() {
        let mut diagram = Diagram::new();
        let mut history = History::new();

        history.add_command(CreateNode::new(node("a1", 0.0, 0.0)).into(), &mut diagram);

        assert_eq!(diagram.nodes().len(), 1);
        assert!(history.has_undo());
        assert!(!history.has_redo());
    }

    #[test]
    fn undo_then_redo_walks_the_stacks() {
        let mut diagram = Diagram::new();
        let mut history = History::new();
        history.add_command(CreateNode::new(node("a1", 0.0, 0.0)).into(), &mut diagram);
        let handle = diagram.nodes().handles()[0];
        history.add_command(
            MoveNode::new(handle, Point::new(0.0, 0.0), Point::new(10.0, 10.0)).into(),
            &mut diagram,
        );

        assert!(history.undo(&mut diagram));
        assert_eq!(diagram.node(handle).expect("node").position(), Point::new(0.0, 0.0));
        assert!(history.undo(&mut diagram));
        assert!(diagram.nodes().is_empty());
        assert_eq!(history.redo_len(), 2);

        assert!(history.redo(&mut diagram));
        assert!(history.redo(&mut diagram));
        assert_eq!(diagram.node(handle).expect("node").position(), Point::new(10.0, 10.0));
        assert!(!history.has_redo());
    }

    #[test]
    fn new_command_after_undo_invalidates_redo() {
        let mut diagram = Diagram::new();
        let mut history = History::new();
        history.add_command(CreateNode::new(node("a1", 0.0, 0.0)).into(), &mut diagram);
        history.add_command(CreateNode::new(node("b1", 0.0, 0.0)).into(), &mut diagram);

        history.undo(&mut diagram);
        assert!(history.has_redo());

        history.add_command(CreateNode::new(node("c1", 0.0, 0.0)).into(), &mut diagram);
        assert!(!history.has_redo());
        assert!(!history.redo(&mut diagram));
        assert_eq!(history.undo_len(), 2);
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One open diagram: the registries, its command history, relation mode and the pointer state
//! the UI layer feeds through [`InputEvent`]s.

use serde::Serialize;

use crate::commands::{Command, CreateNode, MoveNode, RemoveNode, RemoveRelation};
use crate::history::History;
use crate::model::{
    ApiRelation, Endpoint, HeatConfig, LinkEnd, NodeHandle, Point, RelationHandle,
};
use crate::registry::Diagram;
use crate::relation_mode::{
    DisableReport, EnableRequest, LayoutHook, NoLayout, ReconcileReport, RelationModeControls,
};
use crate::serial::{self, SerialError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Node(NodeHandle),
    Relation(RelationHandle),
}

/// Pointer input from the diagram surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    BlankPointerClick,
    ElementPointerDown { node: NodeHandle },
    ElementPointerUp { node: NodeHandle, position: Point },
    ElementPointerClick { node: NodeHandle, position: Point },
    LinkPointerDown { relation: RelationHandle },
    PointerMove { position: Point },
    LinkConnect {
        relation: RelationHandle,
        end: LinkEnd,
        target: Endpoint,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Ignored,
    /// Selection or drawing state changed, the diagram did not.
    Updated,
    /// A command ran and was pushed onto the undo stack.
    Applied(&'static str),
}

impl EventOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// One relation as reported by [`GraphHandler::relation_summary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationSummary {
    pub uuid: Option<String>,
    pub label: String,
    pub from: String,
    pub to: String,
    pub mode: &'static str,
    pub confirmed: bool,
}

#[derive(Debug, Clone, Copy)]
struct Movement {
    node: NodeHandle,
    start: Point,
}

pub struct GraphHandler {
    diagram: Diagram,
    history: History,
    relation_mode: RelationModeControls,
    selection: Option<Selection>,
    movement: Option<Movement>,
    layout: Box<dyn LayoutHook + Send>,
}

impl Default for GraphHandler {
    fn default() -> Self {
        Self::with_diagram(Diagram::new())
    }
}

impl std::fmt::Debug for GraphHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphHandler")
            .field("diagram", &self.diagram)
            .field("history", &self.history)
            .field("relation_mode", &self.relation_mode)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl GraphHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagram(diagram: Diagram) -> Self {
        Self {
            diagram,
            history: History::new(),
            relation_mode: RelationModeControls::new(),
            selection: None,
            movement: None,
            layout: Box::new(NoLayout),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SerialError> {
        Ok(Self::with_diagram(serial::from_json(json)?))
    }

    pub fn with_layout(mut self, layout: impl LayoutHook + Send + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn to_json(&self) -> Result<String, SerialError> {
        serial::to_json(&self.diagram)
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn relation_mode(&self) -> &RelationModeControls {
        &self.relation_mode
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn set_relation_label(&mut self, label: impl Into<String>) {
        self.relation_mode.visual_mut().set_relation_label(label);
    }

    /// Store `config` under its `<label>-<attribute>` key, replacing an older one.
    pub fn set_heat_config(&mut self, config: HeatConfig) -> Option<HeatConfig> {
        self.diagram.set_heat_config(config)
    }

    pub fn remove_heat_config(&mut self, key: &str) -> Option<HeatConfig> {
        self.diagram.remove_heat_config(key)
    }

    /// Run `command` and record it for undo.
    pub fn add_command(&mut self, command: impl Into<Command>) -> &'static str {
        let command = command.into();
        let name = command.name();
        self.history.add_command(command, &mut self.diagram);
        self.drop_stale_selection();
        name
    }

    /// Run a [`CreateNode`] and return the handle of the placed node.
    pub fn place_node(&mut self, command: CreateNode) -> Option<NodeHandle> {
        self.add_command(command);
        match self.history.last_undo() {
            Some(Command::CreateNode(command)) => command.handle(),
            _ => None,
        }
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.diagram);
        self.drop_stale_selection();
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.diagram);
        self.drop_stale_selection();
        redone
    }

    pub fn has_undo(&self) -> bool {
        self.history.has_undo()
    }

    pub fn has_redo(&self) -> bool {
        self.history.has_redo()
    }

    pub fn dispatch(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::BlankPointerClick => {
                self.selection = None;
                self.movement = None;
                self.relation_mode.visual_mut().cancel_drawing();
                EventOutcome::Updated
            }
            InputEvent::ElementPointerDown { node } => {
                let Some(info) = self.diagram.node(node) else {
                    return EventOutcome::Ignored;
                };
                self.movement = Some(Movement {
                    node,
                    start: info.position(),
                });
                self.selection = Some(Selection::Node(node));
                EventOutcome::Updated
            }
            InputEvent::ElementPointerUp { node, position } => {
                let Some(movement) = self.movement.take() else {
                    return EventOutcome::Ignored;
                };
                let command = MoveNode::new(movement.node, movement.start, position);
                if movement.node != node || command.is_noop() {
                    return EventOutcome::Ignored;
                }
                EventOutcome::Applied(self.add_command(command))
            }
            InputEvent::ElementPointerClick { node, position } => {
                match self.relation_mode.element_click(&self.diagram, node, position) {
                    Some(command) => EventOutcome::Applied(self.add_command(command)),
                    None if self.relation_mode.is_active() => EventOutcome::Updated,
                    None => EventOutcome::Ignored,
                }
            }
            InputEvent::LinkPointerDown { relation } => {
                if self.diagram.relation(relation).is_none() {
                    return EventOutcome::Ignored;
                }
                self.relation_mode.visual_mut().cancel_drawing();
                self.selection = Some(Selection::Relation(relation));
                match self.relation_mode.switch_relation(&self.diagram, relation) {
                    Some(command) => EventOutcome::Applied(self.add_command(command)),
                    None => EventOutcome::Updated,
                }
            }
            InputEvent::PointerMove { position } => {
                if self.relation_mode.visual_mut().mousemove(position) {
                    EventOutcome::Updated
                } else {
                    EventOutcome::Ignored
                }
            }
            InputEvent::LinkConnect {
                relation,
                end,
                target,
            } => match self
                .relation_mode
                .connect_relation(&self.diagram, relation, end, target)
            {
                Some(command) => EventOutcome::Applied(self.add_command(command)),
                None => EventOutcome::Ignored,
            },
        }
    }

    /// Remove whatever is selected as an undoable command.
    pub fn remove_selected(&mut self) -> Option<&'static str> {
        let command: Command = match self.selection.take()? {
            Selection::Node(node) => RemoveNode::new(node).into(),
            Selection::Relation(relation) => RemoveRelation::new(relation).into(),
        };
        Some(self.add_command(command))
    }

    pub fn begin_enable_relation_mode(&mut self) -> EnableRequest {
        self.relation_mode.begin_enable(&self.diagram)
    }

    pub fn complete_enable_relation_mode(
        &mut self,
        request: &EnableRequest,
        fetched: Vec<ApiRelation>,
    ) -> Option<ReconcileReport> {
        self.relation_mode.complete_enable(
            &mut self.diagram,
            self.layout.as_mut(),
            request,
            fetched,
        )
    }

    pub fn disable_relation_mode(&mut self) -> DisableReport {
        let report = self.relation_mode.disable(&mut self.diagram);
        self.history.fold_relation_modes();
        self.drop_stale_selection();
        report
    }

    pub fn relation_summary(&self) -> Vec<RelationSummary> {
        self.diagram
            .relations()
            .iter()
            .map(|(_, relation)| {
                let info = relation.info();
                RelationSummary {
                    uuid: info.uuid().map(ToString::to_string),
                    label: info.label().to_owned(),
                    from: info.from().to_string(),
                    to: info.to().to_string(),
                    mode: relation.mode().as_str(),
                    confirmed: relation.is_confirmed(),
                }
            })
            .collect()
    }

    fn drop_stale_selection(&mut self) {
        let alive = match self.selection {
            Some(Selection::Node(node)) => self.diagram.nodes().contains(node),
            Some(Selection::Relation(relation)) => self.diagram.relations().contains(relation),
            None => true,
        };
        if !alive {
            self.selection = None;
        }
    }
}

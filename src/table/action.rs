//! Row actions: what can be offered, and what an invocation hands back.

use crate::model::{Record, Scalar};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A named row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    Edit,
    Disable,
    Enable,
    AddToCart,
    ViewDetail,
    ChangeStatus,
    Delete,
}

/// What an action's handler receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionArg {
    /// The whole record.
    Record,
    /// Only the record's `id`.
    Id,
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Edit,
        ActionKind::Disable,
        ActionKind::Enable,
        ActionKind::AddToCart,
        ActionKind::ViewDetail,
        ActionKind::ChangeStatus,
        ActionKind::Delete,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ActionKind::Edit => "edit",
            ActionKind::Disable => "disable",
            ActionKind::Enable => "enable",
            ActionKind::AddToCart => "addToCart",
            ActionKind::ViewDetail => "viewDetail",
            ActionKind::ChangeStatus => "changeStatus",
            ActionKind::Delete => "delete",
        }
    }

    /// Button text.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Edit => "Editar",
            ActionKind::Disable => "Desactivar",
            ActionKind::Enable => "Activar",
            ActionKind::AddToCart => "Agregar al carrito",
            ActionKind::ViewDetail => "Ver detalle",
            ActionKind::ChangeStatus => "Completar",
            ActionKind::Delete => "Eliminar",
        }
    }

    pub fn arg(self) -> ActionArg {
        match self {
            ActionKind::Edit | ActionKind::AddToCart => ActionArg::Record,
            _ => ActionArg::Id,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown action `{s}`"))
    }
}

/// The actions enabled for a viewer, always in [`ActionKind::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSet {
    enabled: Vec<ActionKind>,
}

impl ActionSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(actions: impl IntoIterator<Item = ActionKind>) -> Self {
        let mut enabled: Vec<ActionKind> = actions.into_iter().collect();
        enabled.sort_unstable();
        enabled.dedup();
        Self { enabled }
    }

    pub fn contains(&self, action: ActionKind) -> bool {
        self.enabled.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.enabled.iter().copied()
    }
}

impl FromIterator<ActionKind> for ActionSet {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The value passed to a handler, shaped by [`ActionKind::arg`].
#[derive(Debug, Clone, PartialEq)]
pub enum ActionTarget {
    Record(Record),
    Id(Scalar),
}

impl ActionTarget {
    pub fn for_action(action: ActionKind, record: &Record) -> Self {
        match action.arg() {
            ActionArg::Record => ActionTarget::Record(record.clone()),
            ActionArg::Id => ActionTarget::Id(record.id().cloned().unwrap_or(Scalar::Null)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionInvocation {
    pub action: ActionKind,
    pub target: ActionTarget,
}

pub type ActionHandler = Box<dyn Fn(ActionTarget) + Send + Sync>;

/// Handlers keyed by action; a `None` handler leaves the action disabled.
#[derive(Default)]
pub struct ActionHandlers {
    handlers: BTreeMap<ActionKind, Option<ActionHandler>>,
}

impl ActionHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: ActionKind, handler: Option<ActionHandler>) -> Self {
        self.handlers.insert(action, handler);
        self
    }

    pub fn enabled(&self) -> ActionSet {
        self.handlers
            .iter()
            .filter(|(_, handler)| handler.is_some())
            .map(|(action, _)| *action)
            .collect()
    }

    /// Runs the handler for an invocation. Returns `false` when the action has none.
    pub fn call(&self, invocation: ActionInvocation) -> bool {
        match self.handlers.get(&invocation.action) {
            Some(Some(handler)) => {
                handler(invocation.target);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_convention() {
        let record = Record::new().with("id", 7).with("name", "Arroz");
        assert_eq!(
            ActionTarget::for_action(ActionKind::Edit, &record),
            ActionTarget::Record(record.clone())
        );
        assert_eq!(
            ActionTarget::for_action(ActionKind::AddToCart, &record),
            ActionTarget::Record(record.clone())
        );
        for kind in [
            ActionKind::Disable,
            ActionKind::Enable,
            ActionKind::Delete,
            ActionKind::ChangeStatus,
            ActionKind::ViewDetail,
        ] {
            assert_eq!(ActionTarget::for_action(kind, &record), ActionTarget::Id(Scalar::Int(7)));
        }
    }

    #[test]
    fn test_action_set_is_ordered_and_deduplicated() {
        let set = ActionSet::new([ActionKind::Delete, ActionKind::Edit, ActionKind::Delete]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![ActionKind::Edit, ActionKind::Delete]);
    }

    #[test]
    fn test_null_handlers_are_disabled() {
        let handlers = ActionHandlers::new()
            .with(ActionKind::Edit, Some(Box::new(|_: ActionTarget| {})))
            .with(ActionKind::Disable, None)
            .with(ActionKind::Enable, None);
        assert_eq!(handlers.enabled(), ActionSet::new([ActionKind::Edit]));
        assert!(!handlers.call(ActionInvocation {
            action: ActionKind::Disable,
            target: ActionTarget::Id(Scalar::Int(1)),
        }));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("addToCart".parse::<ActionKind>(), Ok(ActionKind::AddToCart));
        assert!("fly".parse::<ActionKind>().is_err());
    }
}

//! What each role may see: navigation sections and per-view row actions.

use super::Role;
use crate::table::{ActionKind, ActionSet};
use thiserror::Error;

/// A navigation section of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Categories,
    Subcategories,
    Products,
    Orders,
    Tracking,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Categories,
        Section::Subcategories,
        Section::Products,
        Section::Orders,
        Section::Tracking,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Inicio",
            Section::Categories => "Categoría",
            Section::Subcategories => "Subcategoría",
            Section::Products => "Producto",
            Section::Orders => "Pedido",
            Section::Tracking => "Seguimiento de Pedido",
        }
    }

    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Section::Home | Section::Products | Section::Orders | Section::Tracking => {
                &[Role::Local, Role::Almacen]
            }
            Section::Categories => &[Role::Almacen],
            Section::Subcategories => &[Role::Admin],
        }
    }
}

/// The tables the console shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Products,
    Categories,
    Subcategories,
    Reservations,
    ReservationItems,
    Orders,
    OrderLines,
}

/// A section was requested by a role that cannot open it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} is not available to role {role}", .section.label())]
pub struct AccessDenied {
    pub role: Role,
    pub section: Section,
}

/// Everything a role unlocks, resolved once per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    role: Role,
    sections: Vec<Section>,
}

impl Capabilities {
    pub fn for_role(role: Role) -> Self {
        let sections = Section::ALL
            .into_iter()
            .filter(|s| s.allowed_roles().contains(&role))
            .collect();
        Self { role, sections }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn can_open(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    pub fn require(&self, section: Section) -> Result<(), AccessDenied> {
        if self.can_open(section) {
            Ok(())
        } else {
            Err(AccessDenied {
                role: self.role,
                section,
            })
        }
    }

    /// The row actions enabled on `view` for this role.
    pub fn actions(&self, view: ViewKind) -> ActionSet {
        use ActionKind::*;
        match (view, self.role) {
            (ViewKind::Products, Role::Almacen) => ActionSet::new([Edit, Disable, Enable]),
            (ViewKind::Products, Role::Local) => ActionSet::new([AddToCart]),
            (ViewKind::Categories, Role::Almacen) | (ViewKind::Subcategories, Role::Admin) => {
                ActionSet::new([Edit, Disable, Enable])
            }
            (ViewKind::Reservations, Role::Local | Role::Almacen) => {
                ActionSet::new([Edit, ViewDetail, ChangeStatus, Delete])
            }
            (ViewKind::Orders, Role::Local | Role::Almacen) => ActionSet::new([ViewDetail, ChangeStatus]),
            _ => ActionSet::none(),
        }
    }

    /// Whether the role may create new records on `view`.
    pub fn can_create(&self, view: ViewKind) -> bool {
        self.actions(view).contains(ActionKind::Edit)
    }
}

//! # Tabular Rendering
//!
//! Renders any record collection as a table with client-side search, sort and
//! role-gated row actions.
//!
//! - [`Column`] - field + header label, in display order
//! - [`ActionKind`] / [`ActionSet`] - which row buttons are offered
//! - [`TableView`] - query and sort state over the records; [`TableView::invoke`]
//!   turns a button press into an [`ActionInvocation`]
//! - [`RenderedTable`] - what is displayed, printable through `tabled`
//!
//! The actions column only exists when at least one action is enabled; the
//! caller decides what is enabled (see [`Capabilities`](crate::capability::Capabilities)).
//!
//! ```rust
//! use order_console::model::Record;
//! use order_console::table::{columns, ActionKind, ActionSet, TableView};
//!
//! let records = vec![
//!     Record::new().with("id", 1).with("name", "Café"),
//!     Record::new().with("id", 2).with("name", "Cacao"),
//! ];
//! let mut view = TableView::new(records, columns([("name", "Nombre")]), ActionSet::new([ActionKind::Edit]));
//! view.set_query("caf");
//! assert_eq!(view.rows().len(), 1);
//! println!("{}", view.render());
//! ```

pub mod action;
pub mod column;
pub mod render;
pub mod view;

pub use action::*;
pub use column::*;
pub use render::*;
pub use view::*;

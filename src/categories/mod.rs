//! Cookie-category definitions, project configuration, and the registry.
//!
//! Categories are the unit of consent: a named purpose-grouping of cookies
//! and scripts that can be independently accepted or rejected. The built-in
//! set is closed ([`BuiltinCategory`](definition::BuiltinCategory)); host
//! applications enable a subset of it and may declare additional custom
//! categories. `necessary` is special — always present, always `true`, never
//! configurable.
//!
//! | Piece | Responsibility |
//! |-------|----------------|
//! | [`definition`] | Built-in id/definition table, [`CategoryDefinition`](definition::CategoryDefinition) |
//! | [`config`] | [`ProjectCategoriesConfig`](config::ProjectCategoriesConfig) typed configuration |
//! | [`registry`] | Preference skeletons, reconciliation, listing, validation |

pub mod config;
pub mod definition;
pub mod registry;

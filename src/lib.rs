//! # seedtool - Seed Engine development tool
//!
//! `seed` keeps a modular C++ engine's build files in step with its source
//! tree. Every module carries a JSON manifest (`Module.json`) describing its
//! build target and dependencies; from it the tool generates the module's
//! `CMakeLists.txt`, its public API header and its composite header.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a module and a class inside it
//! seed add module Runtime Common
//! seed add class Runtime Common Log
//!
//! # Wire dependencies, then build and test
//! seed add dep Runtime Math Runtime Common
//! seed build --release --test
//! ```
//!
//! ## Module Organization
//!
//! - [`manifest`] / [`graph`] - module manifests and the dependency graph over them
//! - [`generate`] - artifact generators
//! - [`scaffold`] - module and file creation from [`templates`]
//! - [`build`] - cmake/ctest wrapper
//! - [`commands`] - CLI command handlers

/// CMake configure/build wrapper and runners for the editor and tests.
pub mod build;

/// CLI command handlers.
pub mod commands;

/// Project configuration (`seed.toml`).
pub mod config;

/// Build script and header generators.
pub mod generate;

/// Dependency graph operations.
pub mod graph;

/// Module manifests (`Module.json`).
pub mod manifest;

/// Name validation and derived identifiers.
pub mod naming;

/// Project layout.
pub mod project;

/// Module and file scaffolding.
pub mod scaffold;

/// Placeholder expansion.
pub mod template;

/// Built-in templates and project overrides.
pub mod templates;

/// TODO comment scanner.
pub mod todo;

/// Terminal tables.
pub mod ui;

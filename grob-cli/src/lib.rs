//! # grob-cli
//!
//! Command-line tool for scaffolding Grob projects written in Go.
//!
//! This crate provides the `grob` binary with the following commands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `grob new <name>` | Create a new project with go.mod and an empty app registry |
//! | `grob create-app <app>` | Create an application and register it in `internal/main.go` |
//! | `grob create-module <app> <module>` | Create a module and register it in the app's entry file |
//!
//! ## Architecture
//!
//! - [`commands`] holds one module per command plus the Go templates
//! - [`project`] locates the project root and reads its module path
//! - [`config`] loads optional `grob.yaml` settings and `GROB_*` overrides
//! - [`error`] defines [`error::CliError`], the error every command returns
//!
//! Registration edits are delegated to [`grob_edit`], which rewrites Go
//! source in place without disturbing comments or layout.

pub mod commands;
pub mod config;
pub mod error;
pub mod project;

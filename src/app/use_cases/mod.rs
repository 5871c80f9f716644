//! Use-Cases der Application-Layer-Orchestrierung.

pub mod scene_io;

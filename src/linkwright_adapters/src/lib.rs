//! Infrastructure adapters: the hosted Supabase backend, the local
//! verification authority and its store, configuration, and the
//! framework-agnostic handlers the HTTP layer calls into.

pub mod config;
pub mod handlers;
pub mod local;
pub mod persistence;
pub mod supabase;

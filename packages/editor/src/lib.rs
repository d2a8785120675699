//! # Folio Editor
//!
//! Editing engine for page content sections.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Page + typed Section sequences       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession + operations            │
//! │  - add/update/delete/reorder draft sections │
//! │  - publish gates (run before any request)   │
//! │  - round-trip through the PageBackend port  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ backend: authoritative page store           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Server authority**: every operation round-trips through the
//!    backend and wholesale-replaces the local page with the returned
//!    snapshot. The client never merges sequences itself.
//! 2. **Versioned snapshots**: snapshots older than the held page are
//!    dropped instead of clobbering newer state.
//! 3. **Uniform error channel**: failures surface as `Result`s; local
//!    state is left untouched when an operation fails.
//! 4. **Gates before requests**: publish validation runs locally and
//!    aborts without contacting the backend when a gate fails.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{EditSession, SectionPatch};
//! use folio_model::SectionType;
//!
//! let mut session = EditSession::open(backend, "page-uid").await?;
//! session.add_section(SectionType::Header, None).await?;
//! session
//!     .update_section("section-uid", SectionPatch::text("# Hello"))
//!     .await?;
//! session.publish().await?;
//! ```

mod backend;
mod errors;
mod operations;
mod publish;
mod session;

pub use backend::{BackendError, PageBackend};
pub use errors::EditorError;
pub use operations::{PagePatch, SectionOperation, SectionPatch};
pub use publish::{check_publishable, PublishBlocker};
pub use session::EditSession;

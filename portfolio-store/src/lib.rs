//! Backend access for the teacher portfolio.
//!
//! Persistence, authentication and file storage all live in an external
//! backend-as-a-service. This crate defines the contracts the rest of the
//! workspace consumes and two implementations of them.
//!
//! # Architecture
//!
//! - [`RecordStore`]: schema introspection plus record CRUD per record type
//! - [`FileStore`]: file upload returning a public URL
//! - [`MemoryBackend`]: in-process implementation, loadable from a JSON fixture
//! - [`HttpBackend`]: REST client for the hosted backend
//! - [`ProfileService`] / [`EvidenceBank`]: portfolio-level operations on top

mod backend;
mod error;
mod evidence;
mod http;
mod memory;
mod profile;

pub use backend::{FileStore, Filters, RecordStore, UploadedFile};
pub use error::{StoreError, StoreResult};
pub use evidence::EvidenceBank;
pub use http::{HttpBackend, HttpBackendConfig};
pub use memory::MemoryBackend;
pub use profile::ProfileService;

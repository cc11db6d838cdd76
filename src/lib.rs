//! envsecret - Materialize a service environment as a managed secret.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── check         # Validate custom.environment
//! │   ├── package       # Augment a compiled template
//! │   ├── params        # Print stack parameters
//! │   ├── local         # Local env expansion (env, run)
//! │   └── phases        # List lifecycle hooks
//! └── core/             # Core library components
//!     ├── config        # Service configuration loading
//!     ├── validation    # Leak and key checks
//!     ├── domain/       # Environment entries, secret definitions
//!     ├── secrets       # Secret definition collection
//!     ├── expr          # Deferred template expressions
//!     ├── template      # Template augmentation
//!     ├── lifecycle     # Phases, handlers, parameter relay
//!     ├── local         # Offline environment expansion
//!     └── runtime       # Workload-side secret expansion
//! ```
//!
//! # Features
//!
//! - Secret values travel as `NoEcho` parameters, never in the template body
//! - One Secrets Manager secret per stage holding the whole environment
//! - Least-privilege read access for the function execution role
//! - Local and offline runs see the same resolved environment

pub mod cli;
pub mod core;
pub mod error;

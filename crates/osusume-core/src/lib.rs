//! # Osusume Core
//!
//! The pipeline behind the Osusume recommender: frozen artifact loading,
//! pretrained query encoding, optional feature fusion and cosine-similarity
//! ranking over a static anime catalog.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use osusume_core::{DataConfig, Recommender, RecommendRequest};
//!
//! let recommender = Recommender::new(&DataConfig::default()).unwrap();
//! let request = RecommendRequest::new("a ninja boy seeking recognition")
//!     .with_genres(vec!["Action".to_string()]);
//!
//! for rec in recommender.recommend(&request).unwrap() {
//!     println!("{rec}");
//! }
//! ```
pub mod artifacts;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fusion;
pub mod preprocess;
pub mod rank;
pub mod recommend;
pub mod types;

// Re-export primary API
pub use config::DataConfig;
pub use error::{OsusumeError, Result};
pub use fusion::{FeatureFamilies, FusedRequest};
pub use recommend::Recommender;
pub use types::{Catalog, CatalogEntry, Recommendation, RecommendRequest, DEFAULT_TOP_K};

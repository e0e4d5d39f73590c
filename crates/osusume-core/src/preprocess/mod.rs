//! Transform-only ports of the fitted preprocessors.
//!
//! Fitting happens offline; these types load the frozen parameters and
//! reproduce the corresponding transform for a single query.

pub mod binarizer;
pub mod scaler;
pub mod tfidf;

pub use binarizer::GenreBinarizer;
pub use scaler::NumericScaler;
pub use tfidf::TfidfVectorizer;

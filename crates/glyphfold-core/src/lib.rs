pub mod error;
pub mod normalize;
pub mod preprocess;

pub use error::NormalizeError;
pub use normalize::{
    InvalidInputPolicy, decode, eq_normalized, is_normalized, normalize, normalize_bytes,
    normalize_into,
};
pub use preprocess::{DefaultPreprocessor, Preprocessor};

use crate::normalize::normalize;

pub trait Preprocessor {
    // Default: trim, then fold case, accents and homoglyphs
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        normalize(text)
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Cleans every externally sourced request value before the engine uses it.
pub trait Sanitizer: Send + Sync {
    fn clean(&self, value: &str) -> String;
}

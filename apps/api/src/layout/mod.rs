// Layout primitives: bullet normalization, text measurement, debounced
// style propagation. Everything here is synchronous and framework-free;
// the renderer and the HTTP layer build on top of it.

pub mod bullets;
pub mod debounce;
pub mod font_metrics;

pub use bullets::normalize_bullets;
pub use debounce::{Debouncer, STYLE_DEBOUNCE};
pub use font_metrics::{get_metrics, FontFamily};

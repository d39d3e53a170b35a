// The render pipeline: document + style in, views out. `document` builds
// the absolutely positioned render tree; `overlay` and `form` derive the
// two editable views from it; `pdf` serializes it. All pure — the HTTP
// handlers are thin wrappers.

pub mod document;
pub mod form;
pub mod handlers;
pub mod overlay;
pub mod pdf;
pub mod tree;

pub use document::layout_document;
pub use form::form_from_document;
pub use overlay::overlay_from_page;
pub use pdf::serialize_pdf;

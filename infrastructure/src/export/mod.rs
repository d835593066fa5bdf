//! Book export adapters

mod html;

pub use html::HtmlBookExporter;

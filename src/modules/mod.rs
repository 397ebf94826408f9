pub mod mimetypes;
pub mod settings;
pub mod submissions;
